//! Payment result flow: verify the checkout session after the redirect
//! back from the hosted checkout page.

use inkpress_checkout::FunctionsClient;
use tracing::error;

/// Outcome of the verification phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The redirect carried no session id.
    MissingSession,
    /// The processor confirmed the payment.
    Verified,
    /// The processor answered but did not confirm.
    NotVerified,
    /// The verification function could not be reached or failed.
    VerificationFailed,
}

/// Verify the session id from the redirect query string.
pub async fn verify(functions: &FunctionsClient, session_id: Option<&str>) -> PaymentOutcome {
    let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
        return PaymentOutcome::MissingSession;
    };

    match functions.verify_payment(session_id).await {
        Ok(true) => PaymentOutcome::Verified,
        Ok(false) => PaymentOutcome::NotVerified,
        Err(err) => {
            error!(error = %err, "Payment verification failed");
            PaymentOutcome::VerificationFailed
        }
    }
}

//! Pricing page flow: start a checkout for a paid tier.

use inkpress_checkout::{CheckoutRequest, FunctionsClient, PricingTier};
use tracing::error;

/// What the pricing page should do after a subscribe click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeAction {
    /// Free tier and already signed in: nothing to buy.
    AlreadyHasFreeAccess,
    /// A session is required before subscribing.
    SignInRequired,
    /// Redirect the browser to the hosted checkout page.
    Redirect(String),
    /// The checkout session could not be created.
    Failed,
}

/// Handle a subscribe click for a tier.
///
/// Phase one of the checkout protocol: build the session and hand back the
/// hosted checkout URL. Verification happens on the redirect back (see the
/// payment-result flow).
pub async fn subscribe(
    functions: &FunctionsClient,
    tier: &PricingTier,
    signed_in: bool,
) -> SubscribeAction {
    if !tier.requires_payment() {
        return if signed_in {
            SubscribeAction::AlreadyHasFreeAccess
        } else {
            SubscribeAction::SignInRequired
        };
    }

    if !signed_in {
        return SubscribeAction::SignInRequired;
    }

    let request = CheckoutRequest::card_usd(tier.checkout_item());
    match functions.create_checkout(&request).await {
        Ok(session) => SubscribeAction::Redirect(session.url),
        Err(err) => {
            error!(error = %err, tier = tier.name, "Failed to create checkout session");
            SubscribeAction::Failed
        }
    }
}

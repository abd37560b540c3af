//! Checkout/payment boundary client.
//!
//! Two-phase protocol against remote payment functions:
//! 1. `create_checkout` builds a session from line items and returns the
//!    hosted checkout URL to redirect the browser to.
//! 2. On redirect back, `verify_payment` confirms the session with the
//!    payment processor; the remote function is the source of truth for the
//!    verification outcome — no local state is authoritative.
//!
//! Neither phase retries. Transport failures are distinguished from
//! answered-but-declined outcomes in [`CheckoutError`].

mod client;
mod error;
mod tiers;

pub use client::{CheckoutItem, CheckoutRequest, CheckoutSession, FunctionsClient};
pub use error::{CheckoutError, CheckoutResult};
pub use tiers::{pricing_tiers, PricingTier};

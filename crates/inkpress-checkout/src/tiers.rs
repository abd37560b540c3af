//! Static pricing tier catalogue for the pricing page.

use crate::client::CheckoutItem;

/// A subscription tier as presented on the pricing page.
#[derive(Debug, Clone)]
pub struct PricingTier {
    pub name: &'static str,
    /// Monthly price in the display currency; 0 is the free tier.
    pub price: f64,
    pub period: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
    pub cta: &'static str,
}

impl PricingTier {
    /// Whether subscribing requires a checkout session.
    pub fn requires_payment(&self) -> bool {
        self.price > 0.0
    }

    /// The checkout line item for this tier.
    pub fn checkout_item(&self) -> CheckoutItem {
        CheckoutItem {
            name: format!("{} Subscription", self.name),
            price: self.price,
            quantity: 1,
        }
    }
}

/// The tier catalogue, cheapest first.
pub fn pricing_tiers() -> &'static [PricingTier] {
    &PRICING_TIERS
}

static PRICING_TIERS: [PricingTier; 3] = [
    PricingTier {
        name: "Free",
        price: 0.0,
        period: "forever",
        description: "Perfect for getting started",
        features: &[
            "Read unlimited free articles",
            "Comment on posts",
            "Bookmark articles",
            "Follow creators",
            "Basic search",
        ],
        popular: false,
        cta: "Get Started",
    },
    PricingTier {
        name: "Premium",
        price: 9.99,
        period: "month",
        description: "For serious readers and learners",
        features: &[
            "Everything in Free",
            "Access to premium content",
            "Ad-free reading experience",
            "Advanced search filters",
            "Download articles offline",
            "Priority support",
        ],
        popular: true,
        cta: "Subscribe Now",
    },
    PricingTier {
        name: "Creator",
        price: 29.99,
        period: "month",
        description: "For content creators and publishers",
        features: &[
            "Everything in Premium",
            "Publish unlimited articles",
            "Advanced analytics dashboard",
            "Monetization tools",
            "Custom author page",
            "Newsletter integration",
            "Priority content review",
        ],
        popular: false,
        cta: "Start Creating",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_tier_needs_no_payment() {
        let tiers = pricing_tiers();
        assert_eq!(tiers[0].name, "Free");
        assert!(!tiers[0].requires_payment());
        assert!(tiers[1].requires_payment());
        assert!(tiers[2].requires_payment());
    }

    #[test]
    fn test_checkout_item_names_the_subscription() {
        let item = pricing_tiers()[1].checkout_item();
        assert_eq!(item.name, "Premium Subscription");
        assert_eq!(item.price, 9.99);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_tiers_ordered_by_price() {
        let tiers = pricing_tiers();
        assert!(tiers.windows(2).all(|pair| pair[0].price <= pair[1].price));
    }
}

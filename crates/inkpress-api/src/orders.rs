//! Order operations.

use crate::client::{encode_component, ApiClient};
use inkpress_types::Order;
use tracing::error;

impl ApiClient {
    /// List a user's orders, newest first.
    pub async fn get_orders_by_user(&self, user_id: &str) -> Vec<Order> {
        let url = format!(
            "{}?user_id=eq.{}&select=*&order=created_at.desc",
            self.rest_url("orders"),
            encode_component(user_id)
        );
        match self.fetch_rows(&url, "fetch orders").await {
            Ok(orders) => orders,
            Err(err) => {
                error!(error = %err, user_id, "Error fetching orders");
                Vec::new()
            }
        }
    }

    /// Fetch the order created for a checkout session.
    pub async fn get_order_by_session_id(&self, session_id: &str) -> Option<Order> {
        let url = format!(
            "{}?stripe_session_id=eq.{}&select=*&limit=1",
            self.rest_url("orders"),
            encode_component(session_id)
        );
        match self.fetch_maybe_single(&url, "fetch order").await {
            Ok(order) => order,
            Err(err) => {
                error!(error = %err, session_id, "Error fetching order");
                None
            }
        }
    }
}

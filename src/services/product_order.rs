//! `SoftLayer_Product_Order` calls.

use tracing::info;

use crate::client::{ApiRequest, SharedClient};
use crate::codec;
use crate::datatypes::{OrderReceipt, ProductOrder};
use crate::error::SoftLayerError;

const SERVICE: &str = "SoftLayer_Product_Order";

/// Places orders for billable add-ons.
#[derive(Clone)]
pub struct ProductOrderService {
    client: SharedClient,
}

impl ProductOrderService {
    /// Creates the service.
    #[must_use]
    pub const fn new(client: SharedClient) -> Self {
        Self { client }
    }

    /// Places an order and returns the provider's receipt.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the order is rejected or the receipt
    /// cannot be decoded.
    pub async fn place_order(&self, order: &ProductOrder) -> Result<OrderReceipt, SoftLayerError> {
        let parameter = codec::encode("product order", order)?;
        let request = ApiRequest::new(SERVICE, "placeOrder").parameters(vec![parameter]);
        let body = self.client.invoke(&request).await?;
        let receipt: OrderReceipt = codec::decode("SoftLayer_Product_Order::placeOrder", &body)?;
        info!(order_id = receipt.order_id, complex_type = %order.complex_type, "order placed");
        Ok(receipt)
    }
}

use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::codec::string_or_number;

/// A priced, orderable add-on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPrice {
    /// Price identifier used when ordering.
    pub id: u64,
    /// Categories the price belongs to, in provider order.
    pub categories: Vec<ItemCategory>,
    /// Descriptive metadata for the priced item.
    pub item: Option<Item>,
}

impl ItemPrice {
    /// Returns `true` when any category carries the given code.
    #[must_use]
    pub fn in_category(&self, code: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.category_code == code)
    }
}

/// Category of an item price.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemCategory {
    /// Machine readable code (for example `guest_disk1`).
    pub category_code: String,
}

/// Descriptive metadata returned alongside a price.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Item identifier.
    pub id: u64,
    /// Description (for example `25 GB (SAN)`).
    pub description: String,
    /// Advertised capacity; reported as a string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub capacity: Option<String>,
    /// Capacity units (for example `GB`).
    pub units: String,
}

/// Upgrade order placed through `SoftLayer_Product_Order::placeOrder`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    /// Container type understood by the provider.
    pub complex_type: String,
    /// Guests the order applies to.
    pub virtual_guests: Vec<OrderedGuest>,
    /// Prices being ordered.
    pub prices: Vec<ProductOrderPrice>,
    /// Extra order properties.
    pub properties: Vec<ProductOrderProperty>,
}

/// Container type for guest upgrade orders.
pub const VIRTUAL_GUEST_UPGRADE_ORDER: &str =
    "SoftLayer_Container_Product_Order_Virtual_Guest_Upgrade";

impl ProductOrder {
    /// Builds an upgrade order adding one price to a guest, applied in the
    /// maintenance window starting at `window`.
    #[must_use]
    pub fn guest_upgrade(guest_id: u64, price: &ItemPrice, window: Timestamp) -> Self {
        Self {
            complex_type: VIRTUAL_GUEST_UPGRADE_ORDER.to_owned(),
            virtual_guests: vec![OrderedGuest { id: guest_id }],
            prices: vec![ProductOrderPrice {
                id: price.id,
                categories: price.categories.clone(),
            }],
            properties: vec![ProductOrderProperty {
                name: String::from("MAINTENANCE_WINDOW"),
                value: window.to_rfc3339(),
            }],
        }
    }
}

/// Guest referenced by an order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct OrderedGuest {
    /// Guest identifier.
    pub id: u64,
}

/// Price referenced by an order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProductOrderPrice {
    /// Price identifier.
    pub id: u64,
    /// Categories copied from the selected price.
    pub categories: Vec<ItemCategory>,
}

/// Name/value order property.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProductOrderProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
}

/// Receipt returned after placing an order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderReceipt {
    /// Order identifier.
    pub order_id: u64,
    /// Time the order was placed.
    pub order_date: Option<Timestamp>,
}

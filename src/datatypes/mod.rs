//! Provider entity types.
//!
//! Field names follow the provider's camelCase JSON. Structures default
//! missing fields because listing calls return sparse objects, and every
//! timestamp is optional since absence carries meaning (for example a guest
//! that was never verified).

mod image;
mod product;
mod security;
mod transaction;
mod user_data;
mod virtual_guest;

use chrono::{DateTime, FixedOffset};

pub use image::BlockDeviceTemplateGroup;
pub use product::{
    Item, ItemCategory, ItemPrice, OrderReceipt, OrderedGuest, ProductOrder, ProductOrderPrice,
    ProductOrderProperty, VIRTUAL_GUEST_UPGRADE_ORDER,
};
pub use security::SshKey;
pub use transaction::{Transaction, TransactionGroup, TransactionStatus};
pub use user_data::{UserDataAttribute, UserDataAttributeType};
pub use virtual_guest::{
    Datacenter, Location, OperatingSystem, Password, PowerState, SshKeyReference,
    TemplateGroupReference, TemplateUserData, VirtualGuest, VirtualGuestEdit, VirtualGuestTemplate,
};

/// Timestamp as reported by the provider (RFC 3339 with offset).
pub type Timestamp = DateTime<FixedOffset>;

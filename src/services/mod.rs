//! Typed wrappers around provider services.
//!
//! Each service owns a [`SharedClient`](crate::client::SharedClient) and turns
//! one logical operation into exactly one remote call, decoding the response
//! through [`crate::codec`].

mod account;
mod image_template;
mod product_order;
pub mod virtual_guest;

pub use account::AccountService;
pub use image_template::ImageTemplateService;
pub use product_order::ProductOrderService;
pub use virtual_guest::{
    CapacityExtractor, EphemeralDiskSelector, ItemCapacityExtractor, VirtualGuestService,
    ZeroSizePolicy,
};

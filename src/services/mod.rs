//! Platform lookups the configuration sources depend on.
//!
//! # Components
//!
//! - [`ResourceResolver`] / [`DrawableTable`]: drawable name to integer resource id,
//!   used for the notification small icon. `0` means not found.
//! - [`SenderIdProvider`]: fallback source for the push sender id when the
//!   configuration does not carry one. [`GoogleServicesSenderId`] reads it from
//!   `google-services.json`; [`StaticSenderId`] and [`NoSenderId`] cover hosts
//!   with a fixed value or no messaging platform at all.
//!
//! Both are traits so the loader can be exercised without a device.

pub mod resources;
pub mod sender_id;

pub use resources::{DrawableTable, ResourceResolver};
pub use sender_id::{GoogleServicesSenderId, NoSenderId, SenderIdProvider, StaticSenderId};

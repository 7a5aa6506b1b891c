//! g400-config-core: USB device selection and configuration transfers
//! for the Logitech Gaming Mouse G400.
//!
//! The G400 stores its sample rate and DPI level in onboard firmware,
//! written through vendor-defined SET_REPORT control transfers. This
//! crate wraps the libusb resource lifecycle (context, enumerated
//! devices, open handles, claimed interfaces) and the two-byte wire
//! payloads behind a small typed API.

pub mod configure;
pub mod error;
#[cfg(test)]
mod integration_tests;
pub mod protocol;
pub mod select;
pub mod usb;

/// Logitech USB Vendor ID.
pub const LOGITECH_VID: u16 = 0x046D;

/// USB Product ID of the G400.
pub const G400_PID: u16 = 0xC245;

/// Marketing name, used in user-facing messages.
pub const PRODUCT_NAME: &str = "Logitech Gaming Mouse G400";

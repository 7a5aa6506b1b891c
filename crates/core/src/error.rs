//! Error types for g400-config-core.

use thiserror::Error;

use crate::usb::DeviceAddress;

/// Core library error type.
///
/// Variants fall into two classes callers can distinguish: resolution
/// failures (`NoDevice`, `NoDeviceAt`, `Ambiguous`, `WrongDevice`) and
/// libusb failures carrying the native error's descriptive string.
/// Usage errors never reach this enum; the CLI rejects them before any
/// device access.
#[derive(Debug, Error)]
pub enum Error {
    /// libusb context initialization failed.
    #[error("could not initialize libusb: {0}")]
    Init(#[source] rusb::Error),

    /// Device enumeration failed (commonly insufficient permissions).
    #[error("could not list USB devices: {0}")]
    Enumerate(#[source] rusb::Error),

    /// Device descriptor fetch failed during enumeration.
    #[error("could not read device descriptor: {0}")]
    Descriptor(#[source] rusb::Error),

    /// Device open failed (commonly a permissions problem on the host).
    #[error("could not open device {address}: {source}")]
    Open {
        address: DeviceAddress,
        #[source]
        source: rusb::Error,
    },

    /// Interface claim failed (another process may hold the interface).
    #[error("could not claim interface {interface}: {source}")]
    Claim {
        interface: u8,
        #[source]
        source: rusb::Error,
    },

    /// Control transfer failed.
    #[error("control transfer failed: {0}")]
    Transfer(#[source] rusb::Error),

    /// No matching device is connected.
    #[error("could not find a {} device", crate::PRODUCT_NAME)]
    NoDevice,

    /// No device exists at the requested address.
    #[error("could not find device {0}")]
    NoDeviceAt(DeviceAddress),

    /// Several matching devices are connected and none was singled out.
    #[error("multiple {} devices exist: specify --address BUS.DEV", crate::PRODUCT_NAME)]
    Ambiguous { count: usize },

    /// The device at the requested address is some other product.
    #[error("device {} is not a {}", .0, crate::PRODUCT_NAME)]
    WrongDevice(DeviceAddress),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;

//! RAII wrappers around the libusb resource lifecycle.
//!
//! rusb already ties each native resource to an owning type: the
//! context releases its libusb session on drop, `Device` clones bump
//! the libusb reference count, and a dropped `DeviceHandle` releases
//! any interfaces still claimed before closing. This module layers the
//! G400 domain on top: deterministic enumeration order, eager
//! address/identity reads, and typed errors carrying the native
//! message.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rusb::{Context, Device, DeviceHandle, UsbContext};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::protocol::ControlRequest;
use crate::{G400_PID, LOGITECH_VID};

/// Timeout applied to every control transfer.
pub const TRANSFER_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open a fresh libusb context for the duration of one command.
pub fn open_context() -> Result<Context> {
    Context::new().map_err(Error::Init)
}

/// Bus/device location of a connected device, displayed as `BUS.DEV`.
///
/// Stable only while the device stays plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceAddress {
    pub bus: u8,
    pub dev: u8,
}

impl DeviceAddress {
    /// Composite sort key: bus in the high byte, device number in the
    /// low byte. Gives the human-intuitive 1.4 < 1.7 < 2.3 ordering.
    pub fn sort_key(&self) -> u16 {
        (self.bus as u16) << 8 | self.dev as u16
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.bus, self.dev)
    }
}

impl FromStr for DeviceAddress {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = || -> Option<Self> {
            let (bus, dev) = s.split_once('.')?;
            Some(Self {
                bus: bus.parse().ok()?,
                dev: dev.parse().ok()?,
            })
        };
        parse().ok_or_else(|| format!("invalid device address '{s}' (expected BUS.DEV)"))
    }
}

/// Vendor/product pair used for equality filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Identity of the G400 in wired mode.
pub const MOUSE_IDENTITY: DeviceIdentity = DeviceIdentity {
    vendor_id: LOGITECH_VID,
    product_id: G400_PID,
};

/// A device seen during enumeration: a clonable handle to the
/// underlying libusb device plus its location and identity.
///
/// Clones share the native device via libusb's reference count and may
/// outlive the enumeration call that produced them. The identity is
/// read once, at list time, so lookups here cannot fail.
#[derive(Clone)]
pub struct EnumeratedDevice {
    device: Device<Context>,
    address: DeviceAddress,
    identity: DeviceIdentity,
}

impl EnumeratedDevice {
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    /// Open the device for configuration transfers.
    pub fn open(&self) -> Result<OpenDevice> {
        let handle = self.device.open().map_err(|e| Error::Open {
            address: self.address,
            source: e,
        })?;
        debug!(address = %self.address, "opened device");
        Ok(OpenDevice {
            handle,
            address: self.address,
        })
    }
}

impl fmt::Debug for EnumeratedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumeratedDevice")
            .field("address", &self.address)
            .field("identity", &self.identity)
            .finish()
    }
}

/// List every connected USB device, sorted ascending by the composite
/// (bus, device number) key so output and selection are deterministic
/// regardless of the order libusb reports devices in.
pub fn list_devices(ctx: &Context) -> Result<Vec<EnumeratedDevice>> {
    let list = ctx.devices().map_err(Error::Enumerate)?;
    let mut devices = Vec::with_capacity(list.len());
    for device in list.iter() {
        let address = DeviceAddress {
            bus: device.bus_number(),
            dev: device.address(),
        };
        let desc = device.device_descriptor().map_err(Error::Descriptor)?;
        let identity = DeviceIdentity {
            vendor_id: desc.vendor_id(),
            product_id: desc.product_id(),
        };
        devices.push(EnumeratedDevice {
            device,
            address,
            identity,
        });
    }
    devices.sort_by_key(|d| d.address().sort_key());
    debug!(count = devices.len(), "USB enumeration complete");
    Ok(devices)
}

/// An open session to one device.
///
/// Dropping it releases any interfaces still claimed and closes the
/// native handle, so cleanup runs on every exit path without manual
/// bookkeeping at the call sites.
pub struct OpenDevice {
    handle: DeviceHandle<Context>,
    address: DeviceAddress,
}

impl OpenDevice {
    /// Ask libusb to detach the kernel driver automatically around
    /// interface claims. The call succeeds on Linux and fails on
    /// platforms that do not support it (Windows, macOS); the failure
    /// is deliberately ignored there.
    pub fn enable_kernel_driver_detach(&mut self) {
        if let Err(e) = self.handle.set_auto_detach_kernel_driver(true) {
            debug!(address = %self.address, error = %e, "auto kernel-driver detach unavailable");
        }
    }

    pub fn claim_interface(&mut self, interface: u8) -> Result<()> {
        self.handle
            .claim_interface(interface)
            .map_err(|e| Error::Claim {
                interface,
                source: e,
            })?;
        debug!(address = %self.address, interface, "claimed interface");
        Ok(())
    }

    /// Best-effort release. A failure is logged, not propagated; the
    /// handle's drop cleans up whatever remains claimed.
    pub fn release_interface(&mut self, interface: u8) {
        if let Err(e) = self.handle.release_interface(interface) {
            warn!(address = %self.address, interface, error = %e, "failed to release interface");
        }
    }

    /// Issue one configuration transfer.
    pub fn send(&self, request: &ControlRequest) -> Result<()> {
        let count = self
            .handle
            .write_control(
                request.request_type,
                request.request,
                request.value,
                request.index,
                &request.data,
                TRANSFER_TIMEOUT,
            )
            .map_err(Error::Transfer)?;
        // A short write here means the wire-protocol assumptions are
        // wrong, not that the environment failed.
        assert_eq!(
            count,
            request.data.len(),
            "incorrect number of bytes transferred to mouse"
        );
        info!(
            address = %self.address,
            value = format_args!("0x{:04X}", request.value),
            data = format_args!("{:02X?}", request.data),
            "control transfer complete"
        );
        Ok(())
    }
}

//! Device selection: filter the enumeration down to G400s and resolve
//! to exactly one device, by explicit address or by uniqueness.

use tracing::debug;

use crate::error::{Error, Result};
use crate::usb::{DeviceAddress, DeviceIdentity, EnumeratedDevice, MOUSE_IDENTITY};

/// Seam over enumerated devices so the selection logic is testable
/// without hardware.
pub trait Candidate {
    fn address(&self) -> DeviceAddress;
    fn identity(&self) -> DeviceIdentity;
}

impl Candidate for EnumeratedDevice {
    fn address(&self) -> DeviceAddress {
        EnumeratedDevice::address(self)
    }

    fn identity(&self) -> DeviceIdentity {
        EnumeratedDevice::identity(self)
    }
}

/// All devices matching the G400 identity, enumeration order preserved.
pub fn find_matching<C: Candidate>(devices: &[C]) -> Vec<&C> {
    devices
        .iter()
        .filter(|d| d.identity() == MOUSE_IDENTITY)
        .collect()
}

/// Resolve to the single connected G400, failing if there are none or
/// several.
pub fn find_sole<C: Candidate>(devices: &[C]) -> Result<&C> {
    let matching = find_matching(devices);
    match matching.as_slice() {
        [] => Err(Error::NoDevice),
        [sole] => {
            debug!(address = %sole.address(), "resolved sole matching device");
            Ok(sole)
        }
        many => Err(Error::Ambiguous { count: many.len() }),
    }
}

/// Resolve the device at an explicit `BUS.DEV` address.
///
/// The full list is scanned unfiltered, so a non-G400 sitting at the
/// requested address is reported as the wrong device rather than as
/// absent.
pub fn find_by_address<C: Candidate>(devices: &[C], address: DeviceAddress) -> Result<&C> {
    for device in devices {
        if device.address() != address {
            continue;
        }
        if device.identity() != MOUSE_IDENTITY {
            return Err(Error::WrongDevice(address));
        }
        debug!(address = %address, "resolved device by address");
        return Ok(device);
    }
    Err(Error::NoDeviceAt(address))
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory stand-in for an enumerated device.
    #[derive(Debug, Clone, Copy)]
    pub struct FakeDevice {
        pub address: DeviceAddress,
        pub identity: DeviceIdentity,
    }

    impl FakeDevice {
        pub fn mouse(bus: u8, dev: u8) -> Self {
            Self {
                address: DeviceAddress { bus, dev },
                identity: MOUSE_IDENTITY,
            }
        }

        pub fn other(bus: u8, dev: u8) -> Self {
            Self {
                address: DeviceAddress { bus, dev },
                identity: DeviceIdentity {
                    vendor_id: 0x1D6B,
                    product_id: 0x0002,
                },
            }
        }
    }

    impl Candidate for FakeDevice {
        fn address(&self) -> DeviceAddress {
            self.address
        }

        fn identity(&self) -> DeviceIdentity {
            self.identity
        }
    }
}

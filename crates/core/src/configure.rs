//! Command driver: open a resolved device and write the requested
//! settings.

use tracing::{debug, info};

use crate::error::Result;
use crate::protocol::{ControlRequest, DpiLevel, SampleRate};
use crate::usb::EnumeratedDevice;

/// Interfaces claimed for the duration of any configuration write.
/// Interface 0 is the pointer proper; interface 1 carries the vendor
/// configuration reports.
pub const CLAIMED_INTERFACES: [u8; 2] = [0, 1];

/// The settings one `set` invocation should write. Either field may be
/// absent; both absent is a valid no-op run that still exercises
/// device resolution and access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub sample_rate: Option<SampleRate>,
    pub dpi_level: Option<DpiLevel>,
}

impl Settings {
    pub fn is_empty(&self) -> bool {
        self.sample_rate.is_none() && self.dpi_level.is_none()
    }

    /// The encoded transfers this invocation will issue, sample rate
    /// first.
    pub fn requests(&self) -> Vec<ControlRequest> {
        let mut requests = Vec::new();
        if let Some(rate) = self.sample_rate {
            requests.push(ControlRequest::sample_rate(rate));
        }
        if let Some(level) = self.dpi_level {
            requests.push(ControlRequest::dpi_level(level));
        }
        requests
    }
}

/// Open `device` and apply `settings`.
///
/// Claims interfaces 0 and 1 around the transfers; either claim
/// failing aborts the command. Releases on the success path are
/// explicit, and the handle's drop covers the error paths.
pub fn configure(device: &EnumeratedDevice, settings: &Settings) -> Result<()> {
    let mut open = device.open()?;
    open.enable_kernel_driver_detach();
    for interface in CLAIMED_INTERFACES {
        open.claim_interface(interface)?;
    }

    for request in settings.requests() {
        open.send(&request)?;
    }

    for interface in CLAIMED_INTERFACES {
        open.release_interface(interface);
    }

    if settings.is_empty() {
        debug!(address = %device.address(), "no settings requested; access check only");
    } else {
        info!(address = %device.address(), "configuration written");
    }
    Ok(())
}

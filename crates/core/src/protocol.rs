//! Wire-level contract for G400 configuration.
//!
//! Both settings ride the same vendor-defined SET_REPORT control
//! transfer (host-to-device, class, interface recipient) with a
//! two-byte payload: a fixed command marker followed by the encoded
//! setting.
//!
//! | Setting     | wValue | wIndex | byte 0 | byte 1             |
//! |-------------|--------|--------|--------|--------------------|
//! | Sample rate | 0x0320 | 1      | 0x20   | rate index 0-3     |
//! | DPI level   | 0x038E | 1      | 0x8E   | 0x03 + (level - 1) |

use std::fmt;
use std::str::FromStr;

use rusb::{Direction, Recipient, RequestType};

/// HID SET_REPORT bRequest.
const SET_REPORT: u8 = 9;

/// wIndex of the interface both payloads target.
const CONFIG_INTERFACE: u16 = 1;

const SAMPLE_RATE_VALUE: u16 = 0x0320;
const SAMPLE_RATE_MARKER: u8 = 0x20;

const DPI_LEVEL_VALUE: u16 = 0x038E;
const DPI_LEVEL_MARKER: u8 = 0x8E;
/// Byte-1 encoding of DPI level 1.
const DPI_LEVEL_BASE: u8 = 0x03;

/// Polling sample rates the G400 firmware accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SampleRate {
    Hz125 = 125,
    Hz250 = 250,
    Hz500 = 500,
    Hz1000 = 1000,
}

impl SampleRate {
    /// Convert from a raw Hz value.
    pub fn from_hz(hz: u16) -> Option<Self> {
        match hz {
            125 => Some(Self::Hz125),
            250 => Some(Self::Hz250),
            500 => Some(Self::Hz500),
            1000 => Some(Self::Hz1000),
            _ => None,
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u16 {
        *self as u16
    }

    /// Wire encoding: the firmware counts indices down from 1000 Hz.
    pub fn index(&self) -> u8 {
        match self {
            Self::Hz1000 => 0,
            Self::Hz500 => 1,
            Self::Hz250 => 2,
            Self::Hz125 => 3,
        }
    }

    /// All supported rates.
    pub const ALL: &'static [SampleRate] = &[
        SampleRate::Hz125,
        SampleRate::Hz250,
        SampleRate::Hz500,
        SampleRate::Hz1000,
    ];
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hz())
    }
}

impl FromStr for SampleRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Self::from_hz)
            .ok_or_else(|| format!("invalid sample rate '{s}' (expected 125, 250, 500, or 1000)"))
    }
}

/// Sensitivity level 1-4, corresponding to roughly 400, 800, 1800,
/// and 3600 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpiLevel(u8);

impl DpiLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Construct a level, rejecting values outside 1-4.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DpiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DpiLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("invalid DPI level '{s}' (expected 1-4)"))
    }
}

/// One fully-encoded configuration transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRequest {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub data: [u8; 2],
}

impl ControlRequest {
    fn set_report(value: u16, data: [u8; 2]) -> Self {
        Self {
            request_type: rusb::request_type(
                Direction::Out,
                RequestType::Class,
                Recipient::Interface,
            ),
            request: SET_REPORT,
            value,
            index: CONFIG_INTERFACE,
            data,
        }
    }

    /// Encode a sample-rate write.
    pub fn sample_rate(rate: SampleRate) -> Self {
        Self::set_report(SAMPLE_RATE_VALUE, [SAMPLE_RATE_MARKER, rate.index()])
    }

    /// Encode a DPI-level write.
    pub fn dpi_level(level: DpiLevel) -> Self {
        Self::set_report(
            DPI_LEVEL_VALUE,
            [DPI_LEVEL_MARKER, DPI_LEVEL_BASE + level.get() - 1],
        )
    }
}

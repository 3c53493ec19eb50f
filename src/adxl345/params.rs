//! Strongly typed field encodings for the ADXL345 registers.
//!
//! These enums map directly to datasheet field encodings and are used by the
//! [`registers`](super::registers) bitfields and by [`Config`](super::config::Config).
//!
//! # Examples
//!
//! ```rust
//! use inclinometer::adxl345::params::{FifoMode, OutputDataRate, Range};
//!
//! let odr = OutputDataRate::Hz200;
//! let range = Range::G16;
//! let mode = FifoMode::Fifo;
//! let _ = (odr, range, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Measurement range selection (`DATA_FORMAT[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

/// Data justification (`DATA_FORMAT.JUSTIFY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Justify {
    /// Right-justified with sign extension.
    Right = 0,
    /// Left-justified (MSB mode).
    Left = 1,
}

/// Output resolution (`DATA_FORMAT.FULL_RES`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Resolution {
    /// Fixed 10-bit output whatever the range.
    Fixed10Bit = 0,
    /// 4 mg/LSB at every range (13 bits at ±16 g).
    Full = 1,
}

/// Interrupt output polarity (`DATA_FORMAT.INT_INVERT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPolarity {
    /// Interrupts drive the pin high.
    ActiveHigh = 0,
    /// Interrupts drive the pin low.
    ActiveLow = 1,
}

/// SPI wiring (`DATA_FORMAT.SPI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum SpiWiring {
    /// Separate SDI and SDO lines.
    FourWire = 0,
    /// Shared SDIO line.
    ThreeWire = 1,
}

/// Output data rate in normal power mode (`BW_RATE[3:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 6.25 Hz.
    Hz6_25 = 0x6,
    /// 12.5 Hz.
    Hz12_5 = 0x7,
    /// 25 Hz.
    Hz25 = 0x8,
    /// 50 Hz.
    Hz50 = 0x9,
    /// 100 Hz.
    Hz100 = 0xA,
    /// 200 Hz.
    Hz200 = 0xB,
    /// 400 Hz.
    Hz400 = 0xC,
    /// 800 Hz.
    Hz800 = 0xD,
    /// 1600 Hz.
    Hz1600 = 0xE,
    /// 3200 Hz.
    Hz3200 = 0xF,
}

impl OutputDataRate {
    /// Returns the ODR in hundredths of hertz.
    pub const fn centihertz(self) -> u32 {
        match self {
            Self::Hz6_25 => 625,
            Self::Hz12_5 => 1_250,
            Self::Hz25 => 2_500,
            Self::Hz50 => 5_000,
            Self::Hz100 => 10_000,
            Self::Hz200 => 20_000,
            Self::Hz400 => 40_000,
            Self::Hz800 => 80_000,
            Self::Hz1600 => 160_000,
            Self::Hz3200 => 320_000,
        }
    }

    /// Milliseconds needed to acquire `samples` samples, rounded up.
    pub const fn fill_time_ms(self, samples: u32) -> u32 {
        (samples * 100_000).div_ceil(self.centihertz())
    }
}

/// FIFO operating modes (`FIFO_CTL[7:6]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO bypassed; setting it flushes stored samples.
    Bypass = 0b00,
    /// Collects up to 32 samples then stops.
    Fifo = 0b01,
    /// Keeps the latest 32 samples.
    Stream = 0b10,
    /// Freezes around a trigger event.
    Trigger = 0b11,
}

/// Interrupt pin selection (`FIFO_CTL.TRIGGER`, `INT_MAP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPin {
    /// INT1 output.
    Int1 = 0,
    /// INT2 output.
    Int2 = 1,
}

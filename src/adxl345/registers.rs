//! Register map definitions for the ADXL345 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use super::params::{
    FifoMode, InterruptPin, InterruptPolarity, Justify, OutputDataRate, Range, Resolution,
    SpiWiring,
};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// First reserved register address.
pub const REG_RESERVED_FIRST: u8 = 0x01;
/// Last reserved register address.
pub const REG_RESERVED_LAST: u8 = 0x1C;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`, first of the six data registers.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`, the highest addressable register.
pub const REG_FIFO_STATUS: u8 = 0x39;

/// Value held by `DEVID` on a genuine ADXL345.
pub const EXPECTED_DEVICE_ID: u8 = 0xE5;

/// Opcode bit selecting a read.
pub const SPI_READ: u8 = 0x80;
/// Opcode bit selecting a multi-byte (auto-increment) transfer.
pub const SPI_MULTIPLE: u8 = 0x40;

/// Returns `true` if `register` lies in the reserved block.
pub const fn is_reserved(register: u8) -> bool {
    register >= REG_RESERVED_FIRST && register <= REG_RESERVED_LAST
}

/// Returns `true` if `register` passes the write range check.
///
/// Only the reserved block and addresses above `FIFO_STATUS` are rejected;
/// read-only registers are left to the device to ignore.
pub const fn is_writable(register: u8) -> bool {
    register <= REG_FIFO_STATUS && !is_reserved(register)
}

/// Returns `true` if a burst may start at `register`.
pub const fn is_readable(register: u8) -> bool {
    register <= REG_FIFO_STATUS
}

/// Register layout written by the driver, tied to its address.
pub trait Register {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
}

macro_rules! byte_conversions {
    ($($register:ty),* $(,)?) => {
        $(
            impl From<u8> for $register {
                fn from(value: u8) -> Self {
                    Self::from_bytes([value])
                }
            }

            impl From<$register> for u8 {
                fn from(value: $register) -> Self {
                    value.into_bytes()[0]
                }
            }
        )*
    };
}

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate (bits 3:0).
    pub rate: OutputDataRate,
    // Reduced power operation (bit 4).
    pub low_power: bool,
    #[skip]
    __: B3,
}

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Reading frequency while asleep (bits 1:0).
    pub wakeup: B2,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement mode; standby when clear (bit 3).
    pub measure: bool,
    // Automatic sleep on inactivity (bit 4).
    pub auto_sleep: bool,
    // Link activity and inactivity detection (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

/// Bitfield representation of the `INT_ENABLE` register (address `0x2E`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupts {
    // FIFO overrun (bit 0).
    pub overrun: bool,
    // FIFO watermark reached (bit 1).
    pub watermark: bool,
    // Free fall (bit 2).
    pub free_fall: bool,
    // Inactivity (bit 3).
    pub inactivity: bool,
    // Activity (bit 4).
    pub activity: bool,
    // Double tap (bit 5).
    pub double_tap: bool,
    // Single tap (bit 6).
    pub single_tap: bool,
    // Data ready (bit 7).
    pub data_ready: bool,
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Measurement range (bits 1:0).
    pub range: Range,
    // Justification (bit 2).
    pub justify: Justify,
    // Full resolution (bit 3).
    pub resolution: Resolution,
    #[skip]
    __: B1,
    // Interrupt polarity (bit 5).
    pub polarity: InterruptPolarity,
    // 3- or 4-wire SPI (bit 6).
    pub wiring: SpiWiring,
    // Self-test force on the sensor (bit 7).
    pub self_test: bool,
}

/// Bitfield representation of the `FIFO_CTL` register (address `0x38`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoControl {
    // Watermark minus one in FIFO mode (bits 4:0).
    pub samples: B5,
    // Pin receiving trigger events (bit 5).
    pub trigger: InterruptPin,
    // FIFO operating mode (bits 7:6).
    pub mode: FifoMode,
}

byte_conversions!(BwRate, PowerControl, Interrupts, DataFormat, FifoControl);

impl Register for BwRate {
    const ADDRESS: u8 = REG_BW_RATE;
}

impl Register for PowerControl {
    const ADDRESS: u8 = REG_POWER_CTL;
}

impl Register for Interrupts {
    const ADDRESS: u8 = REG_INT_ENABLE;
}

impl Register for DataFormat {
    const ADDRESS: u8 = REG_DATA_FORMAT;
}

impl Register for FifoControl {
    const ADDRESS: u8 = REG_FIFO_CTL;
}

/// Register value ready to be written, paired with its address.
pub fn write_of<R>(value: R) -> (u8, u8)
where
    R: Register + Into<u8>,
{
    (R::ADDRESS, value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_format_layout_matches_datasheet() {
        let format = DataFormat::new()
            .with_range(Range::G16)
            .with_resolution(Resolution::Full)
            .with_polarity(InterruptPolarity::ActiveLow);

        assert_eq!(u8::from(format), 0x2B);
        assert_eq!(u8::from(format.with_self_test(true)), 0xAB);
    }

    #[test]
    fn fifo_control_packs_mode_and_watermark() {
        let control = FifoControl::new()
            .with_mode(FifoMode::Fifo)
            .with_trigger(InterruptPin::Int1)
            .with_samples(31);

        assert_eq!(u8::from(control), 0x5F);
        assert_eq!(FifoControl::from(0x5F).mode(), FifoMode::Fifo);
    }

    #[test]
    fn write_of_pairs_each_layout_with_its_address() {
        assert_eq!(write_of(Interrupts::new().with_watermark(true)), (REG_INT_ENABLE, 0x02));
        assert_eq!(write_of(PowerControl::new().with_measure(true)), (REG_POWER_CTL, 0x08));
        assert_eq!(
            write_of(BwRate::new().with_rate(OutputDataRate::Hz200)),
            (REG_BW_RATE, 0x0B)
        );
    }

    #[test]
    fn write_range_check_rejects_reserved_block_only() {
        assert!(is_writable(REG_DEVID));
        assert!(!is_reserved(REG_DEVID));
        assert!((REG_RESERVED_FIRST..=REG_RESERVED_LAST).all(|register| !is_writable(register)));
        assert!(is_writable(REG_FIFO_CTL));
        assert!(!is_writable(REG_FIFO_STATUS + 1));
        assert!(!is_readable(REG_FIFO_STATUS + 1));
    }
}

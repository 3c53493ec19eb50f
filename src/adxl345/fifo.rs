//! FIFO decoding and integration.

use embedded_hal::delay::DelayNs;

use super::registers::{is_readable, is_writable, REG_DATAX0, SPI_MULTIPLE, SPI_READ};
use crate::error::{Error, ErrorKind, Origin, Result, ResultExt, Severity};
use crate::interface::spi::SpiInterface;
use crate::interface::SpiPeripheral;

/// Samples integrated per measurement; equals the FIFO watermark.
pub const FIFO_SAMPLES: usize = 32;
/// Right shift dividing the accumulated sum by [`FIFO_SAMPLES`].
pub const AVERAGING_SHIFT: u32 = 5;
/// Bytes spanning the X, Y and Z data registers.
pub const SAMPLE_BYTES: usize = 6;
/// Minimum spacing between two FIFO reads (datasheet, "Retrieving data from FIFO").
pub const INTER_SAMPLE_DELAY_US: u32 = 5;

const _: () = assert!(
    FIFO_SAMPLES.is_power_of_two() && (FIFO_SAMPLES >> AVERAGING_SHIFT) == 1,
    "AVERAGING_SHIFT must divide exactly by FIFO_SAMPLES"
);

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis, the gravity reference.
    Z,
}

/// One value per axis, in LSB (4 mg/LSB at full resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    /// X-axis value.
    pub x: i32,
    /// Y-axis value.
    pub y: i32,
    /// Z-axis value.
    pub z: i32,
}

impl AxisSample {
    /// All axes at zero.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a sample from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Decodes the six data registers (LSB first for each axis).
    pub fn from_raw(raw: &[u8; SAMPLE_BYTES]) -> Self {
        Self::new(
            two_complement([raw[0], raw[1]]).into(),
            two_complement([raw[2], raw[3]]).into(),
            two_complement([raw[4], raw[5]]).into(),
        )
    }

    /// Value of a single axis.
    pub const fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Per-axis difference `self - baseline`.
    pub const fn delta(&self, baseline: &Self) -> Self {
        Self::new(self.x - baseline.x, self.y - baseline.y, self.z - baseline.z)
    }

    fn accumulate(&mut self, other: &Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }

    /// Arithmetic shift keeps the sign: the result is the floor of the mean.
    fn averaged(&self) -> Self {
        Self::new(
            self.x >> AVERAGING_SHIFT,
            self.y >> AVERAGING_SHIFT,
            self.z >> AVERAGING_SHIFT,
        )
    }
}

/// Reassembles a two's complement value stored LSB first.
#[inline]
pub fn two_complement(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

/// Builds the command byte used to address registers over SPI.
fn command_byte(register: u8, is_read: bool) -> u8 {
    if is_read {
        SPI_READ | SPI_MULTIPLE | register
    } else {
        register
    }
}

/// Writes a single register after checking it against the reserved ranges.
pub fn write_register<SPI>(bus: &mut SpiInterface<'_, SPI>, register: u8, value: u8) -> Result<()>
where
    SPI: SpiPeripheral,
{
    if !is_writable(register) {
        return Err(Error::new(Origin::WriteRegister, 1, Severity::Warning, ErrorKind::Range));
    }

    bus.write(&[command_byte(register, false), value])
        .push(Origin::WriteRegister, 2)
}

/// Reads `buf.len()` consecutive registers starting at `first`.
pub fn read_registers<SPI>(bus: &mut SpiInterface<'_, SPI>, first: u8, buf: &mut [u8]) -> Result<()>
where
    SPI: SpiPeripheral,
{
    if buf.is_empty() {
        return Ok(());
    }

    if !is_readable(first) {
        return Err(Error::new(Origin::ReadRegisters, 1, Severity::Warning, ErrorKind::Range));
    }

    bus.read(command_byte(first, true), buf)
        .push(Origin::ReadRegisters, 2)
}

/// Pops [`FIFO_SAMPLES`] samples and returns their per-axis mean.
pub fn integrate<SPI, D>(bus: &mut SpiInterface<'_, SPI>, delay: &mut D) -> Result<AxisSample>
where
    SPI: SpiPeripheral,
    D: DelayNs,
{
    let mut sum = AxisSample::ZERO;
    let mut raw = [0u8; SAMPLE_BYTES];

    for _ in 0..FIFO_SAMPLES {
        read_registers(bus, REG_DATAX0, &mut raw).push(Origin::Integrate, 1)?;
        sum.accumulate(&AxisSample::from_raw(&raw));
        delay.delay_us(INTER_SAMPLE_DELAY_US);
    }

    Ok(sum.averaged())
}

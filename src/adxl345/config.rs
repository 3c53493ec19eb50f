//! Configuration primitives for the ADXL345 driver.
//!
//! The electrical setup (4-wire SPI, active-low interrupts, full resolution,
//! ±16 g) is fixed because the self-test windows are only valid for it. What
//! remains configurable is the output data rate and the protocol timeouts.

use super::fifo::FIFO_SAMPLES;
use super::params::{
    FifoMode, InterruptPin, InterruptPolarity, Justify, OutputDataRate, Range, Resolution,
    SpiWiring,
};
use super::registers::{write_of, BwRate, DataFormat, FifoControl, Interrupts, PowerControl};

/// Number of register writes performed by the `Configuring` state.
pub const INIT_SEQUENCE_LEN: usize = 6;

/// User-facing configuration for the ADXL345 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate selection.
    pub odr: OutputDataRate,
    /// Maximum wait for a watermark interrupt (and for the device identity).
    pub interrupt_timeout_ms: u16,
    /// Wait between enabling self-test and restarting acquisition.
    pub self_test_settle_ms: u16,
    /// Maximum duration of one SPI transaction.
    pub spi_timeout_ms: u16,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can actually run the state machine.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.interrupt_timeout_ms == 0 || self.self_test_settle_ms == 0 || self.spi_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.self_test_settle_ms >= self.interrupt_timeout_ms {
            return Err(ConfigError::SettleTooLong);
        }

        if self.odr.fill_time_ms(FIFO_SAMPLES as u32) >= u32::from(self.interrupt_timeout_ms) {
            return Err(ConfigError::WatermarkTooSlow);
        }

        Ok(())
    }

    /// `DATA_FORMAT` value, with or without the self-test force.
    pub fn data_format(&self, self_test: bool) -> DataFormat {
        DataFormat::new()
            .with_range(Range::G16)
            .with_justify(Justify::Right)
            .with_resolution(Resolution::Full)
            .with_polarity(InterruptPolarity::ActiveLow)
            .with_wiring(SpiWiring::FourWire)
            .with_self_test(self_test)
    }

    /// `FIFO_CTL` value for `mode`, watermark on INT1.
    ///
    /// Bypass mode is written as a plain zero so the FIFO is flushed.
    pub fn fifo_control(&self, mode: FifoMode) -> FifoControl {
        match mode {
            FifoMode::Bypass => FifoControl::new(),
            mode => FifoControl::new()
                .with_samples((FIFO_SAMPLES - 1) as u8)
                .with_trigger(InterruptPin::Int1)
                .with_mode(mode),
        }
    }

    /// Register/value pairs written at start-up, in the only valid order.
    ///
    /// The FIFO must be bypassed before being re-enabled to drop stale
    /// samples, and the interrupt enable comes last.
    pub fn init_sequence(&self) -> [(u8, u8); INIT_SEQUENCE_LEN] {
        [
            write_of(self.data_format(false)),
            write_of(BwRate::new().with_rate(self.odr).with_low_power(false)),
            write_of(self.fifo_control(FifoMode::Bypass)),
            write_of(self.fifo_control(FifoMode::Fifo)),
            write_of(PowerControl::new().with_measure(true)),
            write_of(Interrupts::new().with_watermark(true)),
        ]
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Overrides the watermark interrupt timeout.
    pub fn interrupt_timeout_ms(mut self, millis: u16) -> Self {
        self.config.interrupt_timeout_ms = millis;
        self
    }

    /// Overrides the self-test settle delay.
    pub fn self_test_settle_ms(mut self, millis: u16) -> Self {
        self.config.self_test_settle_ms = millis;
        self
    }

    /// Overrides the SPI transaction timeout.
    pub fn spi_timeout_ms(mut self, millis: u16) -> Self {
        self.config.spi_timeout_ms = millis;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odr: OutputDataRate::Hz200,
            interrupt_timeout_ms: 1_000,
            self_test_settle_ms: 25,
            spi_timeout_ms: 10,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timeout of zero would expire before the first poll.
    ZeroTimeout,
    /// The settle delay must be shorter than the interrupt timeout.
    SettleTooLong,
    /// The FIFO cannot reach its watermark before the interrupt timeout.
    WatermarkTooSlow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adxl345::registers::{
        REG_BW_RATE, REG_DATA_FORMAT, REG_FIFO_CTL, REG_INT_ENABLE, REG_POWER_CTL,
    };

    #[test]
    fn init_sequence_matches_documented_order() {
        let sequence = Config::default().init_sequence();

        assert_eq!(
            sequence,
            [
                (REG_DATA_FORMAT, 0x2B),
                (REG_BW_RATE, 0x0B),
                (REG_FIFO_CTL, 0x00),
                (REG_FIFO_CTL, 0x5F),
                (REG_POWER_CTL, 0x08),
                (REG_INT_ENABLE, 0x02),
            ]
        );
    }

    #[test]
    fn init_sequence_follows_the_configured_rate() {
        let config = Config::new().odr(OutputDataRate::Hz100).build();
        assert_eq!(config.init_sequence()[1], (REG_BW_RATE, 0x0A));
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = Config::new().spi_timeout_ms(0).build();
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn rejects_settle_longer_than_interrupt_timeout() {
        let config = Config::new()
            .interrupt_timeout_ms(20)
            .self_test_settle_ms(25)
            .build();
        assert_eq!(config.validate(), Err(ConfigError::SettleTooLong));
    }

    #[test]
    fn rejects_rates_too_slow_for_the_watermark() {
        // 32 samples at 25 Hz take 1280 ms.
        let config = Config::new().odr(OutputDataRate::Hz25).build();
        assert_eq!(config.validate(), Err(ConfigError::WatermarkTooSlow));

        let config = Config::new().odr(OutputDataRate::Hz50).build();
        assert_eq!(config.validate(), Ok(()));
    }
}

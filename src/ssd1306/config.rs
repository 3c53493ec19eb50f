//! Configuration primitives for the SSD1306 driver.
//!
//! The panel wiring (128×64, alternative COM pins, internal charge pump) is
//! fixed; contrast and the protocol timeouts are not.

use super::command::{
    AddressingMode, ChargePump, ClockDivide, ComPins, Command, MemoryMode, Opcode,
};

/// Number of commands sent by the `Configuring` state.
pub const INIT_SEQUENCE_LEN: usize = 8;

/// User-facing configuration for the SSD1306 display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Contrast, 0x00 to 0xFF.
    pub contrast: u8,
    /// Maximum duration of one command transaction.
    pub command_timeout_ms: u16,
    /// Maximum duration of one DMA frame transfer.
    pub transfer_timeout_ms: u16,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can actually run the state machine.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.command_timeout_ms == 0 || self.transfer_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Commands sent after reset, in order.
    ///
    /// Settings left at their reset value are not sent.
    pub fn init_sequence(&self) -> [Command; INIT_SEQUENCE_LEN] {
        let com_pins = ComPins::new()
            .with_fixed(ComPins::FIXED)
            .with_alternative(true)
            .with_remap(false);
        let addressing = MemoryMode::new().with_mode(AddressingMode::Horizontal);
        let clock = ClockDivide::new().with_ratio(0).with_frequency(8);
        let pump = ChargePump::new().with_enabled(true).with_fixed(true);

        [
            Command::new(Opcode::ComScanReversed),
            Command::with_parameter(Opcode::ComPins, com_pins.into_bytes()[0]),
            Command::new(Opcode::SegmentRemap),
            Command::with_parameter(Opcode::MemoryAddressing, addressing.into_bytes()[0]),
            Command::with_parameter(Opcode::Contrast, self.contrast),
            Command::with_parameter(Opcode::ClockDivide, clock.into_bytes()[0]),
            Command::with_parameter(Opcode::ChargePump, pump.into_bytes()[0]),
            Command::new(Opcode::DisplayOn),
        ]
    }
}

/// Builder for [`Config`].
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

    /// Sets the contrast sent during configuration.
    pub fn contrast(mut self, contrast: u8) -> Self {
        self.config.contrast = contrast;
        self
    }

    /// Sets the timeout of one command transaction, in milliseconds.
    pub fn command_timeout_ms(mut self, millis: u16) -> Self {
        self.config.command_timeout_ms = millis;
        self
    }

    /// Sets the timeout of one frame transfer, in milliseconds.
    pub fn transfer_timeout_ms(mut self, millis: u16) -> Self {
        self.config.transfer_timeout_ms = millis;
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
            contrast: 0xFF,
            command_timeout_ms: 10,
            transfer_timeout_ms: 10,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timeout of zero would expire before the first poll.
    ZeroTimeout,
}

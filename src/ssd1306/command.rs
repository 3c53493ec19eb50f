//! SSD1306 command set subset and parameter layouts.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Highest number of parameter bytes a single command accepts.
pub const MAX_PARAMETERS: usize = 6;

/// Opcodes used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    /// Memory addressing mode, one parameter.
    MemoryAddressing = 0x20,
    /// Column start and end addresses, two parameters.
    ColumnAddress = 0x21,
    /// Page start and end addresses, two parameters.
    PageAddress = 0x22,
    /// Contrast, one parameter.
    Contrast = 0x81,
    /// Charge pump setting, one parameter.
    ChargePump = 0x8D,
    /// Column 127 mapped to SEG0.
    SegmentRemap = 0xA1,
    /// Display on.
    DisplayOn = 0xAF,
    /// COM outputs scanned from COM[N-1] to COM0.
    ComScanReversed = 0xC8,
    /// Display clock divide ratio and oscillator frequency, one parameter.
    ClockDivide = 0xD5,
    /// COM pins hardware configuration, one parameter.
    ComPins = 0xDA,
}

/// GDDRAM addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum AddressingMode {
    /// Column pointer wraps to the next page.
    Horizontal = 0b00,
    /// Page pointer wraps to the next column.
    Vertical = 0b01,
    /// Column pointer wraps within the page.
    Page = 0b10,
}

/// Parameter of [`Opcode::MemoryAddressing`].
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryMode {
    // Addressing mode (bits 1:0).
    pub mode: AddressingMode,
    #[skip]
    __: B6,
}

/// Parameter of [`Opcode::ComPins`].
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComPins {
    // Must read 0b10 (bits 1:0).
    pub fixed: B2,
    #[skip]
    __: B2,
    // Alternative COM pin configuration (bit 4).
    pub alternative: bool,
    // COM left/right remap (bit 5).
    pub remap: bool,
    #[skip]
    __: B2,
}

/// Parameter of [`Opcode::ClockDivide`].
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDivide {
    // Divide ratio minus one (bits 3:0).
    pub ratio: B4,
    // Oscillator frequency step (bits 7:4).
    pub frequency: B4,
}

/// Parameter of [`Opcode::ChargePump`].
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargePump {
    #[skip]
    __: B2,
    // Pump enabled during display on (bit 2).
    pub enabled: bool,
    #[skip]
    __: B1,
    // Must be set (bit 4).
    pub fixed: bool,
    #[skip]
    __: B3,
}

impl ComPins {
    /// Value the `fixed` field must hold.
    pub const FIXED: u8 = 0b10;
}

/// Opcode followed by its parameter bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    opcode: Opcode,
    parameters: [u8; MAX_PARAMETERS],
    len: usize,
}

impl Command {
    /// Command without parameters.
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            parameters: [0; MAX_PARAMETERS],
            len: 0,
        }
    }

    /// Command with a single parameter byte.
    pub const fn with_parameter(opcode: Opcode, parameter: u8) -> Self {
        let mut parameters = [0; MAX_PARAMETERS];
        parameters[0] = parameter;
        Self {
            opcode,
            parameters,
            len: 1,
        }
    }

    /// Opcode sent first, in command mode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Parameter bytes following the opcode.
    pub fn parameters(&self) -> &[u8] {
        &self.parameters[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_layouts_match_datasheet() {
        let com_pins = ComPins::new()
            .with_fixed(ComPins::FIXED)
            .with_alternative(true);
        assert_eq!(com_pins.into_bytes(), [0x12]);

        let clock = ClockDivide::new().with_ratio(0).with_frequency(8);
        assert_eq!(clock.into_bytes(), [0x80]);

        let pump = ChargePump::new().with_enabled(true).with_fixed(true);
        assert_eq!(pump.into_bytes(), [0x14]);

        let mode = MemoryMode::new().with_mode(AddressingMode::Horizontal);
        assert_eq!(mode.into_bytes(), [0x00]);
    }

    #[test]
    fn command_exposes_only_its_parameters() {
        assert!(Command::new(Opcode::DisplayOn).parameters().is_empty());

        let contrast = Command::with_parameter(Opcode::Contrast, 0x7F);
        assert_eq!(contrast.opcode() as u8, 0x81);
        assert_eq!(contrast.parameters(), &[0x7F]);
    }
}

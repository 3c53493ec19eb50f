//! Non-blocking SSD1306 driver.
//!
//! Content is prepared in a [`FrameBuffer`] by one of the preparation calls,
//! then [`Ssd1306::update`] sends the address window with two short commands
//! and hands the bytes over to a DMA channel. Transfer failures are reported
//! but always bring the machine back to [`State::Idle`], so the next frame can
//! still go out.
//!
//! Preparation calls restage the buffer and restart the transfer sequence
//! whatever the current state. A transfer still in flight is stopped first,
//! so the DMA channel never reads bytes that are being rewritten. The rest of
//! that frame is lost: wait for [`Ssd1306::is_ready`] to avoid it.

pub mod bitmaps;
pub mod command;
pub mod config;
pub mod frame;

use embedded_hal::digital::OutputPin;

use crate::adxl345::Referential;
use crate::error::{Error, ErrorKind, Origin, Result, ResultExt, Severity};
use crate::interface::spi::SpiInterface;
use crate::interface::{DmaChannel, SpiPeripheral};
use crate::log::{debug, log_warn};
use crate::timer::{CountdownTimer, Timers};

use self::bitmaps::{
    ABSOLUTE_ICON, ARROWS, ARROWS_PAGES, ARROWS_WIDTH, GLYPHS, GLYPH_DEGREE, GLYPH_DOT, GLYPH_MINUS,
    GLYPH_PAGES, GLYPH_PLUS, GLYPH_WIDTH, HOLD_ICON, ICON_WIDTH, RELATIVE_ICON,
};
use self::command::{Opcode, MAX_PARAMETERS};
use self::config::Config;
use self::frame::{FrameBuffer, Region, LAST_COLUMN, LAST_PAGE, PAGES, WIDTH};

/// Highest angle magnitude that can be printed, in tenths of a degree.
pub const MAX_ANGLE_TENTHS: i16 = 900;
/// Characters printed per angle: sign, tens, units, dot, tenths, degree.
pub const ANGLE_CHARS: usize = 6;

const ANGLE_COLUMN: u8 = 40;
const ROLL_PAGE: u8 = 1;
const PITCH_PAGE: u8 = 5;
const ROLL_ANGLE: Region = Region::spanning(ANGLE_COLUMN, GLYPH_WIDTH * ANGLE_CHARS, ROLL_PAGE, GLYPH_PAGES);
const PITCH_ANGLE: Region = Region::spanning(ANGLE_COLUMN, GLYPH_WIDTH * ANGLE_CHARS, PITCH_PAGE, GLYPH_PAGES);

const REFERENTIAL_ICON: Region = Region::new(LAST_COLUMN + 1 - ICON_WIDTH as u8, LAST_COLUMN, LAST_PAGE, LAST_PAGE);
const HOLD: Region = Region::new(
    LAST_COLUMN + 1 - 2 * ICON_WIDTH as u8,
    LAST_COLUMN - ICON_WIDTH as u8,
    LAST_PAGE,
    LAST_PAGE,
);

const SEPARATOR: u8 = 0x03;
const SEPARATOR_PAGE: usize = 4;

const _: () = assert!(
    ARROWS_PAGES == PAGES && ARROWS_WIDTH < WIDTH,
    "arrows bitmap must span every page and leave room for the separator"
);

/// States of the display machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Resetting and configuring the controller.
    Configuring,
    /// Staged region waiting to be sent.
    SendingData,
    /// DMA transfer in flight.
    WaitingForTransferDone,
    /// Nothing to do.
    Idle,
}

/// Axis whose angle is printed; each one has its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationAxis {
    /// Upper line.
    Roll,
    /// Lower line.
    Pitch,
}

/// SSD1306 driver over SPI with a DMA channel feeding the data phase.
pub struct Ssd1306<'t, SPI, DMA, RST, DC> {
    bus: SpiInterface<'t, SPI>,
    dma: DMA,
    reset: RST,
    dc: DC,
    timer: &'t CountdownTimer,
    config: Config,
    state: State,
    frame: &'static mut FrameBuffer,
}

impl<'t, SPI, DMA, RST, DC> Ssd1306<'t, SPI, DMA, RST, DC> {
    /// Settings the driver was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns `true` when new content may be prepared.
    pub fn is_ready(&self) -> bool {
        self.state == State::Idle
    }

    /// Frame buffer with the region staged by the latest preparation call.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn enter(&mut self, state: State) {
        debug!("ssd1306: {} -> {}", self.state, state);
        self.state = state;
    }
}

impl<'t, SPI, DMA, RST, DC> Ssd1306<'t, SPI, DMA, RST, DC>
where
    SPI: SpiPeripheral,
    DMA: DmaChannel,
    RST: OutputPin,
    DC: OutputPin,
{
    /// Creates a driver in the [`State::Configuring`] state.
    ///
    /// `timers` is shared with the tick interrupt and must not be used by
    /// another driver. `frame` is the memory the DMA channel reads from; it
    /// is handed back by [`Ssd1306::release`] once the channel is stopped.
    pub fn new(
        mut spi: SPI,
        mut dma: DMA,
        reset: RST,
        dc: DC,
        frame: &'static mut FrameBuffer,
        timers: &'t Timers,
        config: Config,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|_| Error::new(Origin::ScreenInitialise, 1, Severity::Warning, ErrorKind::Range))?;

        spi.disable();
        dma.disable();

        Ok(Self {
            bus: SpiInterface::new(spi, &timers.bus, config.command_timeout_ms),
            dma,
            reset,
            dc,
            timer: &timers.state,
            config,
            state: State::Configuring,
            frame,
        })
    }

    /// Stops any transfer in flight and returns the peripherals and the frame buffer.
    pub fn release(mut self) -> (SPI, DMA, RST, DC, &'static mut FrameBuffer) {
        self.stop_transfer();
        (self.bus.release(), self.dma, self.reset, self.dc, self.frame)
    }

    /// Runs the current state once.
    pub fn update(&mut self) -> Result<()> {
        match self.state {
            State::Configuring => self.configuring(),
            State::SendingData => self.sending_data(),
            State::WaitingForTransferDone => self.waiting_for_transfer(),
            State::Idle => Ok(()),
        }
    }

    /// Sends `opcode` and up to [`MAX_PARAMETERS`] parameter bytes in command mode.
    pub fn send_command(&mut self, opcode: Opcode, parameters: &[u8]) -> Result<()> {
        if parameters.len() > MAX_PARAMETERS {
            return Err(Error::new(Origin::SendCommand, 1, Severity::Warning, ErrorKind::Range));
        }

        self.dc
            .set_low()
            .map_err(|_| Error::new(Origin::SendCommand, 3, Severity::Warning, ErrorKind::Pin))?;

        let mut bytes = [0u8; 1 + MAX_PARAMETERS];
        bytes[0] = opcode as u8;
        bytes[1..=parameters.len()].copy_from_slice(parameters);

        self.bus
            .write(&bytes[..=parameters.len()])
            .push(Origin::SendCommand, 2)
    }

    /// Stages the whole screen: blank, separator, arrows and absolute referential icon.
    pub fn draw_base_screen(&mut self) {
        self.stop_in_flight();
        let buffer = self.frame.stage(Region::FULL);
        buffer.fill(0x00);

        let separator = SEPARATOR_PAGE * WIDTH;
        buffer[separator + ARROWS_WIDTH..separator + WIDTH].fill(SEPARATOR);

        for (page, row) in ARROWS.chunks_exact(ARROWS_WIDTH).enumerate() {
            let start = page * WIDTH;
            buffer[start..start + ARROWS_WIDTH].copy_from_slice(row);
        }

        let icon = usize::from(LAST_PAGE) * WIDTH + WIDTH - ICON_WIDTH;
        buffer[icon..].copy_from_slice(&ABSOLUTE_ICON);

        self.enter(State::SendingData);
    }

    /// Stages `angle_tenths` on the line of `axis`, clamped to ±90.0°.
    pub fn print_angle_tenths(&mut self, angle_tenths: i16, axis: RotationAxis) {
        let glyphs = angle_glyphs(angle_tenths);
        let region = match axis {
            RotationAxis::Roll => ROLL_ANGLE,
            RotationAxis::Pitch => PITCH_ANGLE,
        };

        self.stop_in_flight();
        let buffer = self.frame.stage(region);
        for (page, line) in buffer.chunks_exact_mut(region.width()).enumerate() {
            let columns = page * GLYPH_WIDTH..(page + 1) * GLYPH_WIDTH;
            for (cell, glyph) in line.chunks_exact_mut(GLYPH_WIDTH).zip(glyphs) {
                cell.copy_from_slice(&GLYPHS[glyph][columns.clone()]);
            }
        }

        self.enter(State::SendingData);
    }

    /// Stages the icon of `referential`.
    pub fn print_referential_icon(&mut self, referential: Referential) {
        let icon = match referential {
            Referential::Absolute => &ABSOLUTE_ICON,
            Referential::Relative => &RELATIVE_ICON,
        };

        self.stop_in_flight();
        self.frame.stage(REFERENTIAL_ICON).copy_from_slice(icon);
        self.enter(State::SendingData);
    }

    /// Stages the hold icon, or blanks its area.
    pub fn print_hold_icon(&mut self, shown: bool) {
        self.stop_in_flight();
        let buffer = self.frame.stage(HOLD);
        if shown {
            buffer.copy_from_slice(&HOLD_ICON);
        } else {
            buffer.fill(0x00);
        }

        self.enter(State::SendingData);
    }

    // ==================================================================
    // == States =========================================================
    // ==================================================================
    /// Failures leave the machine here so the whole sequence is retried.
    fn configuring(&mut self) -> Result<()> {
        let pin_error = |_| Error::new(Origin::ScreenConfiguring, 2, Severity::Warning, ErrorKind::Pin);
        self.reset.set_low().map_err(pin_error)?;
        self.reset.set_high().map_err(pin_error)?;

        for command in self.config.init_sequence() {
            self.send_command(command.opcode(), command.parameters())
                .push(Origin::ScreenConfiguring, 1)?;
        }

        self.draw_base_screen();
        Ok(())
    }

    fn sending_data(&mut self) -> Result<()> {
        let result = self.start_transfer();
        if let Err(failure) = result {
            log_warn!("display transfer not started: {}", failure);
            self.enter(State::Idle);
        }
        result
    }

    fn start_transfer(&mut self) -> Result<()> {
        let region = self.frame.region();
        self.send_command(Opcode::ColumnAddress, &region.columns())
            .push(Origin::SendingData, 1)?;
        self.send_command(Opcode::PageAddress, &region.pages())
            .push(Origin::SendingData, 2)?;

        self.dc
            .set_high()
            .map_err(|_| Error::new(Origin::SendingData, 3, Severity::Warning, ErrorKind::Pin))?;
        self.bus.spi_mut().enable();

        self.dma.disable();
        self.dma.clear_flags();
        // SAFETY: the frame buffer is `'static` and only reachable through
        // `self`. Every path that rewrites it or gives it back calls
        // `stop_transfer` first.
        unsafe { self.dma.set_source(self.frame.staged()) };
        self.dma.enable();

        self.timer.arm(self.config.transfer_timeout_ms);
        self.bus.spi_mut().enable_tx_dma();

        self.enter(State::WaitingForTransferDone);
        Ok(())
    }

    fn waiting_for_transfer(&mut self) -> Result<()> {
        let result = if self.dma.has_error() {
            Err(Error::new(Origin::WaitingForTransfer, 2, Severity::Error, ErrorKind::Transfer))
        } else if self.timer.is_expired() {
            Err(Error::new(Origin::WaitingForTransfer, 1, Severity::Error, ErrorKind::Timeout))
        } else if self.dma.is_complete() {
            Ok(())
        } else {
            return Ok(());
        };

        self.stop_transfer();

        if let Err(failure) = result {
            log_warn!("display transfer failed: {}", failure);
        }
        self.enter(State::Idle);
        result
    }

    fn stop_in_flight(&mut self) {
        if self.state == State::WaitingForTransferDone {
            debug!("ssd1306: transfer cut short by new content");
            self.stop_transfer();
        }
    }

    fn stop_transfer(&mut self) {
        self.dma.disable();
        let spi = self.bus.spi_mut();
        spi.disable_tx_dma();
        spi.disable();
    }
}

/// Glyph indices printing `angle_tenths` once clamped.
fn angle_glyphs(angle_tenths: i16) -> [usize; ANGLE_CHARS] {
    let clamped = angle_tenths.clamp(-MAX_ANGLE_TENTHS, MAX_ANGLE_TENTHS);
    let sign = if clamped < 0 { GLYPH_MINUS } else { GLYPH_PLUS };
    let magnitude = usize::from(clamped.unsigned_abs());

    [
        sign,
        magnitude / 100,
        magnitude / 10 % 10,
        GLYPH_DOT,
        magnitude % 10,
        GLYPH_DEGREE,
    ]
}

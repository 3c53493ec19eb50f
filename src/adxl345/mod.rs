//! Non-blocking ADXL345 driver.
//!
//! The driver is a state machine advanced by [`Adxl345::update`], one state per
//! call. It identifies the device, configures it, runs the two-phase
//! self-test and then keeps integrating the FIFO every time the watermark
//! interrupt fires. Any failure parks the machine in [`State::Error`] for good.

pub mod config;
pub mod fifo;
pub mod params;
pub mod registers;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::error::{Error, ErrorKind, Origin, Result, ResultExt, Severity};
use crate::interface::spi::SpiInterface;
use crate::interface::SpiPeripheral;
use crate::log::{debug, error, trace};
use crate::timer::{CountdownTimer, Timers};

use self::config::Config;
use self::fifo::{integrate, read_registers, write_register};
use self::params::FifoMode;
use self::registers::{EXPECTED_DEVICE_ID, REG_DATA_FORMAT, REG_DEVID, REG_FIFO_CTL};
use self::self_test::{SelfTestReport, WINDOWS_FULL_RES_16G_3V3};

pub use self::fifo::{Axis, AxisSample};

const RADIANS_TO_DEGREE_TENTHS: f32 = 1_800.0 / core::f32::consts::PI;

/// States of the acquisition machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for the device identity.
    Startup,
    /// Writing the configuration registers.
    Configuring,
    /// Acquiring the self-test baseline.
    MeasuringSelfTestOff,
    /// Letting the self-test force settle.
    WaitingForSelfTestEnabled,
    /// Acquiring with the self-test force applied.
    MeasuringSelfTestOn,
    /// Continuous measurement.
    Measuring,
    /// Terminal state after an unrecoverable failure.
    Error,
}

/// Whether angles are reported against gravity or against a zeroed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Referential {
    /// No offset applied.
    Absolute,
    /// X/Y offset captured by [`Adxl345::zero_down`].
    Relative,
}

/// ADXL345 driver owning its bus, watermark line and delay provider.
pub struct Adxl345<'t, SPI, INT, D> {
    bus: SpiInterface<'t, SPI>,
    int1: INT,
    delay: D,
    timer: &'t CountdownTimer,
    config: Config,
    state: State,
    latest: AxisSample,
    previous: AxisSample,
    offset: AxisSample,
    baseline: AxisSample,
    self_test: Option<SelfTestReport>,
    updated: bool,
    referential: Referential,
}

impl<'t, SPI, INT, D> Adxl345<'t, SPI, INT, D> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Consumes the driver and returns the owned peripherals.
    pub fn release(self) -> (SPI, INT, D) {
        (self.bus.release(), self.int1, self.delay)
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================================================================
    // == Measurements & Queries ========================================
    // ==================================================================
    /// Current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns `true` once the machine reached its terminal error state.
    pub fn is_failed(&self) -> bool {
        self.state == State::Error
    }

    /// Latest integrated measurement, without zero offset.
    pub fn latest(&self) -> AxisSample {
        self.latest
    }

    /// Measurement acquired with self-test off.
    pub fn baseline(&self) -> AxisSample {
        self.baseline
    }

    /// Result of the self-test, once it ran.
    pub fn self_test_report(&self) -> Option<SelfTestReport> {
        self.self_test
    }

    /// Returns and clears the "new measurement integrated" flag.
    pub fn has_new_measurements(&mut self) -> bool {
        core::mem::take(&mut self.updated)
    }

    /// Compares the live value of `axis` with the one seen at the previous call.
    ///
    /// The previous value is updated as a side effect: calling this twice
    /// without a new measurement in between returns `false` the second time.
    pub fn has_changed(&mut self, axis: Axis) -> bool {
        let changed = self.latest.get(axis) != self.previous.get(axis);
        match axis {
            Axis::X => self.previous.x = self.latest.x,
            Axis::Y => self.previous.y = self.latest.y,
            Axis::Z => self.previous.z = self.latest.z,
        }
        changed
    }

    /// Angle between `axis` and Z, in tenths of a degree.
    ///
    /// Returns 0 while Z reads exactly zero.
    pub fn angle_tenths(&self, axis: Axis) -> i16 {
        angle_tenths(&self.latest, &self.offset, axis)
    }

    /// Switches to relative mode: the current X/Y position becomes zero.
    pub fn zero_down(&mut self) {
        self.offset.x = -self.latest.x;
        self.offset.y = -self.latest.y;
        self.referential = Referential::Relative;
    }

    /// Switches back to absolute mode.
    pub fn cancel_zeroing(&mut self) {
        self.offset = AxisSample::ZERO;
        self.referential = Referential::Absolute;
    }

    /// Active referential.
    pub fn referential(&self) -> Referential {
        self.referential
    }
}

impl<'t, SPI, INT, D> Adxl345<'t, SPI, INT, D>
where
    SPI: SpiPeripheral,
    INT: InputPin,
    D: DelayNs,
{
    /// Creates a driver in the [`State::Startup`] state.
    ///
    /// `timers` is shared with the tick interrupt; the identity must be read
    /// before the interrupt timeout elapses.
    pub fn new(mut spi: SPI, int1: INT, delay: D, timers: &'t Timers, config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|_| Error::new(Origin::AdxlInitialise, 1, Severity::Warning, ErrorKind::Range))?;

        spi.disable();
        timers.state.arm(config.interrupt_timeout_ms);

        Ok(Self {
            bus: SpiInterface::new(spi, &timers.bus, config.spi_timeout_ms),
            int1,
            delay,
            timer: &timers.state,
            config,
            state: State::Startup,
            latest: AxisSample::ZERO,
            previous: AxisSample::ZERO,
            offset: AxisSample::ZERO,
            baseline: AxisSample::ZERO,
            self_test: None,
            updated: false,
            referential: Referential::Absolute,
        })
    }

    /// Runs the current state once.
    ///
    /// Any error moves the machine to [`State::Error`] and is returned with at
    /// least [`Severity::Error`].
    pub fn update(&mut self) -> Result<()> {
        let result = match self.state {
            State::Startup => self.startup(),
            State::Configuring => self.configuring(),
            State::MeasuringSelfTestOff => self.measuring_self_test_off(),
            State::WaitingForSelfTestEnabled => self.waiting_for_self_test(),
            State::MeasuringSelfTestOn => self.measuring_self_test_on(),
            State::Measuring => self.measuring(),
            State::Error => Ok(()),
        };

        if let Err(failure) = result {
            error!("adxl345 failed in {}: {}", self.state, failure);
            self.state = State::Error;
        }

        result.escalate(Severity::Error)
    }

    // ==================================================================
    // == States =========================================================
    // ==================================================================
    fn startup(&mut self) -> Result<()> {
        if self.timer.is_expired() {
            return Err(Error::new(Origin::Startup, 1, Severity::Critical, ErrorKind::Timeout));
        }

        let mut id = [0u8; 1];
        read_registers(&mut self.bus, REG_DEVID, &mut id).push(Origin::Startup, 2)?;

        if id[0] != EXPECTED_DEVICE_ID {
            trace!("unexpected device id {=u8:#x}", id[0]);
            return Ok(());
        }

        self.enter(State::Configuring);
        Ok(())
    }

    fn configuring(&mut self) -> Result<()> {
        for (register, value) in self.config.init_sequence() {
            write_register(&mut self.bus, register, value).push(Origin::AdxlConfiguring, 1)?;
        }

        self.timer.arm(self.config.interrupt_timeout_ms);
        self.enter(State::MeasuringSelfTestOff);
        Ok(())
    }

    fn measuring_self_test_off(&mut self) -> Result<()> {
        if self.timer.is_expired() {
            return Err(Error::new(Origin::SelfTestOff, 1, Severity::Error, ErrorKind::Timeout));
        }

        if !self.watermark_reached().push(Origin::SelfTestOff, 5)? {
            return Ok(());
        }

        self.baseline = integrate(&mut self.bus, &mut self.delay).push(Origin::SelfTestOff, 2)?;

        let self_test_on: u8 = self.config.data_format(true).into();
        write_register(&mut self.bus, REG_DATA_FORMAT, self_test_on).push(Origin::SelfTestOff, 3)?;

        let bypass: u8 = self.config.fifo_control(FifoMode::Bypass).into();
        write_register(&mut self.bus, REG_FIFO_CTL, bypass).push(Origin::SelfTestOff, 4)?;

        self.timer.arm(self.config.self_test_settle_ms);
        self.enter(State::WaitingForSelfTestEnabled);
        Ok(())
    }

    fn waiting_for_self_test(&mut self) -> Result<()> {
        if !self.timer.is_expired() {
            return Ok(());
        }

        let fifo: u8 = self.config.fifo_control(FifoMode::Fifo).into();
        write_register(&mut self.bus, REG_FIFO_CTL, fifo).push(Origin::SelfTestWait, 1)?;

        self.timer.arm(self.config.interrupt_timeout_ms);
        self.enter(State::MeasuringSelfTestOn);
        Ok(())
    }

    fn measuring_self_test_on(&mut self) -> Result<()> {
        if self.timer.is_expired() {
            return Err(Error::new(Origin::SelfTestOn, 1, Severity::Error, ErrorKind::Timeout));
        }

        if !self.watermark_reached().push(Origin::SelfTestOn, 5)? {
            return Ok(());
        }

        let deflected = integrate(&mut self.bus, &mut self.delay).push(Origin::SelfTestOn, 2)?;
        let report = SelfTestReport::evaluate(self.baseline, deflected, &WINDOWS_FULL_RES_16G_3V3);
        self.self_test = Some(report);

        if let Some(axis) = report.failed_axis {
            debug!("self-test delta out of window on {}: {}", axis, report.delta);
            return Err(Error::new(Origin::SelfTestOn, 3, Severity::Error, ErrorKind::Device));
        }

        let self_test_off: u8 = self.config.data_format(false).into();
        write_register(&mut self.bus, REG_DATA_FORMAT, self_test_off).push(Origin::SelfTestOn, 4)?;

        self.timer.arm(self.config.interrupt_timeout_ms);
        self.enter(State::Measuring);
        Ok(())
    }

    fn measuring(&mut self) -> Result<()> {
        if self.timer.is_expired() {
            return Err(Error::new(Origin::Measuring, 1, Severity::Error, ErrorKind::Timeout));
        }

        if !self.watermark_reached().push(Origin::Measuring, 5)? {
            return Ok(());
        }

        self.timer.arm(self.config.interrupt_timeout_ms);
        self.latest = integrate(&mut self.bus, &mut self.delay).push(Origin::Measuring, 2)?;
        self.updated = true;
        Ok(())
    }

    // ==================================================================
    // == Internal Helpers ===============================================
    // ==================================================================
    /// The watermark interrupt is active low.
    fn watermark_reached(&mut self) -> Result<bool> {
        self.int1
            .is_low()
            .map_err(|_| Error::new(Origin::Watermark, 1, Severity::Warning, ErrorKind::Pin))
    }

    fn enter(&mut self, state: State) {
        debug!("adxl345: {} -> {}", self.state, state);
        self.state = state;
    }
}

/// Angle between `axis` (offset applied) and Z, in tenths of a degree.
fn angle_tenths(latest: &AxisSample, offset: &AxisSample, axis: Axis) -> i16 {
    if latest.z == 0 {
        return 0;
    }

    let ratio = (latest.get(axis) + offset.get(axis)) as f32 / latest.z as f32;
    (libm::atanf(ratio) * RADIANS_TO_DEGREE_TENTHS) as i16
}

//! Timed SPI transactions.
//!
//! Both primitives busy-wait on the peripheral flags, but every wait also
//! watches the bus [`CountdownTimer`]: the worst case latency is the configured
//! timeout, never unbounded.

use crate::error::{Error, ErrorKind, Origin, Result, Severity};
use crate::interface::SpiPeripheral;
use crate::log::log_warn;
use crate::timer::CountdownTimer;

/// Byte clocked out to keep SCLK running while receiving.
pub const RX_FILLER: u8 = 0xFF;

/// SPI peripheral paired with the countdown guarding its transactions.
pub struct SpiInterface<'t, SPI> {
    spi: SPI,
    timer: &'t CountdownTimer,
    timeout_ms: u16,
}

impl<'t, SPI> SpiInterface<'t, SPI> {
    /// Creates a new interface; each transaction may last at most `timeout_ms`.
    pub const fn new(spi: SPI, timer: &'t CountdownTimer, timeout_ms: u16) -> Self {
        Self {
            spi,
            timer,
            timeout_ms,
        }
    }

    /// Provides mutable access to the wrapped peripheral.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned peripheral.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<'t, SPI> SpiInterface<'t, SPI>
where
    SPI: SpiPeripheral,
{
    /// Transmits `bytes` in one chip-select window.
    ///
    /// Writing nothing is a no-op success.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let Some((first, rest)) = bytes.split_first() else {
            return Ok(());
        };

        self.timer.arm(self.timeout_ms);
        self.spi.enable();
        self.spi.transmit(*first);

        for byte in rest {
            if !self.wait_until(|spi| spi.is_tx_empty()) {
                break;
            }
            self.spi.transmit(*byte);
        }

        self.finish(Origin::SpiWrite)
    }

    /// Sends `command`, drops the byte clocked in with it, then fills `buf`.
    ///
    /// Reading nothing is a no-op success. The burst stops early if the
    /// countdown expires.
    pub fn read(&mut self, command: u8, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }

        self.timer.arm(self.timeout_ms);
        self.spi.enable();

        self.spi.transmit(command);
        if self.wait_until(|spi| spi.is_rx_not_empty()) {
            let _ = self.spi.receive();
        }

        for slot in buf.iter_mut() {
            if self.timer.is_expired() {
                break;
            }

            self.spi.transmit(RX_FILLER);
            if !self.wait_until(|spi| spi.is_rx_not_empty()) {
                break;
            }
            *slot = self.spi.receive();
        }

        self.finish(Origin::SpiRead)
    }

    /// Spins until `ready` holds; returns `false` if the countdown expired first.
    fn wait_until<F>(&mut self, mut ready: F) -> bool
    where
        F: FnMut(&mut SPI) -> bool,
    {
        loop {
            if ready(&mut self.spi) {
                return true;
            }
            if self.timer.is_expired() {
                return false;
            }
        }
    }

    fn finish(&mut self, origin: Origin) -> Result<()> {
        self.wait_until(|spi| !spi.is_busy());
        self.spi.clear_overrun();
        self.spi.disable();

        if self.timer.is_expired() {
            log_warn!("spi transaction timed out ({})", origin);
            return Err(Error::new(origin, 1, Severity::Warning, ErrorKind::Timeout));
        }

        Ok(())
    }
}

//! Peripheral collaborators consumed by the drivers.
//!
//! These traits sit at register level: the drivers poll the flags themselves,
//! each wait bounded by a [`CountdownTimer`](crate::timer::CountdownTimer).

pub mod spi;

/// Full-duplex, byte-oriented SPI peripheral with hardware chip select.
pub trait SpiPeripheral {
    /// Enables the peripheral, asserting the device selection line.
    fn enable(&mut self);

    /// Disables the peripheral, releasing the device selection line.
    fn disable(&mut self);

    /// Writes one byte to the transmit register.
    fn transmit(&mut self, byte: u8);

    /// Reads one byte from the receive register.
    fn receive(&mut self) -> u8;

    /// Transmit buffer empty flag.
    fn is_tx_empty(&mut self) -> bool;

    /// Receive buffer not empty flag.
    fn is_rx_not_empty(&mut self) -> bool;

    /// Busy flag.
    fn is_busy(&mut self) -> bool;

    /// Clears a pending overrun condition.
    fn clear_overrun(&mut self);

    /// Lets a DMA channel feed the transmit register.
    fn enable_tx_dma(&mut self) {}

    /// Stops DMA requests on the transmit register.
    fn disable_tx_dma(&mut self) {}
}

/// Memory-to-peripheral DMA channel whose destination is the SPI data register.
pub trait DmaChannel {
    /// Disables the channel.
    fn disable(&mut self);

    /// Enables the channel, starting the transfer once the peripheral requests data.
    fn enable(&mut self);

    /// Clears the completion and error flags.
    fn clear_flags(&mut self);

    /// Programs the source address and the transfer length.
    ///
    /// # Safety
    ///
    /// The channel keeps reading from `source` after this returns, outside of
    /// the borrow. Until the channel is disabled the caller must keep the
    /// memory alive and must not write to it.
    unsafe fn set_source(&mut self, source: &[u8]);

    /// Transfer complete flag.
    fn is_complete(&mut self) -> bool;

    /// Transfer error flag.
    fn has_error(&mut self) -> bool;
}

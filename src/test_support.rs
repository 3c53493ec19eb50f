//! Flag-level peripheral mocks shared by the unit tests.

use core::cell::RefCell;
use std::boxed::Box;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::interface::{DmaChannel, SpiPeripheral};
use crate::ssd1306::frame::FrameBuffer;
use crate::timer::Timers;

/// Hands out timers that outlive the driver under test.
pub fn leak_timers() -> &'static Timers {
    Box::leak(Box::new(Timers::new()))
}

/// Hands out a frame buffer that outlives the driver under test.
pub fn leak_frame() -> &'static mut FrameBuffer {
    Box::leak(Box::new(FrameBuffer::new()))
}

#[derive(Default)]
struct Bus {
    enabled: bool,
    enable_count: usize,
    frames: Vec<Vec<u8>>,
    responses: VecDeque<u8>,
    pending: Option<u8>,
    overrun: bool,
    transmitted: usize,
    stall: Option<(usize, &'static Timers)>,
    dma_requests: bool,
}

impl Bus {
    /// Once stalled every flag reports a stuck bus and each poll burns one millisecond.
    fn stalled(&self) -> bool {
        match self.stall {
            Some((after, timers)) if self.transmitted >= after => {
                timers.tick();
                true
            }
            _ => false,
        }
    }
}

/// SPI peripheral recording every chip-select window.
///
/// Bytes clocked in answer to a filler are popped from the scripted
/// responses, but only inside windows opened with a read opcode (MSB set);
/// everything else reads back as zero.
#[derive(Clone, Default)]
pub struct MockSpi {
    bus: Rc<RefCell<Bus>>,
}

impl MockSpi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes returned by subsequent read bursts.
    pub fn respond(&self, bytes: &[u8]) {
        self.bus.borrow_mut().responses.extend(bytes.iter().copied());
    }

    /// Freezes the bus once `transmitted` bytes went out.
    pub fn stall_after(&self, transmitted: usize, timers: &'static Timers) {
        self.bus.borrow_mut().stall = Some((transmitted, timers));
    }

    /// Non-empty chip-select windows, oldest first.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.bus
            .borrow()
            .frames
            .iter()
            .filter(|frame| !frame.is_empty())
            .cloned()
            .collect()
    }

    pub fn clear_frames(&self) {
        self.bus.borrow_mut().frames.clear();
    }

    pub fn enable_count(&self) -> usize {
        self.bus.borrow().enable_count
    }

    pub fn is_enabled(&self) -> bool {
        self.bus.borrow().enabled
    }

    pub fn overrun_pending(&self) -> bool {
        self.bus.borrow().overrun
    }

    pub fn dma_requests(&self) -> bool {
        self.bus.borrow().dma_requests
    }

    pub fn pending_responses(&self) -> usize {
        self.bus.borrow().responses.len()
    }

    /// Bytes clocked out since creation.
    pub fn transmitted(&self) -> usize {
        self.bus.borrow().transmitted
    }
}

impl SpiPeripheral for MockSpi {
    fn enable(&mut self) {
        let mut bus = self.bus.borrow_mut();
        bus.enabled = true;
        bus.enable_count += 1;
        bus.frames.push(Vec::new());
    }

    fn disable(&mut self) {
        self.bus.borrow_mut().enabled = false;
    }

    fn transmit(&mut self, byte: u8) {
        let mut bus = self.bus.borrow_mut();
        assert!(bus.enabled, "transmit while the peripheral is disabled");

        let frame = bus.frames.last_mut().expect("no chip-select window");
        frame.push(byte);
        let is_read_window = frame.len() > 1 && frame[0] & 0x80 != 0;

        let response = if is_read_window {
            bus.responses.pop_front().unwrap_or(0)
        } else {
            0
        };

        if bus.pending.replace(response).is_some() {
            bus.overrun = true;
        }
        bus.transmitted += 1;
    }

    fn receive(&mut self) -> u8 {
        self.bus.borrow_mut().pending.take().unwrap_or(0)
    }

    fn is_tx_empty(&mut self) -> bool {
        !self.bus.borrow().stalled()
    }

    fn is_rx_not_empty(&mut self) -> bool {
        let bus = self.bus.borrow();
        !bus.stalled() && bus.pending.is_some()
    }

    fn is_busy(&mut self) -> bool {
        self.bus.borrow().stalled()
    }

    fn clear_overrun(&mut self) {
        let mut bus = self.bus.borrow_mut();
        bus.overrun = false;
        bus.pending = None;
    }

    fn enable_tx_dma(&mut self) {
        self.bus.borrow_mut().dma_requests = true;
    }

    fn disable_tx_dma(&mut self) {
        self.bus.borrow_mut().dma_requests = false;
    }
}

#[derive(Default)]
struct Channel {
    enabled: bool,
    source: Vec<u8>,
    transfers: usize,
    complete: bool,
    error: bool,
}

/// DMA channel capturing the programmed source; completion is driven by the test.
#[derive(Clone, Default)]
pub struct MockDma {
    channel: Rc<RefCell<Channel>>,
}

impl MockDma {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&self) {
        self.channel.borrow_mut().complete = true;
    }

    pub fn fail(&self) {
        self.channel.borrow_mut().error = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.channel.borrow().enabled
    }

    /// Bytes programmed for the latest transfer.
    pub fn source(&self) -> Vec<u8> {
        self.channel.borrow().source.clone()
    }

    pub fn transfers(&self) -> usize {
        self.channel.borrow().transfers
    }
}

impl DmaChannel for MockDma {
    fn disable(&mut self) {
        self.channel.borrow_mut().enabled = false;
    }

    fn enable(&mut self) {
        let mut channel = self.channel.borrow_mut();
        channel.enabled = true;
        channel.transfers += 1;
    }

    fn clear_flags(&mut self) {
        let mut channel = self.channel.borrow_mut();
        channel.complete = false;
        channel.error = false;
    }

    unsafe fn set_source(&mut self, source: &[u8]) {
        self.channel.borrow_mut().source = source.to_vec();
    }

    fn is_complete(&mut self) -> bool {
        self.channel.borrow().complete
    }

    fn has_error(&mut self) -> bool {
        self.channel.borrow().error
    }
}

/// Pin whose input level is set by the test and whose output history is recorded.
#[derive(Clone, Default)]
pub struct MockPin {
    level: Rc<RefCell<bool>>,
    history: Rc<RefCell<Vec<bool>>>,
    broken: Rc<RefCell<bool>>,
}

impl MockPin {
    /// Starts high, matching an idle active-low interrupt line.
    pub fn new() -> Self {
        let pin = Self::default();
        pin.set_level(true);
        pin
    }

    pub fn set_level(&self, high: bool) {
        *self.level.borrow_mut() = high;
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }

    /// Every later read or write fails.
    pub fn break_down(&self) {
        *self.broken.borrow_mut() = true;
    }

    fn check(&self) -> Result<(), ErrorKind> {
        if *self.broken.borrow() {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(*self.level.borrow())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(!*self.level.borrow())
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.set_level(false);
        self.history.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.set_level(true);
        self.history.borrow_mut().push(true);
        Ok(())
    }
}

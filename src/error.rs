//! Error code model shared by both drivers.
//!
//! A failure carries the function that detected it, a small detail code
//! distinguishing the failure site inside that function, a [`Severity`] and an
//! [`ErrorKind`]. Callers add their own context with [`Error::push`], which
//! keeps the deepest origin and records each layer in a bounded trace.
//! Success is simply `Ok(_)`, so `Result::is_err` is the only test driver
//! logic ever performs.

/// Crate-wide result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Maximum number of layers recorded on top of the root frame.
pub const TRACE_DEPTH: usize = 4;

/// How bad a failure is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Recoverable at the call site, e.g. by trying again on the next cycle.
    Warning,
    /// Unrecoverable for the current state machine run.
    Error,
    /// The device never became usable.
    Critical,
}

/// Failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Register number or parameter outside of the accepted range.
    Range,
    /// Bus transaction or protocol-level countdown reached zero.
    Timeout,
    /// The device reported something unexpected (identity, self-test delta).
    Device,
    /// The DMA controller flagged a transfer error.
    Transfer,
    /// A GPIO collaborator refused to be read or driven.
    Pin,
}

/// Identifier of the function reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Origin {
    /// Timed SPI write.
    SpiWrite,
    /// Timed SPI burst read.
    SpiRead,
    /// `Adxl345::new`.
    AdxlInitialise,
    /// ADXL345 `Startup` state.
    Startup,
    /// ADXL345 `Configuring` state.
    AdxlConfiguring,
    /// ADXL345 `MeasuringSelfTestOff` state.
    SelfTestOff,
    /// ADXL345 `WaitingForSelfTestEnabled` state.
    SelfTestWait,
    /// ADXL345 `MeasuringSelfTestOn` state.
    SelfTestOn,
    /// ADXL345 `Measuring` state.
    Measuring,
    /// ADXL345 single register write.
    WriteRegister,
    /// ADXL345 register burst read.
    ReadRegisters,
    /// ADXL345 FIFO integration.
    Integrate,
    /// ADXL345 watermark interrupt line poll.
    Watermark,
    /// `Ssd1306::new`.
    ScreenInitialise,
    /// SSD1306 `Configuring` state.
    ScreenConfiguring,
    /// SSD1306 command transmission.
    SendCommand,
    /// SSD1306 `SendingData` state.
    SendingData,
    /// SSD1306 `WaitingForTransferDone` state.
    WaitingForTransfer,
}

/// One origin/detail pair of an error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Reporting function.
    pub origin: Origin,
    /// Failure site within that function.
    pub detail: u8,
}

/// A failure, possibly chained through several layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Error {
    root: Frame,
    layers: [Option<Frame>; TRACE_DEPTH],
    severity: Severity,
    kind: ErrorKind,
}

impl Error {
    /// Creates an error at the point the failure is first detected.
    pub const fn new(origin: Origin, detail: u8, severity: Severity, kind: ErrorKind) -> Self {
        Self {
            root: Frame { origin, detail },
            layers: [None; TRACE_DEPTH],
            severity,
            kind,
        }
    }

    /// Adds the caller's context on top of this error.
    ///
    /// The new origin becomes [`origin`](Self::origin), the severity and kind
    /// are kept, and the root frame is never lost. When the trace is full the
    /// oldest intermediate layer is dropped.
    #[must_use]
    pub fn push(mut self, origin: Origin, detail: u8) -> Self {
        let frame = Some(Frame { origin, detail });
        match self.layers.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = frame,
            None => {
                self.layers.rotate_left(1);
                self.layers[TRACE_DEPTH - 1] = frame;
            }
        }
        self
    }

    /// Raises the severity to at least `severity`.
    #[must_use]
    pub fn escalate(mut self, severity: Severity) -> Self {
        self.severity = self.severity.max(severity);
        self
    }

    /// Outermost reporting function.
    pub fn origin(&self) -> Origin {
        self.layers
            .iter()
            .rev()
            .flatten()
            .map(|frame| frame.origin)
            .next()
            .unwrap_or(self.root.origin)
    }

    /// Innermost non-zero detail code (zero only if every layer used zero).
    pub fn detail(&self) -> u8 {
        self.trace()
            .map(|frame| frame.detail)
            .find(|detail| *detail != 0)
            .unwrap_or(0)
    }

    /// Highest severity seen along the chain.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Failure category assigned where the error was created.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Frame of the function that first detected the failure.
    pub fn root(&self) -> Frame {
        self.root
    }

    /// Frames from the innermost (root) to the outermost layer.
    pub fn trace(&self) -> impl Iterator<Item = Frame> + '_ {
        core::iter::once(self.root).chain(self.layers.iter().flatten().copied())
    }
}

/// Error chaining helpers on [`Result`].
pub trait ResultExt<T> {
    /// Pushes `origin`/`detail` onto the error, leaves `Ok` untouched.
    fn push(self, origin: Origin, detail: u8) -> Result<T>;

    /// Raises the severity of the error, leaves `Ok` untouched.
    fn escalate(self, severity: Severity) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn push(self, origin: Origin, detail: u8) -> Result<T> {
        self.map_err(|error| error.push(origin, detail))
    }

    fn escalate(self, severity: Severity) -> Result<T> {
        self.map_err(|error| error.escalate(severity))
    }
}

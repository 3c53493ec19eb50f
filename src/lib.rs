#![cfg_attr(not(test), no_std)]

mod log;

pub mod adxl345;
pub mod error;
pub mod interface;
pub mod ssd1306;
pub mod timer;

#[cfg(test)]
mod test_support;

pub use crate::adxl345::Adxl345;
pub use crate::error::{Error, ErrorKind, Origin, Result, ResultExt, Severity};
pub use crate::ssd1306::Ssd1306;
pub use crate::timer::{CountdownTimer, Timers};

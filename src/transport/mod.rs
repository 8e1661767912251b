//! # Transport Layer
//!
//! Where frames go once they leave the queue.
//!
//! ## Available Sinks
//!
//! - [`serial`]: Raw TTY device (Bluetooth RFCOMM, USB CDC, RS-232)
//! - [`MemorySink`]: Records frames in memory (tests, dry runs)
//!
//! [`pump`] moves frames from a [`FrameQueue`](crate::queue::FrameQueue)
//! into any [`FrameSink`].
//!
//! Sinks write each frame verbatim. They do not retry: a failed write is
//! returned to the caller, which decides whether to re-send.

pub mod pump;
pub mod serial;

pub use serial::SerialTransport;

use crate::error::LineaError;

/// A destination that accepts one frame at a time.
pub trait FrameSink {
    /// Write one frame in full.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), LineaError>;

    /// Push any buffered bytes out to the device.
    fn flush(&mut self) -> Result<(), LineaError> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), LineaError> {
        (**self).write_frame(frame)
    }

    fn flush(&mut self) -> Result<(), LineaError> {
        (**self).flush()
    }
}

/// Sink that keeps every frame it receives.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub frames: Vec<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All received bytes, in order, with frame boundaries removed.
    pub fn bytes(&self) -> Vec<u8> {
        self.frames.concat()
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), LineaError> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

//! # Queue Pump
//!
//! Consumer side of the frame queue: takes frames off a [`FrameQueue`] in
//! order and writes them to a [`FrameSink`].
//!
//! ```text
//! producers ──enqueue──▶ FrameQueue ──dequeue──▶ pump ──write_frame──▶ sink
//! ```
//!
//! The queue never blocks, so [`run`] polls: it drains whatever is
//! pending, sleeps for the poll interval, and checks again until told to
//! stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::FrameSink;
use crate::error::LineaError;
use crate::link::ResolvedLink;
use crate::queue::FrameQueue;

/// Pacing for the pump loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpOptions {
    /// Pause after each frame
    pub frame_delay: Duration,
    /// Sleep while the queue is empty
    pub poll_interval: Duration,
}

impl Default for PumpOptions {
    fn default() -> Self {
        Self {
            frame_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl From<&ResolvedLink> for PumpOptions {
    fn from(link: &ResolvedLink) -> Self {
        Self {
            frame_delay: link.frame_delay,
            poll_interval: link.poll_interval,
        }
    }
}

/// Totals for one pump pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub frames: usize,
    pub bytes: usize,
}

impl DrainStats {
    fn add(&mut self, other: DrainStats) {
        self.frames += other.frames;
        self.bytes += other.bytes;
    }
}

/// Write frames until the queue is empty.
///
/// Sleeps `frame_delay` after every frame. Frames enqueued while this runs
/// are picked up too.
///
/// ## Errors
///
/// Stops at the first failed write and returns its error. The failed frame
/// has already been dequeued and is not put back; frames behind it stay
/// queued.
pub fn drain_to<S: FrameSink>(
    queue: &FrameQueue,
    sink: &mut S,
    frame_delay: Duration,
) -> Result<DrainStats, LineaError> {
    let mut stats = DrainStats::default();

    while let Some(frame) = queue.dequeue() {
        if let Err(e) = sink.write_frame(&frame) {
            warn!(
                len = frame.len(),
                pending = queue.len(),
                error = %e,
                "frame write failed"
            );
            return Err(e);
        }
        stats.frames += 1;
        stats.bytes += frame.len();

        if !frame_delay.is_zero() {
            thread::sleep(frame_delay);
        }
    }

    if stats.frames > 0 {
        sink.flush()?;
        debug!(frames = stats.frames, bytes = stats.bytes, "queue drained");
    }

    Ok(stats)
}

/// Poll-and-drain loop.
///
/// Returns once `stop` is set and the queue has been emptied, so frames
/// enqueued before the stop request are still delivered.
pub fn run<S: FrameSink>(
    queue: &FrameQueue,
    sink: &mut S,
    options: &PumpOptions,
    stop: &AtomicBool,
) -> Result<DrainStats, LineaError> {
    let mut total = DrainStats::default();

    loop {
        // Read the flag before draining so a stop issued after the last
        // enqueue still sees those frames delivered.
        let stopping = stop.load(Ordering::Acquire);
        total.add(drain_to(queue, sink, options.frame_delay)?);

        if stopping && queue.is_empty() {
            break;
        }
        if queue.is_empty() {
            thread::sleep(options.poll_interval);
        }
    }

    debug!(frames = total.frames, bytes = total.bytes, "pump stopped");
    Ok(total)
}

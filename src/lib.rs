//! # Linea - Printer Command Encoding and Frame Queueing
//!
//! Linea turns hand-written printer command lines into bytes and feeds
//! them to a byte-oriented link (Bluetooth SPP, serial, USB) in frames the
//! link can swallow. It provides:
//!
//! - **Command encoding**: mnemonics (`ESC`), decimal (`27d`), hex
//!   (`1Bh`, `0x1b`) and GBK text tokens
//! - **Frame queue**: thread-safe FIFO with optional sub-packaging
//! - **Transport**: raw TTY sink and a queue pump
//! - **Link profiles**: chunk sizes and pacing per link type
//!
//! ## Quick Start
//!
//! ```no_run
//! use linea::{
//!     link::LinkProfile,
//!     queue::FrameQueue,
//!     transport::{SerialTransport, pump},
//! };
//!
//! let profile = LinkProfile::BLUETOOTH_SPP;
//! let queue = FrameQueue::new();
//!
//! // Initialize, print a line, feed and cut
//! queue.enqueue_line("ESC @ Hello SP world LF", true, profile.chunk_len)?;
//! queue.enqueue_line("ESC d 2d", true, profile.chunk_len)?;
//!
//! let mut transport = SerialTransport::open("/dev/rfcomm0")?;
//! pump::drain_to(&queue, &mut transport, profile.frame_delay())?;
//!
//! # Ok::<(), linea::error::LineaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Token and line encoding |
//! | [`queue`] | Frame queue |
//! | [`transport`] | Frame sinks and the queue pump |
//! | [`link`] | Link profiles and settings |
//! | [`error`] | Error types |

pub mod error;
pub mod link;
pub mod protocol;
pub mod queue;
pub mod transport;

// Re-exports for convenience
pub use error::LineaError;
pub use link::LinkProfile;
pub use protocol::{encode_token, translate_line};
pub use queue::FrameQueue;

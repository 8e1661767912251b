//! # Serial Device Transport
//!
//! Writes frames to a TTY device node: a Bluetooth RFCOMM binding
//! (`/dev/rfcomm0`), a USB CDC port (`/dev/ttyACM0`) or a plain serial
//! port (`/dev/ttyS0`).
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so binary data is transmitted without
//! modification:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL cleared
//! - **No software flow control**: IXON, IXOFF, IXANY cleared, since DC1
//!   (0x11) and DC3 (0x13) are ordinary command bytes here
//! - **No output processing**: OPOST cleared (no LF → CR LF)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON, ISIG, IEXTEN cleared
//!
//! Device nodes that are not TTYs (e.g. `/dev/usb/lp0`) are accepted as-is.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, trace};

use super::FrameSink;
use crate::error::LineaError;

/// # Serial Printer Transport
///
/// ## Example
///
/// ```no_run
/// use linea::transport::{FrameSink, SerialTransport};
///
/// let mut transport = SerialTransport::open("/dev/rfcomm0")?;
/// transport.write_frame(&[0x1B, 0x40])?;
/// # Ok::<(), linea::error::LineaError>(())
/// ```
pub struct SerialTransport {
    file: File,
    frames_written: u64,
}

impl SerialTransport {
    /// Open a device for writing and switch it to raw mode.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, LineaError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            LineaError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_tty_raw(&file)?;
        info!(device = %path.display(), "opened printer link");

        Ok(Self {
            file,
            frames_written: 0,
        })
    }

    /// Frames written since the device was opened.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for SerialTransport {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), LineaError> {
        self.file
            .write_all(frame)
            .map_err(|e| LineaError::Transport(format!("Write failed: {}", e)))?;
        self.flush()?;
        self.frames_written += 1;
        trace!(len = frame.len(), seq = self.frames_written, "frame written");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LineaError> {
        self.file
            .flush()
            .map_err(|e| LineaError::Transport(format!("Flush failed: {}", e)))
    }
}

#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), LineaError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    // Not a terminal: nothing to configure
    if unsafe { libc::isatty(fd) } != 1 {
        debug!(fd, "device is not a tty, skipping raw mode");
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(LineaError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(LineaError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), LineaError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let result = SerialTransport::open("/nonexistent/linea-test-device");
        match result {
            Err(LineaError::Transport(msg)) => assert!(msg.contains("Failed to open")),
            other => panic!("expected transport error, got {:?}", other.err()),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_to_regular_file() {
        let path = std::env::temp_dir().join(format!("linea-serial-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let mut transport = SerialTransport::open(&path).unwrap();
        transport.write_frame(&[0x1B, 0x40]).unwrap();
        transport.write_frame(b"Hi").unwrap();
        assert_eq!(transport.frames_written(), 2);
        drop(transport);

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x1B, 0x40, b'H', b'i']);
        std::fs::remove_file(&path).unwrap();
    }
}

//! # Device File Transport
//!
//! Writes straight to a printer device node such as `/dev/lp0`,
//! `/dev/usb/lp0` or a serial adapter at `/dev/ttyUSB0`.
//!
//! ## TTY Configuration
//!
//! Serial devices are switched to raw mode so binary data is transmitted
//! without modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! Non-TTY devices (parallel ports, USB printer class) are used as-is.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::PinfeedError;

use super::Sink;

/// # Printer Device Transport
///
/// ## Example
///
/// ```no_run
/// use pinfeed::transport::{DeviceTransport, Sink};
/// use pinfeed::protocol::commands;
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// transport.write_all(&commands::init())?;
///
/// # Ok::<(), pinfeed::error::PinfeedError>(())
/// ```
pub struct DeviceTransport {
    file: File,
}

impl DeviceTransport {
    /// Open a printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the lp or dialout group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, PinfeedError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            PinfeedError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if is_tty(&file) {
            log::debug!("{} is a terminal, switching to raw mode", path.display());
            configure_tty_raw(&file)?;
        }

        Ok(Self { file })
    }
}

impl Sink for DeviceTransport {
    /// One `write(2)` per buffer; a short count is fatal.
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError> {
        if data.is_empty() {
            return Ok(());
        }
        let written = self
            .file
            .write(data)
            .map_err(|e| PinfeedError::Transport(format!("Write failed: {}", e)))?;
        if written != data.len() {
            return Err(PinfeedError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_tty(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;

    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &File) -> bool {
    false
}

/// Configure a file descriptor for raw TTY mode.
///
/// IXON/IXOFF/IXANY are cleared too: 0x11 and 0x13 are ordinary bytes in
/// ESC/P2 arguments.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), PinfeedError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PinfeedError::Transport(format!(
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

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PinfeedError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), PinfeedError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let err = DeviceTransport::open("/nonexistent/lp9").err().unwrap();
        assert!(matches!(err, PinfeedError::Transport(msg) if msg.contains("/nonexistent/lp9")));
    }

    #[test]
    fn test_writes_to_regular_file() {
        let path = std::env::temp_dir().join(format!("pinfeed-device-{}", std::process::id()));
        File::create(&path).unwrap();
        {
            let mut device = DeviceTransport::open(&path).unwrap();
            device.write_all(b"\x1b@\r\x0c").unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"\x1b@\r\x0c");
        std::fs::remove_file(&path).unwrap();
    }
}

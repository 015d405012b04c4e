use crossterm::terminal;
use std::io;
use std::io::Write;

pub struct RawLock {}

impl Drop for RawLock {
    fn drop(&mut self) {
        // terminal stays in raw mode but no means to repair
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Error resetting terminal {e}");
        }
    }
}

/// Set terminal to raw so single key presses can be polled without waiting for a newline.
///
/// # Errors
/// - the terminal does not support raw mode, for example because stdin is not a tty
pub fn set_terminal_raw() -> io::Result<RawLock> {
    terminal::enable_raw_mode()?;
    Ok(RawLock {})
}

/// Writer for a terminal in raw mode, where a newline does not return the cursor to the first
/// column anymore: every `\n` is written as `\r\n`.
pub struct RawModeWriter<W: Write> {
    inner: W,
}

impl<W: Write> RawModeWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for RawModeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (idx, part) in buf.split(|b| *b == b'\n').enumerate() {
            if idx > 0 {
                self.inner.write_all(b"\r\n")?;
            }
            self.inner.write_all(part)?;
        }
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

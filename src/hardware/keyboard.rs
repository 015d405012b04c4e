use crossterm::event::{KeyCode, KeyModifiers, poll, read};
use std::io;
use std::time::Duration;

/// Interrupt raised when a key was pressed, its code is stored at
/// [`KEY_PRESSED_ADDRESS`](crate::hardware::memory::KEY_PRESSED_ADDRESS).
pub const KEYBOARD_INTERRUPT: u8 = 1;

/// Providing Keyboard Input independent of an implementation.
pub trait KeyboardInputProvider {
    /// Returns the code of a pressed key if one is available, does not block.
    ///
    /// # Errors
    /// - reading from the underlying input fails
    fn poll_key(&mut self) -> io::Result<Option<u8>>;
    /// True if CTRL-C was triggered
    fn is_interrupted(&self) -> bool;
}

/// Reads key presses from the terminal, which has to be in raw mode, see
/// [`crate::terminal::set_terminal_raw`].
pub struct TerminalInputProvider {
    is_interrupted: bool,
}
impl Default for TerminalInputProvider {
    fn default() -> Self {
        Self::new()
    }
}
impl TerminalInputProvider {
    pub const fn new() -> Self {
        Self {
            is_interrupted: false,
        }
    }
}
impl KeyboardInputProvider for TerminalInputProvider {
    fn poll_key(&mut self) -> io::Result<Option<u8>> {
        if poll(Duration::from_secs(0))?
            && let Some(event) = read()?.as_key_press_event()
        {
            let code = match event.code {
                KeyCode::Char('c') if event.modifiers == KeyModifiers::CONTROL => {
                    self.is_interrupted = true;
                    return Ok(None);
                }
                KeyCode::Enter => Some(b'\n'),
                KeyCode::Tab => Some(b'\t'),
                KeyCode::Backspace => Some(0x08),
                KeyCode::Esc => Some(0x1B),
                // characters outside of one byte cannot be stored in memory
                KeyCode::Char(c) => u8::try_from(c).ok(),
                _ => None,
            };
            return Ok(code);
        }
        Ok(None)
    }
    fn is_interrupted(&self) -> bool {
        self.is_interrupted
    }
}

/// Used when keyboard input is disabled, never provides a key.
pub struct NoKeyboard;
impl KeyboardInputProvider for NoKeyboard {
    fn poll_key(&mut self) -> io::Result<Option<u8>> {
        Ok(None)
    }
    fn is_interrupted(&self) -> bool {
        false
    }
}

use crate::errors::{ExecutionError, LoadProgramError};
use std::fmt::{Debug, Formatter};

pub const MEMORY_SIZE: usize = 256;
pub const LAST_ADDRESS: u8 = u8::MAX;
/// Holds the most recent key pressed on the keyboard.
pub const KEY_PRESSED_ADDRESS: u8 = 0xF4;
/// Initial value of the stack pointer, the stack grows down from here.
pub const STACK_START: u8 = 0xF3;
/// Vector for interrupt `n` is stored at `INTERRUPT_VECTOR_TABLE + n`.
pub const INTERRUPT_VECTOR_TABLE: u8 = 0xF8;

/// The 256 byte LS-8 RAM.
///
/// ```text
///  FF  I7 vector    Interrupt vector table
///  ..
///  F8  I0 vector
///  F7  Reserved
///  F6  Reserved
///  F5  Reserved
///  F4  Key pressed
///  F3  Start of Stack, grows down
///  ..
///  00  Program entry, program loaded upward
/// ```
pub struct Memory {
    /// Index equals memory address
    data: [u8; MEMORY_SIZE],
    program_len: usize,
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Program bytes: {:?}, Program section contents: {:02X?}",
            self.program_len,
            self.program_slice()
        )
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub const fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
            program_len: 0,
        }
    }

    /// Reads the byte at `address`.
    ///
    /// # Errors
    /// - `address` is greater than [`LAST_ADDRESS`]
    pub fn read(&self, address: u16) -> Result<u8, ExecutionError> {
        self.data
            .get(usize::from(address))
            .copied()
            .ok_or_else(|| Self::out_of_range(address))
    }

    /// Writes `value` to `address`.
    ///
    /// # Errors
    /// - `address` is greater than [`LAST_ADDRESS`]
    pub fn write(&mut self, address: u16, value: u8) -> Result<(), ExecutionError> {
        let cell = self
            .data
            .get_mut(usize::from(address))
            .ok_or_else(|| Self::out_of_range(address))?;
        *cell = value;
        Ok(())
    }

    const fn out_of_range(address: u16) -> ExecutionError {
        ExecutionError::AddressOutOfRange {
            address,
            last_address: LAST_ADDRESS,
        }
    }

    /// Loads a program image into memory starting from address 0.
    ///
    /// # Errors
    /// - Program too long
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadProgramError> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadProgramError::ProgramTooLong {
                actual_bytes: program.len(),
                maximum_bytes: MEMORY_SIZE,
            });
        }
        self.data[..program.len()].copy_from_slice(program);
        self.program_len = program.len();
        Ok(())
    }

    pub fn program_slice(&self) -> &[u8] {
        &self.data[..self.program_len]
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or parsing a program image, all of them happen before execution starts.
#[derive(Error, Debug)]
pub enum LoadProgramError {
    #[error("Program file not found: {}", path.display())]
    ProgramFileNotFound { path: PathBuf },
    #[error("Error reading program file {}: {message}", path.display())]
    ProgramFileUnreadable { path: PathBuf, message: String },
    #[error("Invalid program line {line_number}: {content:?} is not an 8 digit binary literal")]
    InvalidProgramLine { line_number: usize, content: String },
    #[error("Program too long, got {actual_bytes:?} bytes while limit is {maximum_bytes:?}")]
    ProgramTooLong { actual_bytes: usize, maximum_bytes: usize },
}

/// Errors ending the execution of a program.
///
/// Every one of them halts the machine, none is recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Unrecognized opcode {opcode:#010b} at address {address:#04X}")]
    UnrecognizedOpcode { opcode: u8, address: u8 },
    #[error("Divide by zero at address {address:#04X}")]
    DivideByZero { address: u8 },
    #[error("Address {address:#06X} is out of range, memory ends at {last_address:#04X}")]
    AddressOutOfRange { address: u16, last_address: u8 },
    #[error("Register index {index} at address {address:#04X} is not one of R0..R7")]
    InvalidRegister { index: u8, address: u8 },
    #[error("Error during reading keyboard input or writing program output: {0}")]
    IOInputOutputError(String),
    #[error("Step limit of {max_steps} reached without halting")]
    StepLimitExceeded { max_steps: u64 },
    #[error("Execution interrupted by CTRL-C")]
    Interrupted,
}

impl ExecutionError {
    /// Faults of the running program, as opposed to failures of the emulator itself.
    /// Only those are reported on the program's console.
    #[must_use]
    pub const fn is_program_fault(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedOpcode { .. } | Self::DivideByZero { .. }
        )
    }
}

impl From<std::io::Error> for ExecutionError {
    fn from(e: std::io::Error) -> Self {
        Self::IOInputOutputError(e.to_string())
    }
}

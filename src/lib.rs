//! # LS-8 Emulator.
//!
//! `ls8-emulator` is an emulator of the LS-8, an 8 bit machine with 256 bytes of memory,
//! eight registers, a stack and timer and keyboard interrupts.
//! Usage starts with loading a program via `emulator::from_program`.
//!
//!  # Example
//! ```
//! use ls8_emulator::config::EmulatorConfig;
//! use ls8_emulator::emulator;
//! // LDI R0,8  PRN R0  HLT
//! let program = [0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001];
//! let mut emu = emulator::from_program_bytes(&program, EmulatorConfig::default()).unwrap();
//! let mut output = Vec::new();
//! emu.execute(&mut output).unwrap();
//! assert_eq!(output, b"8\n");
//! ```
//! # Errors
//! - Loading: program file missing or unreadable, invalid line, program too long
//! - Execution: unrecognized opcode and division by zero are reported on the program output,
//!   every error halts the machine

pub mod config;
pub mod emulator;
pub mod errors;
pub mod hardware;
pub mod terminal;

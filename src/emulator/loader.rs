//! Reading LS-8 program images.
//!
//! An image is a text file with one byte per line written as 8 binary digits. A `#` starts a
//! comment running to the end of the line, blank and comment only lines are skipped:
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```
use crate::errors::LoadProgramError;
use std::fs;
use std::io;
use std::path::Path;

/// Reads and parses the program image at `path`.
///
/// # Errors
/// - file does not exist or cannot be read
/// - see [`parse_program`]
pub fn read_program(path: &Path) -> Result<Vec<u8>, LoadProgramError> {
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadProgramError::ProgramFileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadProgramError::ProgramFileUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;
    parse_program(&source)
}

/// Parses the text of a program image into the bytes to load at address 0.
///
/// # Errors
/// - a line holds something else than 8 binary digits and an optional comment
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadProgramError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let code = line.split_once('#').map_or(line, |(code, _comment)| code).trim();
            (!code.is_empty()).then(|| parse_byte(code, idx + 1))
        })
        .collect()
}

fn parse_byte(code: &str, line_number: usize) -> Result<u8, LoadProgramError> {
    let is_binary_literal = code.len() == 8 && code.bytes().all(|b| b == b'0' || b == b'1');
    is_binary_literal
        .then(|| u8::from_str_radix(code, 2).ok())
        .flatten()
        .ok_or_else(|| LoadProgramError::InvalidProgramLine {
            line_number,
            content: code.to_string(),
        })
}

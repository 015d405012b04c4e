//! Arithmetic logic unit, pure transforms over the register file.
//!
//! Every result stored into a register is reduced modulo 256.
use crate::hardware::registers::{Flags, Register, Registers};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// The instructions executed by the ALU, those with bit 5 set in their opcode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AluInstruction {
    Add(Register, Register),
    Sub(Register, Register),
    Mul(Register, Register),
    Div(Register, Register),
    Mod(Register, Register),
    And(Register, Register),
    Or(Register, Register),
    Xor(Register, Register),
    Shl(Register, Register),
    Shr(Register, Register),
    Cmp(Register, Register),
    Not(Register),
    Inc(Register),
    Dec(Register),
}

/// The divisor of DIV or MOD was zero, no register was changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DivideByZero;

impl Display for AluInstruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Add(a, b) => write!(f, "ADD {a}, {b}"),
            Self::Sub(a, b) => write!(f, "SUB {a}, {b}"),
            Self::Mul(a, b) => write!(f, "MUL {a}, {b}"),
            Self::Div(a, b) => write!(f, "DIV {a}, {b}"),
            Self::Mod(a, b) => write!(f, "MOD {a}, {b}"),
            Self::And(a, b) => write!(f, "AND {a}, {b}"),
            Self::Or(a, b) => write!(f, "OR {a}, {b}"),
            Self::Xor(a, b) => write!(f, "XOR {a}, {b}"),
            Self::Shl(a, b) => write!(f, "SHL {a}, {b}"),
            Self::Shr(a, b) => write!(f, "SHR {a}, {b}"),
            Self::Cmp(a, b) => write!(f, "CMP {a}, {b}"),
            Self::Not(a) => write!(f, "NOT {a}"),
            Self::Inc(a) => write!(f, "INC {a}"),
            Self::Dec(a) => write!(f, "DEC {a}"),
        }
    }
}

/// Executes `instruction` on `r`.
///
/// # Errors
/// - DIV or MOD with a zero divisor, `r` is left unchanged
pub fn execute(instruction: AluInstruction, r: &mut Registers) -> Result<(), DivideByZero> {
    match instruction {
        AluInstruction::Add(a, b) => binary(r, a, b, u8::wrapping_add),
        AluInstruction::Sub(a, b) => binary(r, a, b, u8::wrapping_sub),
        AluInstruction::Mul(a, b) => binary(r, a, b, u8::wrapping_mul),
        AluInstruction::Div(a, b) => checked_binary(r, a, b, u8::checked_div)?,
        AluInstruction::Mod(a, b) => checked_binary(r, a, b, u8::checked_rem)?,
        AluInstruction::And(a, b) => binary(r, a, b, |x, y| x & y),
        AluInstruction::Or(a, b) => binary(r, a, b, |x, y| x | y),
        AluInstruction::Xor(a, b) => binary(r, a, b, |x, y| x ^ y),
        AluInstruction::Shl(a, b) => binary(r, a, b, shl),
        AluInstruction::Shr(a, b) => binary(r, a, b, shr),
        AluInstruction::Cmp(a, b) => cmp(r, a, b),
        AluInstruction::Not(a) => r.set(a, !r.get(a)),
        AluInstruction::Inc(a) => r.set(a, r.get(a).wrapping_add(1)),
        AluInstruction::Dec(a) => r.set(a, r.get(a).wrapping_sub(1)),
    }
    Ok(())
}

fn binary(r: &mut Registers, a: Register, b: Register, op: impl Fn(u8, u8) -> u8) {
    r.set(a, op(r.get(a), r.get(b)));
}

fn checked_binary(
    r: &mut Registers,
    a: Register,
    b: Register,
    op: impl Fn(u8, u8) -> Option<u8>,
) -> Result<(), DivideByZero> {
    let result = op(r.get(a), r.get(b)).ok_or(DivideByZero)?;
    r.set(a, result);
    Ok(())
}

/// Bits shifted out are lost, shifting by 8 or more gives 0.
fn shl(value: u8, amount: u8) -> u8 {
    value.checked_shl(u32::from(amount)).unwrap_or(0)
}
fn shr(value: u8, amount: u8) -> u8 {
    value.checked_shr(u32::from(amount)).unwrap_or(0)
}

/// Sets exactly one of `LESS`, `GREATER` or `EQUAL`, the `HALT` bit is untouched.
fn cmp(r: &mut Registers, a: Register, b: Register) {
    let relation = match r.get(a).cmp(&r.get(b)) {
        Ordering::Less => Flags::LESS,
        Ordering::Greater => Flags::GREATER,
        Ordering::Equal => Flags::EQUAL,
    };
    r.flags.remove(Flags::COMPARISON);
    r.flags.insert(relation);
}

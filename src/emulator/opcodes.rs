//! Implemented non ALU operations for the LS-8.
//!
//! Operand bytes follow the opcode in memory, `rX` names a register operand.
use crate::emulator::instruction::Condition;
use crate::emulator::stack;
use crate::errors::ExecutionError;
use crate::hardware::memory::Memory;
use crate::hardware::registers::{Register, Registers};
use std::io::Write;

/// How the PC changes after an instruction was executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PcUpdate {
    /// Move to the following instruction
    Advance,
    /// The instruction repositioned the PC
    Jump(u8),
}

/// LDI: Set the value of a register to an integer.
/// ```text
/// 10000010 00000rrr iiiiiiii
/// ```
pub const fn ldi(dr: Register, immediate: u8, r: &mut Registers) {
    r.set(dr, immediate);
}

/// LD: Loads `rA` with the value at the memory address stored in `rB`.
/// ```text
/// 10000011 00000aaa 00000bbb
/// ```
pub fn ld(a: Register, b: Register, r: &mut Registers, memory: &Memory) -> Result<(), ExecutionError> {
    let value = memory.read(u16::from(r.get(b)))?;
    r.set(a, value);
    Ok(())
}

/// ST: Store value in `rB` in the address stored in `rA`.
/// ```text
/// 10000100 00000aaa 00000bbb
/// ```
pub fn st(a: Register, b: Register, r: &Registers, memory: &mut Memory) -> Result<(), ExecutionError> {
    memory.write(u16::from(r.get(a)), r.get(b))
}

/// PUSH: Decrement SP and copy the value in the given register to the address pointed to by SP.
/// ```text
/// 01000101 00000rrr
/// ```
pub fn push(sr: Register, r: &mut Registers, memory: &mut Memory) -> Result<(), ExecutionError> {
    let value = r.get(sr);
    stack::push(r, memory, value)
}

/// POP: Copy the value at the address pointed to by SP into the given register and increment SP.
/// ```text
/// 01000110 00000rrr
/// ```
pub fn pop(dr: Register, r: &mut Registers, memory: &Memory) -> Result<(), ExecutionError> {
    let value = stack::pop(r, memory)?;
    r.set(dr, value);
    Ok(())
}

/// PRN: Print the decimal value of the given register, followed by a newline.
/// ```text
/// 01000111 00000rrr
/// ```
pub fn prn(sr: Register, r: &Registers, stdout: &mut impl Write) -> Result<(), ExecutionError> {
    write_line_out(&r.get(sr).to_string(), stdout)
}

/// PRA: Print the character whose code is the value of the given register, followed by a newline.
/// ```text
/// 01001000 00000rrr
/// ```
pub fn pra(sr: Register, r: &Registers, stdout: &mut impl Write) -> Result<(), ExecutionError> {
    let c = char::from(r.get(sr));
    write_line_out(&String::from(c), stdout)
}

/// JMP, JEQ, JNE, JGT, JLT, JGE and JLE: jump to the address stored in the given register
/// if `condition` holds for the current flags, fall through otherwise.
/// ```text
/// 0101cccc 00000rrr
/// ```
pub const fn jump(condition: Condition, target: Register, r: &Registers) -> PcUpdate {
    if condition.holds(r.flags) {
        PcUpdate::Jump(r.get(target))
    } else {
        PcUpdate::Advance
    }
}

/// CALL: Push the address of the instruction after CALL, then jump to the address stored in
/// the given register.
/// ```text
/// 01010000 00000rrr
/// ```
pub fn call(
    target: Register,
    return_address: u8,
    r: &mut Registers,
    memory: &mut Memory,
) -> Result<PcUpdate, ExecutionError> {
    stack::push(r, memory, return_address)?;
    Ok(PcUpdate::Jump(r.get(target)))
}

/// RET: Pop the top of the stack into the PC.
/// ```text
/// 00010001
/// ```
pub fn ret(r: &mut Registers, memory: &Memory) -> Result<PcUpdate, ExecutionError> {
    Ok(PcUpdate::Jump(stack::pop(r, memory)?))
}

/// INT: Mark the interrupt whose number is stored in the given register as pending.
/// Only the lowest three bits of the register are used.
/// ```text
/// 01010010 00000rrr
/// ```
pub const fn int(sr: Register, r: &mut Registers) -> PcUpdate {
    r.set_interrupt_pending(r.get(sr));
    PcUpdate::Advance
}

/// HLT: Halt the CPU.
/// ```text
/// 00000001
/// ```
pub const fn hlt(r: &mut Registers) {
    r.halt();
}

fn write_line_out(message: &str, stdout: &mut impl Write) -> Result<(), ExecutionError> {
    writeln!(stdout, "{message}")?;
    stdout.flush()?;
    Ok(())
}

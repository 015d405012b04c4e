//! The stack lives in memory below [`STACK_START`](crate::hardware::memory::STACK_START)
//! and grows down, `R7` points to its top element.
use crate::errors::ExecutionError;
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;

/// Decrements SP, then writes `value` to the new top of stack.
pub fn push(r: &mut Registers, memory: &mut Memory, value: u8) -> Result<(), ExecutionError> {
    let sp = r.sp().wrapping_sub(1);
    r.set_sp(sp);
    memory.write(u16::from(sp), value)
}

/// Reads the top of stack, then increments SP.
pub fn pop(r: &mut Registers, memory: &Memory) -> Result<u8, ExecutionError> {
    let sp = r.sp();
    let value = memory.read(u16::from(sp))?;
    r.set_sp(sp.wrapping_add(1));
    Ok(value)
}

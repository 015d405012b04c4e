//! Interrupt controller.
//!
//! An interrupt `n` is delivered when bit `n` is set in both IM (`R5`) and IS (`R6`).
use crate::emulator::stack;
use crate::errors::ExecutionError;
use crate::hardware::memory::{INTERRUPT_VECTOR_TABLE, Memory};
use crate::hardware::registers::{Flags, Register, Registers};
use tracing::debug;

/// Registers saved on the stack during interrupt handling, `R7` is the stack pointer itself.
const SAVED_REGISTERS: [Register; 7] = [
    Register::R0,
    Register::R1,
    Register::R2,
    Register::R3,
    Register::R4,
    Register::R5,
    Register::R6,
];

/// The lowest numbered interrupt which is both enabled and pending.
#[must_use]
pub const fn next_pending(r: &Registers) -> Option<u8> {
    let active = r.interrupt_mask() & r.interrupt_status();
    if active == 0 {
        None
    } else {
        #[expect(clippy::cast_possible_truncation, reason = "at most 7")]
        let interrupt = active.trailing_zeros() as u8;
        Some(interrupt)
    }
}

/// Delivers `interrupt`:
/// 1. its IS bit is cleared
/// 2. the PC is pushed
/// 3. the flags are pushed
/// 4. `R0` to `R6` are pushed in that order
/// 5. the PC is set from the interrupt vector table
///
/// # Errors
/// - the vector table entry cannot be read
pub fn deliver(interrupt: u8, r: &mut Registers, memory: &mut Memory) -> Result<(), ExecutionError> {
    debug_assert!(interrupt < 8, "interrupt {interrupt} does not exist");
    r.clear_interrupt_pending(interrupt);
    let return_address = r.pc;
    stack::push(r, memory, return_address)?;
    let flags = r.flags.bits();
    stack::push(r, memory, flags)?;
    for reg in SAVED_REGISTERS {
        let value = r.get(reg);
        stack::push(r, memory, value)?;
    }
    let vector = u16::from(INTERRUPT_VECTOR_TABLE) + u16::from(interrupt);
    r.pc = memory.read(vector)?;
    debug!(interrupt, handler = r.pc, "Delivered interrupt");
    Ok(())
}

/// IRET: Return from an interrupt handler, the exact inverse of [`deliver`].
/// ```text
/// 00010011
/// ```
/// Returns the address to continue at.
///
/// # Errors
/// - the stack pointer does not point into memory
pub fn iret(r: &mut Registers, memory: &Memory) -> Result<u8, ExecutionError> {
    for reg in SAVED_REGISTERS.into_iter().rev() {
        let value = stack::pop(r, memory)?;
        r.set(reg, value);
    }
    r.flags = Flags::from_bits_retain(stack::pop(r, memory)?);
    let return_address = stack::pop(r, memory)?;
    debug!(return_address, "Returning from interrupt");
    Ok(return_address)
}

use crate::hardware::memory::STACK_START;
use bitflags::bitflags;
use std::fmt::{Debug, Display, Formatter};

/// One of the eight general purpose registers `R0` to `R7`.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, enumn::N)]
pub enum Register {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    /// IM: bit `n` set enables interrupt `n`
    R5,
    /// IS: bit `n` set marks interrupt `n` as pending
    R6,
    /// SP: stack pointer
    R7,
}

impl Register {
    pub const INTERRUPT_MASK: Self = Self::R5;
    pub const INTERRUPT_STATUS: Self = Self::R6;
    pub const STACK_POINTER: Self = Self::R7;

    pub const ALL: [Self; 8] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", *self as u8)
    }
}

bitflags! {
    /// The `FL` register, layout `H0000LGE`.
    #[derive(Copy, Clone, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        const EQUAL   = 0b0000_0001;
        const GREATER = 0b0000_0010;
        const LESS    = 0b0000_0100;
        const HALT    = 0b1000_0000;
    }
}

impl Flags {
    pub const COMPARISON: Self = Self::EQUAL.union(Self::GREATER).union(Self::LESS);
}

impl Debug for Flags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010b}", self.bits())
    }
}

pub struct Registers {
    general_purpose: [u8; 8],
    pub pc: u8,
    pub flags: Flags,
}

impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PC: {:02X}, FL: {:?}, R0-R7: {:02X?}",
            self.pc, self.flags, self.general_purpose
        )
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub const fn new() -> Self {
        let mut general_purpose = [0u8; 8];
        general_purpose[Register::STACK_POINTER.index()] = STACK_START;
        Self {
            general_purpose,
            pc: 0,
            flags: Flags::empty(),
        }
    }

    #[must_use]
    pub const fn get(&self, r: Register) -> u8 {
        self.general_purpose[r.index()]
    }
    pub const fn set(&mut self, r: Register, value: u8) {
        self.general_purpose[r.index()] = value;
    }

    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.get(Register::STACK_POINTER)
    }
    pub const fn set_sp(&mut self, value: u8) {
        self.set(Register::STACK_POINTER, value);
    }

    #[must_use]
    pub const fn interrupt_mask(&self) -> u8 {
        self.get(Register::INTERRUPT_MASK)
    }
    #[must_use]
    pub const fn interrupt_status(&self) -> u8 {
        self.get(Register::INTERRUPT_STATUS)
    }
    pub const fn set_interrupt_pending(&mut self, interrupt: u8) {
        let status = self.interrupt_status() | (1 << (interrupt & 0b111));
        self.set(Register::INTERRUPT_STATUS, status);
    }
    pub const fn clear_interrupt_pending(&mut self, interrupt: u8) {
        let status = self.interrupt_status() & !(1 << (interrupt & 0b111));
        self.set(Register::INTERRUPT_STATUS, status);
    }

    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.flags.contains(Flags::HALT)
    }
    pub const fn halt(&mut self) {
        self.flags = self.flags.union(Flags::HALT);
    }

    pub const fn general_purpose(&self) -> &[u8; 8] {
        &self.general_purpose
    }
}

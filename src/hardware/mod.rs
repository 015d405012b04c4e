//! The LS-8 machine parts holding state: memory, registers and the peripherals polled each cycle.
pub mod clock;
pub mod keyboard;
pub mod memory;
pub mod registers;

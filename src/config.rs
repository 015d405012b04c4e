/// Whether an interrupt handler can itself be interrupted before it executes IRET.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InterruptNesting {
    /// No interrupt is delivered between delivering an interrupt and the matching IRET.
    #[default]
    Masked,
    /// Any enabled and pending interrupt is delivered, even inside a handler.
    Nested,
}

/// Runtime options of an [`Emulator`](crate::emulator::Emulator).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmulatorConfig {
    /// Print PC, the next three memory bytes and all registers before each instruction.
    pub trace: bool,
    pub interrupt_nesting: InterruptNesting,
    /// Stop with [`ExecutionError::StepLimitExceeded`](crate::errors::ExecutionError) after
    /// this many machine cycles, run until halted if `None`.
    pub max_steps: Option<u64>,
}

pub mod alu;
pub mod instruction;
pub mod interrupts;
pub mod loader;
pub mod opcodes;
mod stack;
#[cfg(test)]
mod test_helpers;

use crate::config::{EmulatorConfig, InterruptNesting};
use crate::emulator::alu::DivideByZero;
use crate::emulator::instruction::{Instruction, Opcode};
use crate::emulator::opcodes::PcUpdate;
use crate::errors::{ExecutionError, LoadProgramError};
use crate::hardware::clock::{Clock, SystemClock, TimerEdgeDetector};
use crate::hardware::keyboard::{KEYBOARD_INTERRUPT, KeyboardInputProvider, NoKeyboard};
use crate::hardware::memory::{KEY_PRESSED_ADDRESS, LAST_ADDRESS, Memory};
use crate::hardware::registers::{Register, Registers};
use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads the program image at `path` and returns an emulator with the program loaded.
///
/// # Errors
/// - See [`loader::read_program`] and [`Memory::load_program`]
pub fn from_program(path: &Path, config: EmulatorConfig) -> Result<Emulator, LoadProgramError> {
    info!(path = %path.display(), "Reading program");
    let program = loader::read_program(path)?;
    from_program_bytes(&program, config)
}

/// Returns an emulator with `program` loaded at address 0.
///
/// # Errors
/// - Program too long
pub fn from_program_bytes(
    program: &[u8],
    config: EmulatorConfig,
) -> Result<Emulator, LoadProgramError> {
    let mut emu = Emulator::new(config);
    emu.load_program(program)?;
    Ok(emu)
}

/// The public facing emulator used to run LS-8 programs.
pub struct Emulator {
    pub(crate) registers: Registers,
    pub(crate) memory: Memory,
    keyboard: Box<dyn KeyboardInputProvider>,
    clock: Box<dyn Clock>,
    timer: TimerEdgeDetector,
    config: EmulatorConfig,
    /// Set between delivering an interrupt and its IRET, only with [`InterruptNesting::Masked`]
    in_interrupt_handler: bool,
    steps: u64,
}

impl Debug for Emulator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Emulator {{ registers: {:?}, memory: {:?}, steps: {} }}",
            self.registers, self.memory, self.steps
        )
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(EmulatorConfig::default())
    }
}

impl Emulator {
    /// Creates an emulator with empty memory, no keyboard and the system clock as timer source.
    #[must_use]
    pub fn new(config: EmulatorConfig) -> Self {
        Self {
            registers: Registers::new(),
            memory: Memory::new(),
            keyboard: Box::new(NoKeyboard),
            clock: Box::new(SystemClock),
            timer: TimerEdgeDetector::default(),
            config,
            in_interrupt_handler: false,
            steps: 0,
        }
    }
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Box<dyn KeyboardInputProvider>) -> Self {
        self.keyboard = keyboard;
        self
    }
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Loads a program into memory starting from address 0.
    ///
    /// # Errors
    /// - Program too long
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadProgramError> {
        self.memory.load_program(program)
    }

    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }
    /// Machine cycles executed so far, including those delivering an interrupt.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.registers.is_halted()
    }

    /// Runs the loaded program until it halts.
    ///
    /// Program output and faults of the program itself, unrecognized opcodes and divisions by
    /// zero, are written to `stdout`.
    ///
    /// # Errors
    /// - any [`ExecutionError`], the machine is halted afterward
    pub fn execute(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        info!(
            program_bytes = self.memory.program_slice().len(),
            "Running program"
        );
        while !self.is_halted() {
            self.step(stdout)?;
        }
        info!(steps = self.steps, registers = ?self.registers, "Program halted");
        Ok(())
    }

    /// Executes one machine cycle: polls clock and keyboard, then either delivers one
    /// interrupt or executes the instruction at the PC.
    ///
    /// # Errors
    /// - any [`ExecutionError`], the machine is halted afterward
    pub fn step(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        let result = self.cycle(stdout);
        if let Err(e) = &result {
            self.registers.halt();
            warn!(error = %e, pc = self.registers.pc, "Machine halted on error");
            if e.is_program_fault() {
                writeln!(stdout, "ERROR: {e}")?;
                stdout.flush()?;
            }
        }
        result
    }

    fn cycle(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        if let Some(max_steps) = self.config.max_steps
            && self.steps >= max_steps
        {
            return Err(ExecutionError::StepLimitExceeded { max_steps });
        }
        self.steps += 1;
        self.poll_peripherals()?;

        if let Some(interrupt) = self.interrupt_to_deliver() {
            interrupts::deliver(interrupt, &mut self.registers, &mut self.memory)?;
            self.in_interrupt_handler = self.config.interrupt_nesting == InterruptNesting::Masked;
            return Ok(());
        }

        if self.config.trace {
            self.trace(stdout)?;
        }
        let address = self.registers.pc;
        let instruction = self.fetch_and_decode(address)?;
        debug!(address, %instruction, "Executing instruction");
        let update = self.dispatch(instruction, address, stdout)?;
        self.update_pc(instruction.opcode(), update)
    }

    fn poll_peripherals(&mut self) -> Result<(), ExecutionError> {
        let timer_interrupts = self.timer.sample(self.clock.now());
        if timer_interrupts != 0 {
            let status = self.registers.interrupt_status() | timer_interrupts;
            self.registers.set(Register::INTERRUPT_STATUS, status);
        }
        if let Some(key) = self.keyboard.poll_key()? {
            debug!(key, "Key pressed");
            self.memory.write(u16::from(KEY_PRESSED_ADDRESS), key)?;
            self.registers.set_interrupt_pending(KEYBOARD_INTERRUPT);
        }
        if self.keyboard.is_interrupted() {
            return Err(ExecutionError::Interrupted);
        }
        Ok(())
    }

    const fn interrupt_to_deliver(&self) -> Option<u8> {
        if self.in_interrupt_handler {
            None
        } else {
            interrupts::next_pending(&self.registers)
        }
    }

    fn fetch_and_decode(&self, address: u8) -> Result<Instruction, ExecutionError> {
        let bits = self.memory.read(u16::from(address))?;
        let opcode =
            Opcode::n(bits).ok_or(ExecutionError::UnrecognizedOpcode { opcode: bits, address })?;
        let mut operands = [0u8; 2];
        for (offset, operand) in (1u16..).zip(
            operands
                .iter_mut()
                .take(usize::from(opcode.operand_count())),
        ) {
            *operand = self.memory.read(u16::from(address) + offset)?;
        }
        Instruction::decode(opcode, &operands, address)
    }

    fn dispatch(
        &mut self,
        instruction: Instruction,
        address: u8,
        stdout: &mut impl Write,
    ) -> Result<PcUpdate, ExecutionError> {
        let r = &mut self.registers;
        let m = &mut self.memory;
        let update = match instruction {
            Instruction::Nop => PcUpdate::Advance,
            Instruction::Hlt => {
                opcodes::hlt(r);
                PcUpdate::Advance
            }
            Instruction::Ret => opcodes::ret(r, m)?,
            Instruction::Iret => {
                let return_address = interrupts::iret(r, m)?;
                self.in_interrupt_handler = false;
                PcUpdate::Jump(return_address)
            }
            Instruction::Call(target) => {
                let return_address = next_address(address, Opcode::Call)?;
                opcodes::call(target, return_address, r, m)?
            }
            Instruction::Int(sr) => opcodes::int(sr, r),
            Instruction::Jump(condition, target) => opcodes::jump(condition, target, r),
            Instruction::Push(sr) => {
                opcodes::push(sr, r, m)?;
                PcUpdate::Advance
            }
            Instruction::Pop(dr) => {
                opcodes::pop(dr, r, m)?;
                PcUpdate::Advance
            }
            Instruction::Prn(sr) => {
                opcodes::prn(sr, r, stdout)?;
                PcUpdate::Advance
            }
            Instruction::Pra(sr) => {
                opcodes::pra(sr, r, stdout)?;
                PcUpdate::Advance
            }
            Instruction::Ld(a, b) => {
                opcodes::ld(a, b, r, m)?;
                PcUpdate::Advance
            }
            Instruction::Ldi(dr, immediate) => {
                opcodes::ldi(dr, immediate, r);
                PcUpdate::Advance
            }
            Instruction::St(a, b) => {
                opcodes::st(a, b, r, m)?;
                PcUpdate::Advance
            }
            Instruction::Alu(op) => {
                alu::execute(op, r)
                    .map_err(|DivideByZero| ExecutionError::DivideByZero { address })?;
                PcUpdate::Advance
            }
        };
        Ok(update)
    }

    /// A halted machine keeps its PC at the HLT instruction.
    fn update_pc(&mut self, opcode: Opcode, update: PcUpdate) -> Result<(), ExecutionError> {
        match update {
            PcUpdate::Jump(target) => {
                debug_assert!(opcode.sets_pc(), "{opcode} must not set the PC");
                self.registers.pc = target;
            }
            PcUpdate::Advance if self.registers.is_halted() => {}
            PcUpdate::Advance => {
                self.registers.pc = next_address(self.registers.pc, opcode)?;
            }
        }
        Ok(())
    }

    /// Writes PC, the three bytes starting at PC and all registers in hex.
    fn trace(&self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        let pc = self.registers.pc;
        let byte_at = |offset: u16| self.memory.read(u16::from(pc) + offset).unwrap_or_default();
        write!(
            stdout,
            "TRACE: {pc:02X} | {:02X} {:02X} {:02X} |",
            byte_at(0),
            byte_at(1),
            byte_at(2)
        )?;
        for value in self.registers.general_purpose() {
            write!(stdout, " {value:02X}")?;
        }
        writeln!(stdout)?;
        Ok(())
    }
}

/// Address of the instruction following the one at `address`.
fn next_address(address: u8, opcode: Opcode) -> Result<u8, ExecutionError> {
    let next = u16::from(address) + u16::from(opcode.width());
    u8::try_from(next).map_err(|_| ExecutionError::AddressOutOfRange {
        address: next,
        last_address: LAST_ADDRESS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::test_helpers::{
        FakeClock, FakeKeyboardInputProvider, StringWriter, emulator_with_program,
    };
    use crate::hardware::clock::Timestamp;
    use crate::hardware::memory::STACK_START;
    use crate::hardware::registers::Flags;
    use googletest::prelude::*;

    const LDI: u8 = Opcode::Ldi.bits();
    const PRN: u8 = Opcode::Prn.bits();
    const PRA: u8 = Opcode::Pra.bits();
    const HLT: u8 = Opcode::Hlt.bits();
    const DIV: u8 = Opcode::Div.bits();
    const CALL: u8 = Opcode::Call.bits();
    const RET: u8 = Opcode::Ret.bits();
    const JMP: u8 = Opcode::Jmp.bits();
    const IRET: u8 = Opcode::Iret.bits();
    const NOP: u8 = Opcode::Nop.bits();

    fn run(emu: &mut Emulator) -> (Result<(), ExecutionError>, String) {
        let mut writer = StringWriter::new();
        let res = emu.execute(&mut writer);
        (res, writer.get_string())
    }

    #[gtest]
    pub fn test_print8() {
        let mut emu = emulator_with_program(&[LDI, 0, 8, PRN, 0, HLT]);
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(output, eq("8\n"));
        expect_that!(emu.is_halted(), eq(true));
        expect_that!(emu.registers().pc, eq(5));
        expect_that!(emu.steps(), eq(3));
    }

    #[gtest]
    pub fn test_divide_by_zero_halts_before_print() {
        let mut emu = emulator_with_program(&[LDI, 0, 10, LDI, 1, 0, DIV, 0, 1, PRN, 0, HLT]);
        let (res, output) = run(&mut emu);
        assert_eq!(res.unwrap_err(), ExecutionError::DivideByZero { address: 6 });
        assert_that!(output, eq("ERROR: Divide by zero at address 0x06\n"));
        expect_that!(emu.is_halted(), eq(true));
        expect_that!(emu.registers().get(Register::R0), eq(10));
        expect_that!(emu.registers().pc, eq(6));
    }

    #[gtest]
    pub fn test_unrecognized_opcode() {
        let mut emu = emulator_with_program(&[NOP, LDI, 2, 3, 0xFF, HLT]);
        let (res, output) = run(&mut emu);
        assert_eq!(
            res.unwrap_err(),
            ExecutionError::UnrecognizedOpcode {
                opcode: 0xFF,
                address: 4
            }
        );
        assert_that!(
            output,
            eq("ERROR: Unrecognized opcode 0b11111111 at address 0x04\n")
        );
        expect_that!(emu.registers().pc, eq(4));
        expect_that!(emu.is_halted(), eq(true));
    }

    #[gtest]
    pub fn test_invalid_register_is_not_reported_on_console() {
        let mut emu = emulator_with_program(&[PRN, 9]);
        let (res, output) = run(&mut emu);
        assert!(matches!(
            res,
            Err(ExecutionError::InvalidRegister { index: 9, address: 0 })
        ));
        assert_that!(output, eq(""));
    }

    #[gtest]
    pub fn test_operand_beyond_memory_end() {
        let mut program = vec![NOP; 0xFE];
        program.extend_from_slice(&[LDI, 0]);
        let mut emu = emulator_with_program(&program);
        let (res, _output) = run(&mut emu);
        assert!(matches!(
            res,
            Err(ExecutionError::AddressOutOfRange { address: 0x100, .. })
        ));
        expect_that!(emu.registers().pc, eq(0xFE));
    }

    #[gtest]
    pub fn test_call_ret() {
        // 0: LDI R1,8  3: CALL R1  5: PRN R0  7: HLT  8: LDI R0,42  11: RET
        let mut emu = emulator_with_program(&[LDI, 1, 8, CALL, 1, PRN, 0, HLT, LDI, 0, 42, RET]);
        let mut writer = StringWriter::new();
        emu.step(&mut writer).unwrap();
        emu.step(&mut writer).unwrap();
        expect_that!(emu.registers().pc, eq(8));
        expect_that!(emu.registers().sp(), eq(STACK_START - 1));
        expect_that!(emu.memory().read(u16::from(STACK_START - 1)).unwrap(), eq(5));
        emu.step(&mut writer).unwrap();
        emu.step(&mut writer).unwrap();
        expect_that!(emu.registers().pc, eq(5));
        expect_that!(emu.registers().sp(), eq(STACK_START));
        emu.execute(&mut writer).unwrap();
        assert_that!(writer.get_string(), eq("42\n"));
    }

    #[gtest]
    pub fn test_conditional_jump_not_taken_advances_once() {
        // CMP R0,R1 sets LESS, JEQ R2 falls through to PRN
        let cmp = Opcode::Cmp.bits();
        let jeq = Opcode::Jeq.bits();
        let mut emu =
            emulator_with_program(&[LDI, 1, 1, LDI, 2, 0, cmp, 0, 1, jeq, 2, PRN, 1, HLT]);
        emu.config.max_steps = Some(100);
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(output, eq("1\n"));
    }

    #[gtest]
    pub fn test_step_limit() {
        // 0: LDI R0,0  3: JMP R0
        let mut emu = emulator_with_program(&[LDI, 0, 0, JMP, 0]);
        emu.config.max_steps = Some(10);
        let (res, output) = run(&mut emu);
        assert_eq!(
            res.unwrap_err(),
            ExecutionError::StepLimitExceeded { max_steps: 10 }
        );
        assert_that!(output, eq(""));
        expect_that!(emu.steps(), eq(10));
        expect_that!(emu.is_halted(), eq(true));
    }

    #[gtest]
    pub fn test_trace() {
        let mut emu = emulator_with_program(&[LDI, 0, 8, PRN, 0, HLT]);
        emu.config.trace = true;
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(
            output,
            eq("TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F3\n\
                TRACE: 03 | 47 00 01 | 08 00 00 00 00 00 00 F3\n\
                8\n\
                TRACE: 05 | 01 00 00 | 08 00 00 00 00 00 00 F3\n")
        );
    }

    /// Program enabling the interrupts in `mask`, then spinning at address 9 with `R0` = 9 and
    /// `R1` = 7. `handler` is placed at 0x50.
    fn interrupt_test_program(mask: u8, handler: &[u8]) -> Vec<u8> {
        let mut program = vec![NOP; 0x60];
        // 0: LDI R5,mask  3: LDI R0,9  6: LDI R1,7  9: JMP R0
        program[..11].copy_from_slice(&[LDI, 5, mask, LDI, 0, 9, LDI, 1, 7, JMP, 0]);
        program[0x50..0x50 + handler.len()].copy_from_slice(handler);
        program
    }

    #[gtest]
    pub fn test_interrupt_delivery() {
        let mut emu = emulator_with_program(&interrupt_test_program(1, &[HLT]));
        emu.memory.write(0xF8, 0x50).unwrap();
        let mut writer = StringWriter::new();
        for _ in 0..3 {
            emu.step(&mut writer).unwrap();
        }
        emu.registers.flags = Flags::EQUAL;
        emu.registers.set_interrupt_pending(0);
        emu.step(&mut writer).unwrap();
        expect_that!(emu.registers().pc, eq(0x50));
        expect_that!(emu.registers().interrupt_status(), eq(0));
        let sp = emu.registers().sp();
        expect_that!(sp, eq(STACK_START - 9));
        let stack: Vec<u8> = (sp..STACK_START)
            .map(|a| emu.memory().read(u16::from(a)).unwrap())
            .collect();
        // from top of stack: R6 .. R0, FL, PC
        assert_eq!(stack, vec![0, 1, 0, 0, 0, 7, 9, Flags::EQUAL.bits(), 9]);
    }

    #[gtest]
    pub fn test_keyboard_interrupt() {
        let ld = Opcode::Ld.bits();
        let st = Opcode::St.bits();
        // 0x50: LDI R2,0xF4  0x53: LD R1,R2  0x56: LDI R3,0x80  0x59: ST R3,R1  0x5C: IRET
        let handler = [LDI, 2, KEY_PRESSED_ADDRESS, ld, 1, 2, LDI, 3, 0x80, st, 3, 1, IRET];
        let program = interrupt_test_program(1 << KEYBOARD_INTERRUPT, &handler);
        let keyboard = FakeKeyboardInputProvider::new(&[None, None, None, Some(b'x')]);
        let mut emu = emulator_with_program(&program).with_keyboard(Box::new(keyboard));
        emu.memory.write(0xF9, 0x50).unwrap();
        let mut writer = StringWriter::new();
        // 3 x LDI, delivery, 5 handler instructions, JMP
        for _ in 0..10 {
            emu.step(&mut writer).unwrap();
        }
        expect_that!(
            emu.memory().read(u16::from(KEY_PRESSED_ADDRESS)).unwrap(),
            eq(b'x')
        );
        expect_that!(emu.memory().read(0x80).unwrap(), eq(b'x'));
        // restored by IRET
        expect_that!(emu.registers().get(Register::R1), eq(7));
        expect_that!(emu.registers().sp(), eq(STACK_START));
        expect_that!(emu.registers().pc, eq(9));
    }

    #[gtest]
    pub fn test_ctrl_c_stops_execution() {
        let mut emu = emulator_with_program(&[LDI, 0, 0, JMP, 0])
            .with_keyboard(Box::new(FakeKeyboardInputProvider::interrupted()));
        let (res, output) = run(&mut emu);
        assert_eq!(res.unwrap_err(), ExecutionError::Interrupted);
        assert_that!(output, eq(""));
    }

    fn at_second(second: u8) -> Timestamp {
        Timestamp {
            second,
            ..Timestamp::default()
        }
    }

    #[gtest]
    pub fn test_timer_interrupt() {
        let ld = Opcode::Ld.bits();
        let st = Opcode::St.bits();
        let inc = Opcode::Inc.bits();
        // 0x50: LDI R2,0x80  0x53: LD R3,R2  0x56: INC R3  0x58: ST R2,R3  0x5B: IRET
        let handler = [LDI, 2, 0x80, ld, 3, 2, inc, 3, st, 2, 3, IRET];
        let clock = FakeClock::new(&[at_second(0), at_second(0), at_second(0), at_second(0), at_second(1)]);
        let mut emu = emulator_with_program(&interrupt_test_program(1, &handler))
            .with_clock(Box::new(clock));
        emu.memory.write(0xF8, 0x50).unwrap();
        let mut writer = StringWriter::new();
        // 3 x LDI, JMP, delivery on the tick, 5 handler instructions, the clock stops ticking
        for _ in 0..12 {
            emu.step(&mut writer).unwrap();
        }
        expect_that!(emu.memory().read(0x80).unwrap(), eq(1));
        expect_that!(emu.registers().get(Register::R3), eq(0));
        expect_that!(emu.registers().pc, eq(9));
        expect_that!(emu.registers().sp(), eq(STACK_START));
    }

    /// Handler at 0x50 raises interrupt 1 whose handler at 0x60 prints 1, then prints 0 itself.
    fn nested_interrupt_program() -> Vec<u8> {
        let int = Opcode::Int.bits();
        let mut program = vec![NOP; 0x70];
        // 0: LDI R5,3  3: LDI R0,0  6: INT R0  8: HLT
        program[..9].copy_from_slice(&[LDI, 5, 3, LDI, 0, 0, int, 0, HLT]);
        // 0x50: LDI R0,1  0x53: INT R0  0x55: LDI R2,'0'  0x58: PRA R2  0x5A: IRET
        program[0x50..0x5B].copy_from_slice(&[LDI, 0, 1, int, 0, LDI, 2, b'0', PRA, 2, IRET]);
        // 0x60: LDI R2,'1'  0x63: PRA R2  0x65: IRET
        program[0x60..0x66].copy_from_slice(&[LDI, 2, b'1', PRA, 2, IRET]);
        program
    }

    /// IRET restores IS as saved on delivery, an interrupt raised inside a masked handler is lost.
    #[gtest]
    pub fn test_masked_interrupts_are_not_delivered_in_handler() {
        let mut emu = emulator_with_program(&nested_interrupt_program());
        emu.memory.write(0xF8, 0x50).unwrap();
        emu.memory.write(0xF9, 0x60).unwrap();
        emu.config.max_steps = Some(100);
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(output, eq("0\n"));
        expect_that!(emu.registers().sp(), eq(STACK_START));
    }

    #[gtest]
    pub fn test_nested_interrupts() {
        let mut emu = emulator_with_program(&nested_interrupt_program());
        emu.memory.write(0xF8, 0x50).unwrap();
        emu.memory.write(0xF9, 0x60).unwrap();
        emu.config.max_steps = Some(100);
        emu.config.interrupt_nesting = InterruptNesting::Nested;
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(output, eq("1\n0\n"));
        expect_that!(emu.registers().sp(), eq(STACK_START));
    }

    fn run_program_file(source: &str) -> String {
        let program = loader::parse_program(source).unwrap();
        let mut emu = emulator_with_program(&program);
        emu.config.max_steps = Some(1000);
        let (res, output) = run(&mut emu);
        assert!(res.is_ok(), "{res:?}");
        output
    }

    #[gtest]
    pub fn test_programs() {
        expect_that!(
            run_program_file(include_str!("../../programs/print8.ls8")),
            eq("8\n")
        );
        expect_that!(
            run_program_file(include_str!("../../programs/mult.ls8")),
            eq("72\n")
        );
        expect_that!(
            run_program_file(include_str!("../../programs/call.ls8")),
            eq("20\n30\n36\n")
        );
        expect_that!(
            run_program_file(include_str!("../../programs/stack.ls8")),
            eq("3\n2\n1\n")
        );
        expect_that!(
            run_program_file(include_str!("../../programs/sctest.ls8")),
            eq("1\n2\n3\n4\n5\n")
        );
        expect_that!(
            run_program_file(include_str!("../../programs/interrupts.ls8")),
            eq("A\nB\n")
        );
    }

    #[gtest]
    pub fn test_from_program() {
        let mut emu =
            from_program(Path::new("programs/mult.ls8"), EmulatorConfig::default()).unwrap();
        expect_that!(emu.memory().program_slice().len(), eq(12));
        let (res, output) = run(&mut emu);
        assert!(res.is_ok());
        assert_that!(output, eq("72\n"));
    }
}

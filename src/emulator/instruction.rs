use crate::emulator::alu::AluInstruction;
use crate::errors::ExecutionError;
use crate::hardware::registers::{Flags, Register};
use std::fmt::{Display, Formatter};

/// LS-8 opcodes, format is `AABCDDDD`:
/// - `AA`: number of operands
/// - `B`: 1 for ALU operations
/// - `C`: 1 if the instruction sets the PC itself
/// - `DDDD`: instruction identifier
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, enumn::N, displaydoc::Display)]
pub enum Opcode {
    /// ADD
    Add = 0b1010_0000,
    /// AND
    And = 0b1010_1000,
    /// CALL
    Call = 0b0101_0000,
    /// CMP
    Cmp = 0b1010_0111,
    /// DEC
    Dec = 0b0110_0110,
    /// DIV
    Div = 0b1010_0011,
    /// HLT
    Hlt = 0b0000_0001,
    /// INC
    Inc = 0b0110_0101,
    /// INT
    Int = 0b0101_0010,
    /// IRET
    Iret = 0b0001_0011,
    /// JEQ
    Jeq = 0b0101_0101,
    /// JGE
    Jge = 0b0101_1010,
    /// JGT
    Jgt = 0b0101_0111,
    /// JLE
    Jle = 0b0101_1001,
    /// JLT
    Jlt = 0b0101_1000,
    /// JMP
    Jmp = 0b0101_0100,
    /// JNE
    Jne = 0b0101_0110,
    /// LD
    Ld = 0b1000_0011,
    /// LDI
    Ldi = 0b1000_0010,
    /// MOD
    Mod = 0b1010_0100,
    /// MUL
    Mul = 0b1010_0010,
    /// NOP
    Nop = 0b0000_0000,
    /// NOT
    Not = 0b0110_1001,
    /// OR
    Or = 0b1010_1010,
    /// POP
    Pop = 0b0100_0110,
    /// PRA
    Pra = 0b0100_1000,
    /// PRN
    Prn = 0b0100_0111,
    /// PUSH
    Push = 0b0100_0101,
    /// RET
    Ret = 0b0001_0001,
    /// SHL
    Shl = 0b1010_1100,
    /// SHR
    Shr = 0b1010_1101,
    /// ST
    St = 0b1000_0100,
    /// SUB
    Sub = 0b1010_0001,
    /// XOR
    Xor = 0b1010_1011,
}

impl Opcode {
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
    /// Operand bytes following the opcode: `00` → 0, `01` → 1, `10` and `11` → 2.
    #[must_use]
    pub const fn operand_count(self) -> u8 {
        match self.bits() >> 6 {
            0 => 0,
            1 => 1,
            _ => 2,
        }
    }
    /// Full width of the instruction in memory.
    #[must_use]
    pub const fn width(self) -> u8 {
        1 + self.operand_count()
    }
    #[must_use]
    pub const fn is_alu(self) -> bool {
        self.bits() & 0b0010_0000 != 0
    }
    /// Instructions which reposition the PC themselves, the engine must not advance it for them.
    #[must_use]
    pub const fn sets_pc(self) -> bool {
        self.bits() & 0b0001_0000 != 0
    }
}

/// Flag predicate of the jump instructions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Condition {
    #[must_use]
    pub const fn holds(self, flags: Flags) -> bool {
        match self {
            Self::Always => true,
            Self::Equal => flags.contains(Flags::EQUAL),
            Self::NotEqual => !flags.contains(Flags::EQUAL),
            Self::Greater => flags.contains(Flags::GREATER),
            Self::Less => flags.contains(Flags::LESS),
            Self::GreaterOrEqual => flags.intersects(Flags::GREATER.union(Flags::EQUAL)),
            Self::LessOrEqual => flags.intersects(Flags::LESS.union(Flags::EQUAL)),
        }
    }
    const fn opcode(self) -> Opcode {
        match self {
            Self::Always => Opcode::Jmp,
            Self::Equal => Opcode::Jeq,
            Self::NotEqual => Opcode::Jne,
            Self::Greater => Opcode::Jgt,
            Self::Less => Opcode::Jlt,
            Self::GreaterOrEqual => Opcode::Jge,
            Self::LessOrEqual => Opcode::Jle,
        }
    }
}

/// A decoded instruction carrying exactly its operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Hlt,
    Ret,
    Iret,
    Call(Register),
    Int(Register),
    Jump(Condition, Register),
    Push(Register),
    Pop(Register),
    Prn(Register),
    Pra(Register),
    /// `LD rA, rB`: loads `rA` from the address in `rB`
    Ld(Register, Register),
    /// `LDI r, immediate`
    Ldi(Register, u8),
    /// `ST rA, rB`: stores `rB` at the address in `rA`
    St(Register, Register),
    Alu(AluInstruction),
}

impl Instruction {
    /// Builds the instruction for `opcode` from its operand bytes.
    ///
    /// # Parameters
    /// - `operands`: the `opcode.operand_count()` bytes following the opcode
    /// - `address`: address of the opcode, used for error reporting
    ///
    /// # Errors
    /// - a register operand is not in the range 0..=7
    ///
    /// # Panics
    /// - `operands` holds fewer bytes than `opcode.operand_count()`
    pub fn decode(opcode: Opcode, operands: &[u8], address: u8) -> Result<Self, ExecutionError> {
        debug_assert!(
            operands.len() >= usize::from(opcode.operand_count()),
            "{opcode} needs {} operands, got {operands:?}",
            opcode.operand_count()
        );
        let reg = |idx: usize| -> Result<Register, ExecutionError> {
            let index = operands[idx];
            Register::n(index).ok_or(ExecutionError::InvalidRegister { index, address })
        };
        let jump = |condition: Condition| -> Result<Self, ExecutionError> {
            Ok(Self::Jump(condition, reg(0)?))
        };
        let alu = |op: fn(Register, Register) -> AluInstruction| -> Result<Self, ExecutionError> {
            Ok(Self::Alu(op(reg(0)?, reg(1)?)))
        };
        let alu_unary = |op: fn(Register) -> AluInstruction| -> Result<Self, ExecutionError> {
            Ok(Self::Alu(op(reg(0)?)))
        };
        match opcode {
            Opcode::Nop => Ok(Self::Nop),
            Opcode::Hlt => Ok(Self::Hlt),
            Opcode::Ret => Ok(Self::Ret),
            Opcode::Iret => Ok(Self::Iret),
            Opcode::Call => Ok(Self::Call(reg(0)?)),
            Opcode::Int => Ok(Self::Int(reg(0)?)),
            Opcode::Jmp => jump(Condition::Always),
            Opcode::Jeq => jump(Condition::Equal),
            Opcode::Jne => jump(Condition::NotEqual),
            Opcode::Jgt => jump(Condition::Greater),
            Opcode::Jlt => jump(Condition::Less),
            Opcode::Jge => jump(Condition::GreaterOrEqual),
            Opcode::Jle => jump(Condition::LessOrEqual),
            Opcode::Push => Ok(Self::Push(reg(0)?)),
            Opcode::Pop => Ok(Self::Pop(reg(0)?)),
            Opcode::Prn => Ok(Self::Prn(reg(0)?)),
            Opcode::Pra => Ok(Self::Pra(reg(0)?)),
            Opcode::Ld => Ok(Self::Ld(reg(0)?, reg(1)?)),
            Opcode::Ldi => Ok(Self::Ldi(reg(0)?, operands[1])),
            Opcode::St => Ok(Self::St(reg(0)?, reg(1)?)),
            Opcode::Add => alu(AluInstruction::Add),
            Opcode::Sub => alu(AluInstruction::Sub),
            Opcode::Mul => alu(AluInstruction::Mul),
            Opcode::Div => alu(AluInstruction::Div),
            Opcode::Mod => alu(AluInstruction::Mod),
            Opcode::And => alu(AluInstruction::And),
            Opcode::Or => alu(AluInstruction::Or),
            Opcode::Xor => alu(AluInstruction::Xor),
            Opcode::Shl => alu(AluInstruction::Shl),
            Opcode::Shr => alu(AluInstruction::Shr),
            Opcode::Cmp => alu(AluInstruction::Cmp),
            Opcode::Not => alu_unary(AluInstruction::Not),
            Opcode::Inc => alu_unary(AluInstruction::Inc),
            Opcode::Dec => alu_unary(AluInstruction::Dec),
        }
    }

    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Nop => Opcode::Nop,
            Self::Hlt => Opcode::Hlt,
            Self::Ret => Opcode::Ret,
            Self::Iret => Opcode::Iret,
            Self::Call(_) => Opcode::Call,
            Self::Int(_) => Opcode::Int,
            Self::Jump(condition, _) => condition.opcode(),
            Self::Push(_) => Opcode::Push,
            Self::Pop(_) => Opcode::Pop,
            Self::Prn(_) => Opcode::Prn,
            Self::Pra(_) => Opcode::Pra,
            Self::Ld(..) => Opcode::Ld,
            Self::Ldi(..) => Opcode::Ldi,
            Self::St(..) => Opcode::St,
            Self::Alu(alu) => match alu {
                AluInstruction::Add(..) => Opcode::Add,
                AluInstruction::Sub(..) => Opcode::Sub,
                AluInstruction::Mul(..) => Opcode::Mul,
                AluInstruction::Div(..) => Opcode::Div,
                AluInstruction::Mod(..) => Opcode::Mod,
                AluInstruction::And(..) => Opcode::And,
                AluInstruction::Or(..) => Opcode::Or,
                AluInstruction::Xor(..) => Opcode::Xor,
                AluInstruction::Shl(..) => Opcode::Shl,
                AluInstruction::Shr(..) => Opcode::Shr,
                AluInstruction::Cmp(..) => Opcode::Cmp,
                AluInstruction::Not(_) => Opcode::Not,
                AluInstruction::Inc(_) => Opcode::Inc,
                AluInstruction::Dec(_) => Opcode::Dec,
            },
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nop | Self::Hlt | Self::Ret | Self::Iret => write!(f, "{}", self.opcode()),
            Self::Call(r)
            | Self::Int(r)
            | Self::Jump(_, r)
            | Self::Push(r)
            | Self::Pop(r)
            | Self::Prn(r)
            | Self::Pra(r) => write!(f, "{} {r}", self.opcode()),
            Self::Ld(a, b) | Self::St(a, b) => write!(f, "{} {a}, {b}", self.opcode()),
            Self::Ldi(r, immediate) => write!(f, "LDI {r}, {immediate}"),
            Self::Alu(alu) => write!(f, "{alu}"),
        }
    }
}

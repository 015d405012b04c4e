#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, ValueHint};
use crossterm::tty::IsTty;
use ls8_emulator::config::{EmulatorConfig, InterruptNesting};
use ls8_emulator::emulator;
use ls8_emulator::hardware::keyboard::TerminalInputProvider;
use ls8_emulator::terminal::{self, RawModeWriter};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::filter::EnvFilter;

/// Runs an LS-8 program image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opt {
    /// Program image, one 8 digit binary byte per line
    #[arg(value_hint = ValueHint::FilePath)]
    program: PathBuf,

    /// Print PC, the next three bytes and all registers before each instruction
    #[arg(short, long, action = ArgAction::SetTrue)]
    trace: bool,

    /// Stop after this many machine cycles if the program did not halt
    #[arg(long)]
    max_steps: Option<u64>,

    /// Allow interrupt handlers to be interrupted before IRET
    #[arg(long, action = ArgAction::SetTrue)]
    nested_interrupts: bool,

    /// Do not poll the keyboard, the terminal is left in its normal mode
    #[arg(long, action = ArgAction::SetTrue)]
    no_keyboard: bool,

    /// Increase the level of verbosity. Can be used multiple times.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Opt {
    const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "ls8_emulator=info,warn",
            2 => "ls8_emulator=debug,info",
            3..=u8::MAX => "trace",
        }
    }

    fn filter_layer(&self) -> EnvFilter {
        // Parse log level from env, or infer from args
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_filter()))
    }

    fn config(&self) -> EmulatorConfig {
        EmulatorConfig {
            trace: self.trace,
            interrupt_nesting: if self.nested_interrupts {
                InterruptNesting::Nested
            } else {
                InterruptNesting::Masked
            },
            max_steps: self.max_steps,
        }
    }
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    // logs go to stderr, stdout belongs to the program
    tracing_subscriber::fmt()
        .with_env_filter(opt.filter_layer())
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let mut emu = match emulator::from_program(&opt.program, opt.config()) {
        Ok(emu) => emu,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let use_keyboard = !opt.no_keyboard && io::stdin().is_tty();
    let res = if use_keyboard {
        match terminal::set_terminal_raw() {
            Ok(_lock) => {
                let mut emu = emu.with_keyboard(Box::new(TerminalInputProvider::new()));
                emu.execute(&mut RawModeWriter::new(io::stdout()))
            }
            Err(e) => {
                warn!("Could not set terminal to raw mode, keyboard disabled: {e}");
                emu.execute(&mut io::stdout())
            }
        }
    } else {
        emu.execute(&mut io::stdout())
    };

    match res {
        Ok(()) => {
            info!("End of program");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

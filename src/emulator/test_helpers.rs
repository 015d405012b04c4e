use crate::config::EmulatorConfig;
use crate::emulator;
use crate::emulator::Emulator;
use crate::hardware::clock::{Clock, Timestamp};
use crate::hardware::keyboard::KeyboardInputProvider;
use std::collections::VecDeque;
use std::io;
use std::io::Write;

pub struct StringWriter {
    vec: Vec<u8>,
}
impl Write for StringWriter {
    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.vec.write(data)
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}
impl StringWriter {
    pub fn new() -> Self {
        let vec = Vec::<u8>::with_capacity(120);
        Self { vec }
    }
    pub fn get_string(&self) -> String {
        String::from_utf8(self.vec.clone()).unwrap()
    }
}

/// Provides one scripted poll result per call, `None` once the script is exhausted.
pub struct FakeKeyboardInputProvider {
    keys: VecDeque<Option<u8>>,
    is_interrupted: bool,
}
impl FakeKeyboardInputProvider {
    pub fn new(keys: &[Option<u8>]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            is_interrupted: false,
        }
    }
    /// Behaves as if CTRL-C was pressed before the first poll.
    pub fn interrupted() -> Self {
        Self {
            keys: VecDeque::new(),
            is_interrupted: true,
        }
    }
}
impl KeyboardInputProvider for FakeKeyboardInputProvider {
    fn poll_key(&mut self) -> io::Result<Option<u8>> {
        Ok(self.keys.pop_front().flatten())
    }
    fn is_interrupted(&self) -> bool {
        self.is_interrupted
    }
}

/// Returns the scripted timestamps one per call, repeating the last one forever.
pub struct FakeClock {
    samples: VecDeque<Timestamp>,
    last: Timestamp,
}
impl FakeClock {
    pub fn new(samples: &[Timestamp]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            last: Timestamp::default(),
        }
    }
}
impl Clock for FakeClock {
    fn now(&mut self) -> Timestamp {
        if let Some(sample) = self.samples.pop_front() {
            self.last = sample;
        }
        self.last
    }
}

/// Emulator with `program` loaded, a clock that never ticks and no keyboard.
pub fn emulator_with_program(program: &[u8]) -> Emulator {
    emulator::from_program_bytes(program, EmulatorConfig::default())
        .unwrap()
        .with_clock(Box::new(FakeClock::new(&[])))
}

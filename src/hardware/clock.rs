use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock time quantized into the fields the timer interrupts are derived from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    /// year mod 100
    pub year: u8,
}

/// Interrupt numbers raised when the corresponding time field changes.
/// Interrupt 1 is taken by the keyboard.
pub const SECOND_INTERRUPT: u8 = 0;
pub const MINUTE_INTERRUPT: u8 = 2;
pub const HOUR_INTERRUPT: u8 = 3;
pub const DAY_INTERRUPT: u8 = 4;
pub const MONTH_INTERRUPT: u8 = 5;
pub const YEAR_INTERRUPT: u8 = 6;

impl Timestamp {
    /// Bit mask of the timer interrupts for all fields differing between `self` and `previous`.
    #[must_use]
    pub const fn changed_interrupts(&self, previous: &Self) -> u8 {
        let mut pending = 0;
        if self.second != previous.second {
            pending |= 1 << SECOND_INTERRUPT;
        }
        if self.minute != previous.minute {
            pending |= 1 << MINUTE_INTERRUPT;
        }
        if self.hour != previous.hour {
            pending |= 1 << HOUR_INTERRUPT;
        }
        if self.day != previous.day {
            pending |= 1 << DAY_INTERRUPT;
        }
        if self.month != previous.month {
            pending |= 1 << MONTH_INTERRUPT;
        }
        if self.year != previous.year {
            pending |= 1 << YEAR_INTERRUPT;
        }
        pending
    }

    /// Splits seconds since the Unix epoch into UTC calendar fields.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "every field is reduced below 100 before the cast"
    )]
    pub const fn from_unix_seconds(secs: u64) -> Self {
        let (year, month, day) = days_to_date(secs / 86400);
        Self {
            second: (secs % 60) as u8,
            minute: ((secs / 60) % 60) as u8,
            hour: ((secs / 3600) % 24) as u8,
            day: day as u8,
            month: month as u8,
            year: (year % 100) as u8,
        }
    }
}

/// Converts days since Unix epoch to (year, month, day).
/// Algorithm based on Howard Hinnant's date algorithms.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "day of era and year of era are non negative and small"
)]
const fn days_to_date(days: u64) -> (u64, u32, u32) {
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as u64, m, d)
}

/// Source of the current time, polled once per machine cycle.
pub trait Clock {
    fn now(&mut self) -> Timestamp;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&mut self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Timestamp::from_unix_seconds(secs)
    }
}

/// Turns successive clock samples into timer interrupt edges.
#[derive(Debug, Default)]
pub struct TimerEdgeDetector {
    previous: Option<Timestamp>,
}

impl TimerEdgeDetector {
    /// Returns the mask of timer interrupts to raise for `now`.
    /// The first sample only primes the detector.
    pub fn sample(&mut self, now: Timestamp) -> u8 {
        let pending = self
            .previous
            .map_or(0, |previous| now.changed_interrupts(&previous));
        self.previous = Some(now);
        pending
    }
}

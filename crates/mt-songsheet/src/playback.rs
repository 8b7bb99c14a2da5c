//! Playback cursor maths for filled songsheets.
//!
//! An editor calls `playback-step` repeatedly with its cursor position; each
//! call waits a quarter hump and answers with the motion that moves the
//! cursor one character further along the song's sines. Timed sines (those
//! with a `mm:ss.cc` line) anchor the tempo.

use std::time::Duration;

use crate::filled::{AnnotatedSine, PlaybackTime, CHARS_PER_HUMP};
use crate::{Error, Result};

/// Line offset from the first line of a sine to the line the cursor rides.
const MIDDLE_LINE_OFFSET: usize = 2;

/// A sine and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSine {
    pub line: usize,
    pub sine: AnnotatedSine,
}

impl LocatedSine {
    fn chars(&self) -> usize {
        (self.sine.total_humps() * CHARS_PER_HUMP) as usize
    }
}

/// Find every sine in a song by attempting a parse at each line.
pub fn locate_sines(lines: &[&str]) -> Vec<LocatedSine> {
    (0..lines.len())
        .filter_map(|line| {
            AnnotatedSine::parse(&lines[line..]).map(|(sine, _)| LocatedSine { line, sine })
        })
        .collect()
}

/// The sines around a cursor and the tempo between their timestamps.
#[derive(Debug, Clone)]
pub struct Playback {
    sines: Vec<LocatedSine>,
    current: usize,
    start: usize,
    start_time: PlaybackTime,
    quarter_hump: Duration,
}

impl Playback {
    /// Resolve the playback span for a cursor on line `y` (0-based).
    ///
    /// The current sine is the last one starting at or above `y`, or the
    /// first sine when the cursor is above them all.
    pub fn new(text: &str, y: usize) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let sines = locate_sines(&lines);
        if sines.len() < 2 {
            return Err(Error::Playback(format!(
                "need at least two sines, found {}",
                sines.len()
            )));
        }

        let current = sines.iter().rposition(|s| s.line <= y).unwrap_or(0);
        let start = sines[..=current]
            .iter()
            .rposition(|s| s.sine.playback.is_some())
            .ok_or_else(|| {
                Error::Playback(format!("no timed sine at or before line {}", y))
            })?;
        let end = sines[current + 1..]
            .iter()
            .position(|s| s.sine.playback.is_some())
            .map(|i| i + current + 1)
            .ok_or_else(|| Error::Playback(format!("no timed sine after line {}", y)))?;

        let (Some(start_time), Some(end_time)) = (sines[start].sine.playback, sines[end].sine.playback)
        else {
            return Err(Error::Playback("sine lost its time".to_string()));
        };
        if end_time <= start_time {
            return Err(Error::Playback(format!(
                "times must increase, {} is not before {}",
                start_time, end_time
            )));
        }

        // The end sine's time marks its first character, so its own humps
        // are not part of the span.
        let humps: f64 = sines[start..end].iter().map(|s| s.sine.total_humps()).sum();
        if humps <= 0.0 {
            return Err(Error::Playback("no humps between timed sines".to_string()));
        }
        let span = (end_time.as_duration() - start_time.as_duration()).as_secs_f64();
        let quarter_hump = Duration::from_secs_f64(span / humps / CHARS_PER_HUMP);
        log::debug!(
            "sines {}..{} span {} humps, {:?} per character",
            start,
            end,
            humps,
            quarter_hump
        );

        Ok(Self {
            sines,
            current,
            start,
            start_time,
            quarter_hump,
        })
    }

    /// Time per character along a sine.
    #[inline]
    pub fn quarter_hump(&self) -> Duration {
        self.quarter_hump
    }

    /// Move `moves` characters on from column `x` of the current sine.
    ///
    /// Returns the new `(x, y)` position on a sine's middle line, continuing
    /// onto following sines at column 0, or `None` once past the last sine.
    pub fn step(&self, x: usize, moves: usize) -> Option<(usize, usize)> {
        let mut x = x + moves;
        for located in &self.sines[self.current..] {
            let chars = located.chars();
            if x <= chars {
                return Some((x, located.line + MIDDLE_LINE_OFFSET));
            }
            x -= chars;
        }
        None
    }

    /// Interpolated recording time at column `x` of the current sine.
    pub fn time_at(&self, x: usize) -> PlaybackTime {
        let before: usize = self.sines[self.start..self.current]
            .iter()
            .map(LocatedSine::chars)
            .sum();
        let quarters = u32::try_from(before.saturating_add(x)).unwrap_or(u32::MAX);
        let offset = self.quarter_hump.saturating_mul(quarters);
        PlaybackTime::from_duration(self.start_time.as_duration().saturating_add(offset))
    }
}

/// Characters to advance after `elapsed` of computation, and how long to
/// wait before doing so.
pub fn moves_for(elapsed: Duration, quarter: Duration) -> (usize, Duration) {
    if quarter.is_zero() {
        return (1, Duration::ZERO);
    }
    if elapsed <= quarter {
        return (1, quarter - elapsed);
    }

    let quarter_nanos = quarter.as_nanos();
    let overran = (elapsed.as_nanos() / quarter_nanos) as usize;
    let into_next = (elapsed.as_nanos() % quarter_nanos) as u64;
    (1 + overran, quarter - Duration::from_nanos(into_next))
}

/// The vim keys that put the cursor at `pos`, or escape at the end.
pub fn vim_motion(pos: Option<(usize, usize)>) -> String {
    match pos {
        Some((x, y)) => format!("{}gg{}l", y, x.saturating_sub(1)),
        None => "<esc>".to_string(),
    }
}

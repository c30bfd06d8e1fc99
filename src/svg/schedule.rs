//! Animation delays: dots first, then strokes.
//!
//! ```text
//! dot i     : i * dot_step
//! stroke j  : dots * dot_step + dot_duration + j * stroke_step
//! ```
//!
//! Delays are exact `Duration`s so serialized values carry no float noise.

use serde::{Serialize, Serializer};
use std::time::Duration;

/// Step and length of each animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay between consecutive dots.
    pub dot_step: Duration,
    /// Length of one dot's fade-in.
    pub dot_duration: Duration,
    /// Delay between consecutive strokes.
    pub stroke_step: Duration,
    /// Length of one stroke's draw.
    pub stroke_duration: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dot_step: Duration::from_millis(10),
            dot_duration: Duration::from_millis(300),
            stroke_step: Duration::from_millis(100),
            stroke_duration: Duration::from_millis(2000),
        }
    }
}

/// Per-element start delays, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSchedule {
    #[serde(serialize_with = "seconds_list")]
    dots: Vec<Duration>,
    #[serde(serialize_with = "seconds_list")]
    strokes: Vec<Duration>,
    #[serde(serialize_with = "seconds")]
    total: Duration,
}

#[inline]
fn times(step: Duration, n: usize) -> Duration {
    step.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}

impl AnimationSchedule {
    pub fn new(dot_count: usize, stroke_count: usize, timing: &Timing) -> Self {
        let dots: Vec<_> = (0..dot_count).map(|i| times(timing.dot_step, i)).collect();

        let strokes_start = times(timing.dot_step, dot_count).saturating_add(timing.dot_duration);
        let strokes: Vec<_> = (0..stroke_count)
            .map(|j| strokes_start.saturating_add(times(timing.stroke_step, j)))
            .collect();

        let total = match strokes.last() {
            Some(last) => last.saturating_add(timing.stroke_duration),
            None if dot_count > 0 => strokes_start,
            None => Duration::ZERO,
        };

        Self {
            dots,
            strokes,
            total,
        }
    }

    pub fn dot_delay(&self, index: usize) -> Option<Duration> {
        self.dots.get(index).copied()
    }

    pub fn stroke_delay(&self, index: usize) -> Option<Duration> {
        self.strokes.get(index).copied()
    }

    #[cfg(test)]
    pub fn dots(&self) -> &[Duration] {
        &self.dots
    }

    #[cfg(test)]
    pub fn strokes(&self) -> &[Duration] {
        &self.strokes
    }

    /// When the last animation finishes.
    #[cfg(test)]
    pub fn total(&self) -> Duration {
        self.total
    }
}

/// Format a duration as CSS seconds: `10ms -> "0.01s"`, `2000ms -> "2s"`.
pub fn format_seconds(d: Duration) -> String {
    let millis = d.as_millis();
    let (secs, frac) = (millis / 1000, millis % 1000);
    if frac == 0 {
        return format!("{secs}s");
    }
    let frac = format!("{frac:03}");
    format!("{secs}.{}s", frac.trim_end_matches('0'))
}

fn seconds<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

fn seconds_list<S: Serializer>(list: &[Duration], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(list.iter().map(Duration::as_secs_f64))
}

//! Display helpers for addresses and the hero stat counters.

/// `0x1234...5678` form of an address: the first six and last four characters.
/// Short inputs are not special-cased, so the two halves may overlap.
pub fn format_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

/// Compact stat label: `1.5M+`, `25K+`, or the plain number.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        // Rounds the binary quotient like `toFixed(1)`: 1.15 is stored just
        // below and shows 1.1. Quotients that are exact ties (1.25, 1.75) round up.
        let exact_tie = n % 100_000 == 50_000 && (n / 50_000) % 5 == 0;
        if exact_tie {
            let tenths = n / 100_000 + 1;
            format!("{}.{}M+", tenths / 10, tenths % 10)
        } else {
            format!("{:.1}M+", n as f64 / 1_000_000.0)
        }
    } else if n >= 1_000 {
        let thousands = (n as f64 / 1_000.0).round();
        format!("{thousands:.0}K+")
    } else {
        n.to_string()
    }
}

pub const COUNTER_DURATION_MS: u32 = 2_000;
pub const COUNTER_FRAME_MS: u32 = 16;

/// Labels for a counter counting up from zero to `target`, one per frame.
/// The last label is always the formatted target.
#[derive(Debug, Clone)]
pub struct CounterFrames {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterFrames {
    pub fn new(target: u64) -> Self {
        Self::with_duration(target, COUNTER_DURATION_MS)
    }

    pub fn with_duration(target: u64, duration_ms: u32) -> Self {
        let frames = (duration_ms as f64 / COUNTER_FRAME_MS as f64).max(1.0);
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }
}

impl Iterator for CounterFrames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
            Some(format_number(self.target))
        } else {
            Some(format_number(self.current.floor() as u64))
        }
    }
}

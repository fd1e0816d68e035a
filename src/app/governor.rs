//! Speed governor: bounds every commanded drive speed.
//!
//! The motor PWM channel runs at 8-bit resolution, so the governed speed
//! is also the duty written to the H-bridge enable line.

/// Highest speed (and motor duty) the vehicle will accept.
pub const SPEED_MAX: u8 = 255;

/// Pure clamping/parsing policy for drive speed.  Carries no state.
pub struct SpeedGovernor;

impl SpeedGovernor {
    /// Bound `requested` to `0..=SPEED_MAX`.
    pub fn clamp(requested: i64) -> u8 {
        requested.clamp(0, SPEED_MAX as i64) as u8
    }

    /// Parse a text parameter and govern it.
    pub fn parse(raw: &str) -> u8 {
        Self::clamp(Self::requested(raw))
    }

    /// Interpret a text parameter as a requested (ungoverned) speed.
    ///
    /// Leading whitespace and an optional sign are accepted, then the
    /// leading run of digits is taken; anything after it is ignored.
    /// Input with no leading digits yields `0` rather than an error, so
    /// the vehicle always ends in a defined state.
    pub fn requested(raw: &str) -> i64 {
        let s = raw.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let value = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0i64, |acc, b| {
                acc.saturating_mul(10).saturating_add((b - b'0') as i64)
            });

        if negative { -value } else { value }
    }
}

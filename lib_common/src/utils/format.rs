//! # Display Formatting
//!
//! Turns raw readings into the exact strings written to render targets.
//! Missing or non-finite inputs always render as [`PLACEHOLDER`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::locale::Locale;

/// Text shown in place of a value that is absent or not a number.
pub const PLACEHOLDER: &str = "--";

/// Formats a price with a fixed number of decimals and `,` thousands separators.
///
/// `format_price(Some(1234.5), 2)` yields `"1,234.50"`, `format_price(None, 2)`
/// yields `"--"`.
pub fn format_price(value: Option<f64>, decimals: usize) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };

    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if v.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Formats a value with an explicit sign, `decimals` places and a suffix.
///
/// Zero and positive values get a leading `+`; negative zero is treated as zero.
pub fn format_signed(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let v = if v == 0.0 { 0.0 } else { v };
    let sign = if v >= 0.0 { "+" } else { "" };
    format!("{sign}{v:.decimals$}{suffix}")
}

/// Percentage change with two decimals, always signed: `+0.00%`, `-3.46%`.
pub fn format_change(value: Option<f64>) -> String {
    format_signed(value, 2, "%")
}

/// Directional styling applied to a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Positive movement.
    Up,
    /// Negative movement.
    Down,
    /// No movement, or a value that carries no direction.
    Neutral,
}

impl Tone {
    /// Picks the tone for a signed value. `NaN` is neutral.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Up
        } else if value < 0.0 {
            Tone::Down
        } else {
            Tone::Neutral
        }
    }

    /// The style class name of this tone.
    pub fn class_name(&self) -> &'static str {
        match self {
            Tone::Up => "up",
            Tone::Down => "down",
            Tone::Neutral => "neutral",
        }
    }
}

/// Time left until the next funding settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Whole hours and leftover whole minutes still to go.
    Remaining {
        /// Whole hours.
        hours: i64,
        /// Whole minutes after the hours.
        minutes: i64,
    },
    /// The settlement instant has been reached or passed.
    Settling,
}

impl Countdown {
    /// Computes the countdown from `now` to `next`.
    pub fn until(next: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let ms = (next - now).num_milliseconds();
        if ms <= 0 {
            return Countdown::Settling;
        }
        Countdown::Remaining {
            hours: ms / 3_600_000,
            minutes: (ms % 3_600_000) / 60_000,
        }
    }

    /// `1h30m`, or the locale's settling label once the deadline has passed.
    pub fn label(&self, locale: Locale) -> String {
        match self {
            Countdown::Remaining { hours, minutes } => format!("{hours}h{minutes}m"),
            Countdown::Settling => locale.settling().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn price_groups_thousands() {
        assert_eq!(format_price(Some(1234.5), 2), "1,234.50");
        assert_eq!(format_price(Some(98_765_432.1), 2), "98,765,432.10");
        assert_eq!(format_price(Some(999.999), 2), "1,000.00");
        assert_eq!(format_price(Some(104.1234), 3), "104.123");
        assert_eq!(format_price(Some(-1234.0), 0), "-1,234");
    }

    #[test]
    fn price_placeholder_for_missing_values() {
        assert_eq!(format_price(None, 2), "--");
        assert_eq!(format_price(Some(f64::NAN), 2), "--");
        assert_eq!(format_price(Some(f64::INFINITY), 2), "--");
    }

    #[test]
    fn change_is_always_signed() {
        assert_eq!(format_change(Some(0.0)), "+0.00%");
        assert_eq!(format_change(Some(-0.0)), "+0.00%");
        assert_eq!(format_change(Some(-3.456)), "-3.46%");
        assert_eq!(format_change(Some(1.2)), "+1.20%");
        assert_eq!(format_change(None), "--");
    }

    #[test]
    fn signed_with_four_decimals() {
        assert_eq!(format_signed(Some(0.012345), 4, "%"), "+0.0123%");
        assert_eq!(format_signed(Some(-0.05), 4, "%"), "-0.0500%");
    }

    #[test]
    fn tone_follows_sign() {
        assert_eq!(Tone::of(0.3), Tone::Up);
        assert_eq!(Tone::of(-0.3), Tone::Down);
        assert_eq!(Tone::of(0.0), Tone::Neutral);
        assert_eq!(Tone::of(f64::NAN), Tone::Neutral);
        assert_eq!(Tone::Down.class_name(), "down");
    }

    #[test]
    fn countdown_ninety_minutes() {
        let now = Utc::now();
        let c = Countdown::until(now + Duration::minutes(90), now);
        assert_eq!(c, Countdown::Remaining { hours: 1, minutes: 30 });
        assert_eq!(c.label(Locale::En), "1h30m");
    }

    #[test]
    fn countdown_floors_partial_minutes() {
        let now = Utc::now();
        let c = Countdown::until(now + Duration::seconds(7 * 3600 + 59 * 60 + 59), now);
        assert_eq!(c.label(Locale::En), "7h59m");
    }

    #[test]
    fn countdown_settles_at_or_after_deadline() {
        let now = Utc::now();
        assert_eq!(Countdown::until(now, now), Countdown::Settling);
        assert_eq!(Countdown::until(now - Duration::minutes(5), now), Countdown::Settling);
        assert_eq!(Countdown::Settling.label(Locale::En), "settling");
        assert_eq!(Countdown::Settling.label(Locale::ZhCn), "结算中");
    }
}

// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Number formatting
//!
//! Locale-aware formatting belongs to the host. The engine only needs a
//! fixed number of fraction digits and an optional narrow unit, so the seam
//! is a single method. [`PlainFormatter`] renders the en-US shape.

use std::fmt;

/// Units a metric value can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Seconds
    Second,
    /// Milliseconds
    Millisecond,
}

impl Unit {
    /// Narrow unit symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Second => "s",
            Unit::Millisecond => "ms",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Trait for host number formatting
pub trait NumberFormatter {
    /// Format `value` with exactly `digits` fraction digits and an optional unit
    fn format_fixed(&self, value: f64, digits: usize, unit: Option<Unit>) -> String;
}

/// en-US style formatter: grouped thousands, narrow unit with no space
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl NumberFormatter for PlainFormatter {
    fn format_fixed(&self, value: f64, digits: usize, unit: Option<Unit>) -> String {
        let suffix = unit.map(|u| u.symbol()).unwrap_or("");
        if !value.is_finite() {
            return format!("{}{}", value, suffix);
        }

        let fixed = round_half_away(value.abs(), digits);
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + 4);
        // -0.000 is shown without a sign
        if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out.push_str(suffix);
        out
    }
}

/// Fraction digits needed to print any `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed-point rendering of a non-negative value, ties rounded away from zero
///
/// The exact decimal expansion is truncated and the kept digits are bumped
/// when the first dropped digit is 5 or more, so `0.0625` prints as `0.063`.
fn round_half_away(value: f64, digits: usize) -> String {
    if digits >= EXACT_FRACTION_DIGITS {
        return format!("{:.*}", digits, value);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value);
    let Some(point) = exact.find('.') else {
        return format!("{:.*}", digits, value);
    };

    let dropped = point + 1 + digits;
    let round_up = exact.as_bytes()[dropped] >= b'5';
    let mut kept = exact.as_bytes()[..dropped].to_vec();
    if digits == 0 {
        kept.pop();
    }

    if round_up {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            match kept[i] {
                b'.' => continue,
                b'9' => kept[i] = b'0',
                _ => {
                    kept[i] += 1;
                    break;
                }
            }
        }
    }

    kept.into_iter().map(char::from).collect()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_digits() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.format_fixed(2.5, 3, Some(Unit::Second)), "2.500s");
        assert_eq!(formatter.format_fixed(0.1, 3, None), "0.100");
        assert_eq!(formatter.format_fixed(0.0, 0, None), "0");
    }

    #[test]
    fn test_millisecond_unit() {
        let formatter = PlainFormatter;
        assert_eq!(
            formatter.format_fixed(104.0, 3, Some(Unit::Millisecond)),
            "104.000ms"
        );
    }

    #[test]
    fn test_thousands_grouping() {
        let formatter = PlainFormatter;
        assert_eq!(
            formatter.format_fixed(12345.6789, 3, Some(Unit::Millisecond)),
            "12,345.679ms"
        );
        assert_eq!(formatter.format_fixed(1234567.0, 0, None), "1,234,567");
        assert_eq!(formatter.format_fixed(999.0, 1, None), "999.0");
    }

    #[test]
    fn test_negative_values() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.format_fixed(-1500.25, 2, None), "-1,500.25");
        assert_eq!(formatter.format_fixed(-0.0001, 3, None), "0.000");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.format_fixed(0.0625, 3, None), "0.063");
        assert_eq!(formatter.format_fixed(2.0625, 3, Some(Unit::Second)), "2.063s");
        assert_eq!(formatter.format_fixed(-0.0625, 3, None), "-0.063");
        assert_eq!(formatter.format_fixed(2.5, 0, None), "3");
        assert_eq!(formatter.format_fixed(999.95, 1, None), "1,000.0");
    }

    #[test]
    fn test_below_tie_rounds_down() {
        let formatter = PlainFormatter;
        // 0.1235 is stored just below the midpoint
        assert_eq!(formatter.format_fixed(0.1235, 3, None), "0.123");
        assert_eq!(formatter.format_fixed(0.0624999, 3, None), "0.062");
    }

    #[test]
    fn test_non_finite() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.format_fixed(f64::NAN, 3, None), "NaN");
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Second.to_string(), "s");
        assert_eq!(Unit::Millisecond.to_string(), "ms");
    }
}

//! Duration spec parsing (spec.md §4.5).
//!
//! A duration string is one of:
//!
//! - `<number><unit>` — fixed; `unit ∈ {d, h, m, s}`, default unit `d`.
//! - `<number><unit> ± <number><unit>` — mean/stddev in the same unit
//!   family, converted to days.
//!
//! Invariant: `μ − 2σ ≥ 0`. Any violation is a parse error, both for the
//! string form and for the `(μ, σ)` pair form used when specs arrive as
//! structured config rather than text.

use std::fmt;

use crate::{CoreError, CoreResult, DurationRng};

/// A parsed, validated task duration.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationSpec {
    /// Always realizes to exactly `days`.
    Fixed { days: f64 },
    /// Realizes to `max(epsilon, Normal(mean_days, stddev_days))`.
    Normal { mean_days: f64, stddev_days: f64 },
}

/// Floor below which a realized duration is never allowed to fall (spec.md
/// §9 open question: "small enough never to be observable in normal runs").
pub const EPSILON_DAYS: f64 = 1e-6;

impl DurationSpec {
    /// Construct and validate a fixed duration. `days` must be `> 0`.
    pub fn fixed(days: f64) -> CoreResult<Self> {
        if !(days > 0.0) {
            return Err(CoreError::Parse(format!(
                "fixed duration must be > 0, got {days}"
            )));
        }
        Ok(DurationSpec::Fixed { days })
    }

    /// Construct and validate a `(mean, stddev)` duration. Enforces
    /// `mean - 2*stddev >= 0` and `stddev >= 0`.
    pub fn normal(mean_days: f64, stddev_days: f64) -> CoreResult<Self> {
        if stddev_days < 0.0 {
            return Err(CoreError::Parse(format!(
                "stddev must be >= 0, got {stddev_days}"
            )));
        }
        if mean_days - 2.0 * stddev_days < 0.0 {
            return Err(CoreError::Parse(format!(
                "invalid duration spec: mean {mean_days} - 2*stddev {stddev_days} < 0"
            )));
        }
        if stddev_days == 0.0 {
            return DurationSpec::fixed(mean_days);
        }
        Ok(DurationSpec::Normal { mean_days, stddev_days })
    }

    /// Parse a duration string (`"2d"`, `"2d±0.5d"`, `"90m"`, …).
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        if let Some((mean_part, stddev_part)) = split_plus_minus(s) {
            let mean = parse_quantity_days(mean_part)?;
            let stddev = parse_quantity_days(stddev_part)?;
            DurationSpec::normal(mean, stddev)
        } else {
            let days = parse_quantity_days(s)?;
            DurationSpec::fixed(days)
        }
    }

    /// Realize a concrete duration in days. `rng` is only consulted for the
    /// `Normal` variant; fixed specs never touch it.
    pub fn realize(&self, rng: &mut DurationRng) -> f64 {
        match *self {
            DurationSpec::Fixed { days } => days,
            DurationSpec::Normal { mean_days, stddev_days } => {
                rng.sample_normal(mean_days, stddev_days).max(EPSILON_DAYS)
            }
        }
    }
}

impl fmt::Display for DurationSpec {
    /// Renders the canonical textual form `parse` accepts, so a
    /// `DurationSpec` can round-trip onto the wire as `DurationField::Text`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DurationSpec::Fixed { days } => write!(f, "{days}d"),
            DurationSpec::Normal { mean_days, stddev_days } => {
                write!(f, "{mean_days}d±{stddev_days}d")
            }
        }
    }
}

/// Split `"2d±0.5d"` / `"2d + / - 0.5d"` into `(mean, stddev)` textual
/// halves. Accepts the unicode `±` and the ASCII `+/-` spelling.
fn split_plus_minus(s: &str) -> Option<(&str, &str)> {
    if let Some(idx) = s.find('±') {
        let (a, b) = s.split_at(idx);
        Some((a.trim(), b['±'.len_utf8()..].trim()))
    } else {
        s.find("+/-").map(|idx| {
            let (a, b) = s.split_at(idx);
            (a.trim(), b["+/-".len()..].trim())
        })
    }
}

/// Parse `<number><unit>` into days. Default unit is `d` when no unit
/// letter is present.
fn parse_quantity_days(s: &str) -> CoreResult<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CoreError::Parse("empty duration quantity".to_string()));
    }
    let (number_part, unit) = match s.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&s[..s.len() - 1], c.to_ascii_lowercase()),
        _ => (s, 'd'),
    };
    let value: f64 = number_part
        .trim()
        .parse()
        .map_err(|_| CoreError::Parse(format!("invalid duration quantity {s:?}")))?;
    let days = match unit {
        'd' => value,
        'h' => value / 24.0,
        'm' => value / (24.0 * 60.0),
        's' => value / 86_400.0,
        other => {
            return Err(CoreError::Parse(format!(
                "unknown duration unit {other:?} in {s:?}"
            )))
        }
    };
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_default_unit() {
        assert_eq!(DurationSpec::parse("2").unwrap(), DurationSpec::Fixed { days: 2.0 });
        assert_eq!(DurationSpec::parse("2d").unwrap(), DurationSpec::Fixed { days: 2.0 });
    }

    #[test]
    fn parses_units() {
        let h = DurationSpec::parse("48h").unwrap();
        assert!(matches!(h, DurationSpec::Fixed { days } if (days - 2.0).abs() < 1e-9));
        let m = DurationSpec::parse("2880m").unwrap();
        assert!(matches!(m, DurationSpec::Fixed { days } if (days - 2.0).abs() < 1e-9));
    }

    #[test]
    fn parses_mean_stddev() {
        let spec = DurationSpec::parse("2d±0.5d").unwrap();
        assert_eq!(spec, DurationSpec::Normal { mean_days: 2.0, stddev_days: 0.5 });
    }

    #[test]
    fn rejects_invalid_spread() {
        // 2 - 2*1.5 = -1 < 0
        assert!(DurationSpec::parse("2d±1.5d").is_err());
    }

    #[test]
    fn rejects_non_positive_fixed() {
        assert!(DurationSpec::fixed(0.0).is_err());
        assert!(DurationSpec::fixed(-1.0).is_err());
    }

    #[test]
    fn zero_stddev_collapses_to_fixed() {
        assert_eq!(
            DurationSpec::normal(3.0, 0.0).unwrap(),
            DurationSpec::Fixed { days: 3.0 }
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let fixed = DurationSpec::fixed(2.0).unwrap();
        assert_eq!(DurationSpec::parse(&fixed.to_string()).unwrap(), fixed);
        let normal = DurationSpec::normal(2.0, 0.5).unwrap();
        assert_eq!(DurationSpec::parse(&normal.to_string()).unwrap(), normal);
    }

    #[test]
    fn realized_duration_is_always_positive() {
        let mut rng = DurationRng::new(1, &crate::AgentName::from("ra"));
        let spec = DurationSpec::normal(0.1, 0.05).unwrap();
        for _ in 0..1000 {
            assert!(spec.realize(&mut rng) > 0.0);
        }
    }
}

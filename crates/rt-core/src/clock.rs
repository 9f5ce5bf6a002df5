//! Virtual clock and round correlator.
//!
//! # Design
//!
//! Time is represented as a monotonically non-decreasing `VirtualTime` in
//! days (`f64`, per spec.md §3 "a non-negative rational"). Unlike the
//! integer-tick model this is adapted from, rounds are not wall-clock
//! intervals of fixed size — a round ends whenever every live participant
//! has replied, and the clock jumps straight to the earliest requested
//! `next_time`. There is no "tick duration"; `VirtualTime` carries its own
//! unit (days) throughout.

use std::fmt;

// ── VirtualTime ───────────────────────────────────────────────────────────────

/// A non-negative point in virtual time, measured in days.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualTime(pub f64);

impl VirtualTime {
    pub const ZERO: VirtualTime = VirtualTime(0.0);

    #[inline]
    pub fn days(n: f64) -> Self {
        VirtualTime(n)
    }

    /// `self + n` days.
    #[inline]
    pub fn plus(self, n: f64) -> VirtualTime {
        VirtualTime(self.0 + n)
    }

    /// Days elapsed from `earlier` to `self`. Negative if `self < earlier`
    /// (callers that rely on the clock's monotonic guarantee should never
    /// see a negative result in practice).
    #[inline]
    pub fn since(self, earlier: VirtualTime) -> f64 {
        self.0 - earlier.0
    }

    /// The larger of `self` and `other`.
    #[inline]
    pub fn max(self, other: VirtualTime) -> VirtualTime {
        VirtualTime(self.0.max(other.0))
    }

    /// `self`, clamped up to at least `floor` — used to enforce the
    /// backwards-time protection in spec.md §4.1: any requested `next_time`
    /// below the current clock is raised to the current clock, never
    /// allowed to move it backwards.
    #[inline]
    pub fn clamped_to_at_least(self, floor: VirtualTime) -> VirtualTime {
        if self.0 < floor.0 { floor } else { self }
    }
}

impl fmt::Display for VirtualTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:.6}", self.0)
    }
}

// ── RoundId ───────────────────────────────────────────────────────────────────

/// A per-`TimeUpdate` correlator of the form `round_<R>_<agent>` (spec.md
/// §3, §6). The embedded round number is authoritative when parsing
/// replies — a `Hold`/`Passivate` for a stale or malformed round is
/// rejected by the caller, not by this type.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundId {
    pub round: u64,
    pub agent: String,
}

impl RoundId {
    pub fn new(round: u64, agent: &str) -> Self {
        RoundId { round, agent: agent.to_string() }
    }

    /// Parse `round_<R>_<agent>`. Returns `None` for anything else —
    /// including a missing `round_` prefix, a non-integer `R`, or a missing
    /// agent segment — so callers can log and ignore per spec.md §7.
    pub fn parse(s: &str) -> Option<RoundId> {
        let rest = s.strip_prefix("round_")?;
        let (round_str, agent) = rest.split_once('_')?;
        if agent.is_empty() {
            return None;
        }
        let round = round_str.parse::<u64>().ok()?;
        Some(RoundId { round, agent: agent.to_string() })
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round_{}_{}", self.round, self.agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_id_roundtrip() {
        let id = RoundId::new(42, "buyer_ra_1");
        let s = id.to_string();
        assert_eq!(s, "round_42_buyer_ra_1");
        assert_eq!(RoundId::parse(&s), Some(id));
    }

    #[test]
    fn round_id_rejects_malformed() {
        assert_eq!(RoundId::parse("garbage"), None);
        assert_eq!(RoundId::parse("round_notanumber_agent"), None);
        assert_eq!(RoundId::parse("round_5_"), None);
        assert_eq!(RoundId::parse("round_5"), None);
    }

    #[test]
    fn clamp_never_decreases() {
        let t = VirtualTime::days(5.0);
        assert_eq!(t.clamped_to_at_least(VirtualTime::days(3.0)).0, 5.0);
        assert_eq!(t.clamped_to_at_least(VirtualTime::days(7.0)).0, 7.0);
    }
}

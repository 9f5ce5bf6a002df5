//! `RoundTracker` — per-round response bookkeeping for the two-phase
//! `TimeUpdate` / `Hold`-or-`Passivate` barrier (spec.md §4.1, §7).
//!
//! Each in-flight round tracks `Resp[R]`, the set of participants that have
//! replied, and `N[R]`, the earliest next-action time each `Hold` reply
//! named. A round is complete once `Resp[R]` covers every live participant;
//! the service's next tick is `min(N[R])`, clamped to never move backward.

use std::collections::{HashMap, HashSet};

use rt_core::{AgentName, VirtualTime};

/// A participant's reply to one round's `TimeUpdate`.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundReply {
    /// Will act no earlier than this time.
    Hold(VirtualTime),
    /// Nothing scheduled; does not constrain the next tick.
    Passivate,
}

#[derive(Default)]
struct RoundState {
    responded: HashSet<AgentName>,
    next_times: HashMap<AgentName, VirtualTime>,
}

/// Tracks `Resp[R]`/`N[R]` for every round currently awaiting replies.
/// Closed rounds are pruned explicitly via [`RoundTracker::close`] so
/// memory does not grow unbounded over a long run.
#[derive(Default)]
pub struct RoundTracker {
    rounds: HashMap<u64, RoundState>,
}

impl RoundTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `agent`'s reply for `round`. Spec.md §7: a stale reply for an
    /// already-closed round, or a duplicate reply from an agent that
    /// already responded this round, is silently ignored rather than
    /// treated as an error — `responded` is a set, so re-recording the same
    /// agent is a no-op other than possibly updating its `next_time`.
    pub fn record(&mut self, round: u64, agent: AgentName, reply: RoundReply) {
        let state = self.rounds.entry(round).or_default();
        match reply {
            RoundReply::Hold(next_time) => {
                state.next_times.insert(agent.clone(), next_time);
            }
            RoundReply::Passivate => {
                state.next_times.remove(&agent);
            }
        }
        state.responded.insert(agent);
    }

    /// Whether every one of `participant_count` live participants has
    /// replied for `round`.
    pub fn is_complete(&self, round: u64, participant_count: usize) -> bool {
        self.rounds
            .get(&round)
            .is_some_and(|s| s.responded.len() >= participant_count)
    }

    /// Number of distinct participants that have replied so far this round.
    pub fn responded_count(&self, round: u64) -> usize {
        self.rounds.get(&round).map(|s| s.responded.len()).unwrap_or(0)
    }

    /// Resolve the round's next tick: `min(N[R])`, clamped to never move
    /// earlier than `now`. `None` if no participant held (every reply was
    /// `Passivate`, or the round is unknown) — callers treat that as "no
    /// further work is scheduled" per spec.md §4.1.
    pub fn resolve_next_time(&self, round: u64, now: VirtualTime) -> Option<VirtualTime> {
        let state = self.rounds.get(&round)?;
        state
            .next_times
            .values()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).expect("VirtualTime is never NaN"))
            .map(|t| t.clamped_to_at_least(now))
    }

    /// Drop all bookkeeping for `round`. Call once the round has closed and
    /// its next tick has been resolved.
    pub fn close(&mut self, round: u64) {
        self.rounds.remove(&round);
    }

    pub fn open_round_count(&self) -> usize {
        self.rounds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_completes_once_every_participant_replies() {
        let mut tracker = RoundTracker::new();
        tracker.record(1, AgentName::from("buyer"), RoundReply::Passivate);
        assert!(!tracker.is_complete(1, 2));
        tracker.record(1, AgentName::from("seller"), RoundReply::Hold(VirtualTime(3.0)));
        assert!(tracker.is_complete(1, 2));
    }

    #[test]
    fn duplicate_reply_collapses() {
        let mut tracker = RoundTracker::new();
        tracker.record(1, AgentName::from("buyer"), RoundReply::Passivate);
        tracker.record(1, AgentName::from("buyer"), RoundReply::Passivate);
        assert_eq!(tracker.responded_count(1), 1);
    }

    #[test]
    fn next_time_is_min_and_clamped() {
        let mut tracker = RoundTracker::new();
        tracker.record(1, AgentName::from("a"), RoundReply::Hold(VirtualTime(5.0)));
        tracker.record(1, AgentName::from("b"), RoundReply::Hold(VirtualTime(2.0)));
        assert_eq!(tracker.resolve_next_time(1, VirtualTime(0.0)), Some(VirtualTime(2.0)));
        // clamp: round's min is behind `now`
        assert_eq!(tracker.resolve_next_time(1, VirtualTime(3.5)), Some(VirtualTime(3.5)));
    }

    #[test]
    fn all_passivate_resolves_to_none() {
        let mut tracker = RoundTracker::new();
        tracker.record(1, AgentName::from("a"), RoundReply::Passivate);
        assert_eq!(tracker.resolve_next_time(1, VirtualTime(0.0)), None);
    }

    #[test]
    fn close_drops_round_state() {
        let mut tracker = RoundTracker::new();
        tracker.record(1, AgentName::from("a"), RoundReply::Passivate);
        tracker.close(1);
        assert_eq!(tracker.open_round_count(), 0);
        assert!(!tracker.is_complete(1, 1));
    }
}

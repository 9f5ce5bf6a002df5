//! `TimeService` — round-based barrier scheduler (spec.md §4.1).
//!
//! Grounds on the teacher's `dt-sim::Sim` tick loop: a synchronous,
//! transport-agnostic state machine the caller drives — here a round
//! replaces a tick, and "every agent replied" replaces "every tick
//! elapses", but the shape (advance only once every participant has been
//! accounted for) is the same.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use rt_core::{AgentName, RoundId, TimeUpdate, VirtualTime};
use rt_schedule::{RoundReply, RoundTracker};

/// The `TimeUpdate`s for one round, split into the two broadcast phases
/// spec.md §4.1 step 1 requires: business agents first, then resource
/// agents, so business handlers have a chance to enqueue `GiveTask`s
/// before RAs compute their own next action this round.
pub struct RoundBroadcast {
    pub business: Vec<TimeUpdate>,
    pub resource_agents: Vec<TimeUpdate>,
}

/// Outcome of a normal (every participant replied) or forced
/// (watchdog-triggered) round advance.
pub struct AdvanceOutcome {
    pub round: u64,
    pub now: VirtualTime,
    pub finished: bool,
}

/// Outcome of a watchdog sweep.
pub struct WatchdogOutcome {
    pub evicted: Vec<AgentName>,
    pub advance: Option<AdvanceOutcome>,
}

pub struct TimeService {
    participants: Vec<AgentName>,
    resource_agents: HashSet<AgentName>,
    round: u64,
    now: VirtualTime,
    tracker: RoundTracker,
    max_rounds: u64,
    round_timeout: Duration,
    round_gap: Duration,
    liveness_warn_after: u64,
    agent_last_response: HashMap<AgentName, u64>,
}

impl TimeService {
    pub(crate) fn new(
        participants: Vec<AgentName>,
        resource_agents: HashSet<AgentName>,
        max_rounds: u64,
        round_timeout: Duration,
        round_gap: Duration,
        liveness_warn_after: u64,
    ) -> Self {
        TimeService {
            participants,
            resource_agents,
            round: 0,
            now: VirtualTime::ZERO,
            tracker: RoundTracker::new(),
            max_rounds,
            round_timeout,
            round_gap,
            liveness_warn_after,
            agent_last_response: HashMap::new(),
        }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn now(&self) -> VirtualTime {
        self.now
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn round_timeout(&self) -> Duration {
        self.round_timeout
    }

    /// The real-time pause the caller should observe between sending
    /// `RoundBroadcast::business` and `RoundBroadcast::resource_agents`
    /// (spec.md §4.1 step 1's "separated by a configurable real-time gap").
    /// `TimeService` stays synchronous and never sleeps itself; this is a
    /// value for the caller's own send loop to act on, the same way
    /// `round_timeout` is a value for the caller's own watchdog loop.
    pub fn round_gap(&self) -> Duration {
        self.round_gap
    }

    /// Build the two-phase `TimeUpdate` broadcast for the current round
    /// (spec.md §4.1 step 1). Called once on startup (`R=0`) and once
    /// after every advance.
    pub fn broadcast(&self) -> RoundBroadcast {
        let round_id = |name: &AgentName| RoundId::new(self.round, name.as_str()).to_string();
        let mut business = Vec::new();
        let mut resource_agents = Vec::new();
        for name in &self.participants {
            let update = TimeUpdate { round_id: round_id(name), now: self.now };
            if self.resource_agents.contains(name) {
                resource_agents.push(update);
            } else {
                business.push(update);
            }
        }
        RoundBroadcast { business, resource_agents }
    }

    /// Record a `Hold` reply (spec.md §4.1 step 2). Stale rounds and
    /// malformed correlators are logged and ignored.
    pub fn handle_hold(&mut self, agent_name: AgentName, round_id: &str, next_time: VirtualTime) {
        let Some(parsed) = RoundId::parse(round_id) else {
            tracing::warn!(%round_id, "malformed round_id in Hold, ignoring");
            return;
        };
        if parsed.round != self.round {
            tracing::warn!(agent = %agent_name, round_in = parsed.round, round = self.round, "stale round in Hold, ignoring");
            return;
        }
        self.agent_last_response.insert(agent_name.clone(), self.round);
        self.tracker.record(self.round, agent_name, RoundReply::Hold(next_time));
    }

    /// Record a `Passivate` reply (spec.md §4.1 step 2).
    pub fn handle_passivate(&mut self, agent_name: AgentName, round_id: &str) {
        let Some(parsed) = RoundId::parse(round_id) else {
            tracing::warn!(%round_id, "malformed round_id in Passivate, ignoring");
            return;
        };
        if parsed.round != self.round {
            tracing::warn!(agent = %agent_name, round_in = parsed.round, round = self.round, "stale round in Passivate, ignoring");
            return;
        }
        self.agent_last_response.insert(agent_name.clone(), self.round);
        self.tracker.record(self.round, agent_name, RoundReply::Passivate);
    }

    pub fn is_round_complete(&self) -> bool {
        self.tracker.is_complete(self.round, self.participants.len())
    }

    pub fn responded_count(&self) -> usize {
        self.tracker.responded_count(self.round)
    }

    /// Advance once every live participant has replied (spec.md §4.1
    /// step 3). Clamps `T` forward, never backward, per the backwards-time
    /// protection the tracker itself enforces via `resolve_next_time`.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.advance_from_responses()
    }

    fn advance_from_responses(&mut self) -> AdvanceOutcome {
        match self.tracker.resolve_next_time(self.round, self.now) {
            Some(next) => self.now = self.now.max(next),
            None => tracing::debug!(round = self.round, "no specific time requested, T unchanged"),
        }
        self.tracker.close(self.round);
        self.round += 1;
        let finished = self.round >= self.max_rounds || self.participants.is_empty();
        AdvanceOutcome { round: self.round, now: self.now, finished }
    }

    /// Watchdog sweep (spec.md §4.1 "Watchdog"): if `elapsed` has reached
    /// `round_timeout`, evict every participant that hasn't replied this
    /// round and force-advance using the survivors only.
    pub fn check_watchdog(&mut self, elapsed: Duration) -> Option<WatchdogOutcome> {
        if elapsed < self.round_timeout {
            return None;
        }
        let missing: Vec<AgentName> = self
            .participants
            .iter()
            .filter(|name| !self.has_responded(name))
            .cloned()
            .collect();
        for name in &missing {
            tracing::error!(agent = %name, round = self.round, "watchdog timeout, evicting unresponsive participant");
        }
        self.participants.retain(|name| !missing.contains(name));
        self.resource_agents.retain(|name| !missing.contains(name));

        if self.participants.is_empty() {
            tracing::error!("all participants lost, terminating run");
            return Some(WatchdogOutcome {
                evicted: missing,
                advance: Some(AdvanceOutcome { round: self.round, now: self.now, finished: true }),
            });
        }

        let advance = self.advance_from_responses();
        Some(WatchdogOutcome { evicted: missing, advance: Some(advance) })
    }

    fn has_responded(&self, name: &AgentName) -> bool {
        self.agent_last_response.get(name).copied() == Some(self.round)
    }

    /// Agents that haven't replied for more than `liveness_warn_after`
    /// rounds (spec.md §4.1 "background liveness check") — logged as
    /// possibly unresponsive, but never evicted here; eviction is solely
    /// the watchdog's decision.
    pub fn check_liveness(&self) -> Vec<AgentName> {
        let mut flagged = Vec::new();
        for name in &self.participants {
            let last = self.agent_last_response.get(name).copied().unwrap_or(0);
            if self.round.saturating_sub(last) > self.liveness_warn_after {
                tracing::warn!(agent = %name, round = self.round, last_response = last, "agent possibly unresponsive");
                flagged.push(name.clone());
            }
        }
        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(participants: &[&str], ras: &[&str]) -> TimeService {
        TimeService::new(
            participants.iter().map(|s| AgentName::from(*s)).collect(),
            ras.iter().map(|s| AgentName::from(*s)).collect(),
            10,
            Duration::from_secs(30),
            Duration::from_millis(50),
            5,
        )
    }

    #[test]
    fn round_gap_defaults_to_fifty_millis_and_is_configurable() {
        let svc = service(&["seller", "ra_1"], &["ra_1"]);
        assert_eq!(svc.round_gap(), Duration::from_millis(50));

        let custom = TimeService::new(
            vec![AgentName::from("seller")],
            HashSet::new(),
            10,
            Duration::from_secs(30),
            Duration::from_millis(5),
            5,
        );
        assert_eq!(custom.round_gap(), Duration::from_millis(5));
    }

    #[test]
    fn broadcast_splits_business_and_ra_phases() {
        let svc = service(&["seller", "ra_1"], &["ra_1"]);
        let broadcast = svc.broadcast();
        assert_eq!(broadcast.business.len(), 1);
        assert_eq!(broadcast.resource_agents.len(), 1);
    }

    #[test]
    fn round_advances_once_all_participants_reply() {
        let mut svc = service(&["a", "b"], &[]);
        assert!(!svc.is_round_complete());
        svc.handle_hold(AgentName::from("a"), "round_0_a", VirtualTime::days(3.0));
        svc.handle_passivate(AgentName::from("b"), "round_0_b");
        assert!(svc.is_round_complete());
        let outcome = svc.advance();
        assert_eq!(outcome.round, 1);
        assert_eq!(outcome.now, VirtualTime::days(3.0));
        assert!(!outcome.finished);
    }

    #[test]
    fn stale_round_reply_is_ignored() {
        let mut svc = service(&["a", "b"], &[]);
        svc.handle_hold(AgentName::from("a"), "round_99_a", VirtualTime::days(3.0));
        assert_eq!(svc.responded_count(), 0);
    }

    #[test]
    fn all_passivate_leaves_time_unchanged() {
        let mut svc = service(&["a"], &[]);
        svc.handle_passivate(AgentName::from("a"), "round_0_a");
        let outcome = svc.advance();
        assert_eq!(outcome.now, VirtualTime::ZERO);
    }

    #[test]
    fn watchdog_evicts_unresponsive_and_force_advances() {
        let mut svc = service(&["a", "b"], &[]);
        svc.handle_hold(AgentName::from("a"), "round_0_a", VirtualTime::days(1.0));
        let outcome = svc.check_watchdog(Duration::from_secs(30)).unwrap();
        assert_eq!(outcome.evicted, vec![AgentName::from("b")]);
        assert_eq!(svc.participant_count(), 1);
        assert!(outcome.advance.is_some());
    }

    #[test]
    fn watchdog_does_not_fire_before_timeout() {
        let mut svc = service(&["a"], &[]);
        assert!(svc.check_watchdog(Duration::from_secs(1)).is_none());
    }

    #[test]
    fn liveness_flags_without_evicting() {
        let mut svc = service(&["a", "b"], &[]);
        svc.handle_passivate(AgentName::from("a"), "round_0_a");
        svc.handle_passivate(AgentName::from("b"), "round_0_b");
        for _ in 0..7 {
            svc.advance();
            svc.handle_passivate(AgentName::from("a"), &format!("round_{}_a", svc.round()));
        }
        let flagged = svc.check_liveness();
        assert_eq!(flagged, vec![AgentName::from("b")]);
        assert_eq!(svc.participant_count(), 2);
    }

    #[test]
    fn reaching_max_rounds_finishes() {
        let mut svc = service(&["a"], &[]);
        for _ in 0..10 {
            svc.handle_passivate(AgentName::from("a"), &format!("round_{}_a", svc.round()));
            let outcome = svc.advance();
            if outcome.finished {
                assert_eq!(outcome.round, 10);
                return;
            }
        }
        panic!("expected run to finish within 10 rounds");
    }
}

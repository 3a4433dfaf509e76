//! Simulation observer trait and per-tick reporting.

use vt_agent::{AgentStore, VoterState};
use vt_core::Tick;

/// Aggregate counts taken after a tick has been committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Ticks completed when the counts were taken.  A report taken before the
    /// first step has `tick == Tick(0)`.
    pub tick:         Tick,
    /// Agents whose state is `WillVote`.
    pub will_vote:    usize,
    /// Agents still `Registered`.
    pub registered:   usize,
    /// All agents, whatever their state.
    pub total_agents: usize,
}

impl TickReport {
    pub fn collect(tick: Tick, agents: &AgentStore) -> Self {
        Self {
            tick,
            will_vote:    agents.count_in(VoterState::WillVote),
            registered:   agents.count_in(VoterState::Registered),
            total_agents: agents.count,
        }
    }

    /// Share of agents in `WillVote`, or 0 for an empty population.
    pub fn will_vote_share(&self) -> f64 {
        if self.total_agents == 0 {
            0.0
        } else {
            self.will_vote as f64 / self.total_agents as f64
        }
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         println!("{tick}: {} will vote", report.will_vote);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once by [`Sim::run`][crate::Sim::run] before the first tick,
    /// with the counts of the starting population.
    fn on_sim_start(&mut self, _start: &TickReport) {}

    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's intents have been committed.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once after the final tick completes, or after a stop request.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every [`TickReport`] in memory for charting after the run,
/// starting with the report taken before the first tick.
#[derive(Debug, Default, Clone)]
pub struct TurnoutRecorder {
    pub reports: Vec<TickReport>,
}

impl TurnoutRecorder {
    /// The `will_vote` series: the starting count, then one value per
    /// completed tick.
    pub fn will_vote_series(&self) -> Vec<usize> {
        self.reports.iter().map(|r| r.will_vote).collect()
    }

    pub fn last(&self) -> Option<&TickReport> {
        self.reports.last()
    }
}

impl SimObserver for TurnoutRecorder {
    fn on_sim_start(&mut self, start: &TickReport) {
        self.reports.push(*start);
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.reports.push(*report);
    }
}

//! The `Sim` struct and its tick loop.

use vt_agent::{AgentRngs, AgentStore};
use vt_behavior::{BehaviorModel, Intent, SimContext, random_step};
use vt_core::{AgentId, GridPos, SimConfig, Tick, VtError};
use vt_grid::MultiGrid;

use crate::{SimError, SimObserver, SimResult, StopHandle, TickReport};

/// Intents produced by one agent during the decide phase.
type Staged = Vec<(AgentId, Vec<Intent>)>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` owns every agent, the grid, and the tick counter, and drives the
/// two-phase tick loop:
///
/// 1. **Decide phase** (optionally parallel with the `parallel` feature):
///    call [`BehaviorModel::replan`] for every agent against a
///    [`SimContext`] built from the state left by the previous tick.
/// 2. **Commit phase** (sequential, ascending `AgentId`): validate every
///    staged intent, then apply them.
///
/// A tick is atomic.  If any agent's `replan` fails, or any staged intent is
/// invalid, nothing from that tick is written and the error is returned.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// Global configuration (agent count, grid size, total ticks, seed).
    pub config: SimConfig,

    /// The next tick to run; equals the number of ticks completed.
    pub current_tick: Tick,

    /// Agent state (SoA arrays).  Behavior models read this through
    /// `SimContext`; only the commit phase writes it.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Agent positions.  Every agent is placed by the builder.
    pub grid: MultiGrid,

    /// The behavior model.  Called once per agent per tick.
    pub behavior: B,

    pub(crate) stop: StopHandle,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, or until the stop
    /// handle is triggered.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!(
            "Running {} agents on a {}x{} {} grid from {} to {}",
            self.agents.count,
            self.grid.width(),
            self.grid.height(),
            self.grid.topology(),
            self.current_tick,
            self.config.end_tick()
        );
        observer.on_sim_start(&self.report());
        while self.current_tick < self.config.end_tick() {
            if self.stop.is_stopped() {
                log::info!("Stop requested; halting before {}", self.current_tick);
                break;
            }
            self.tick_with(observer)?;
        }
        observer.on_sim_end(self.current_tick);

        let report = self.report();
        log::info!(
            "Finished at {}: {} of {} agents will vote",
            report.tick,
            report.will_vote,
            report.total_agents
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Still honours the stop handle.  Useful for tests and incremental
    /// stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.stop.is_stopped() {
                break;
            }
            self.tick_with(observer)?;
        }
        Ok(())
    }

    /// Run a single tick without observers and return its report.
    pub fn step(&mut self) -> SimResult<TickReport> {
        let now = self.current_tick;
        let staged = self.decide(now)?;
        self.validate(&staged)?;
        self.commit(staged)?;
        self.current_tick = now.next();
        Ok(self.report())
    }

    /// Counts for the state as it stands now.
    pub fn report(&self) -> TickReport {
        TickReport::collect(self.current_tick, &self.agents)
    }

    /// A handle that stops [`run`](Self::run) before its next tick.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Move `agent` one random von Neumann step (or leave it in place) and
    /// return its new cell.
    ///
    /// Movement is never part of a tick on its own; callers decide when
    /// agents wander.
    pub fn move_agent(&mut self, agent: AgentId) -> SimResult<GridPos> {
        if !self.agents.contains(agent) {
            return Err(VtError::AgentNotFound(agent).into());
        }
        let rng = self.rngs.get_mut(agent);
        let to = random_step(&self.grid, agent, rng)?;
        self.grid.move_agent(agent, to)?;
        Ok(to)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_with<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);
        let report = self.step()?;
        observer.on_tick_end(now, &report);
        Ok(())
    }

    /// Call `replan` for every agent.  With the `parallel` Cargo feature the
    /// calls run on Rayon's thread pool; the result keeps ascending id order
    /// either way.
    fn decide(&mut self, now: Tick) -> SimResult<Staged> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents   = &self.agents;
        let grid     = &self.grid;
        let behavior = &self.behavior;
        let rngs     = &mut self.rngs;

        let ctx = SimContext::new(now, agents, grid);

        #[cfg(not(feature = "parallel"))]
        let staged: Result<Staged, _> = rngs
            .inner
            .iter_mut()
            .enumerate()
            .map(|(i, rng)| {
                let agent = AgentId(i as u32);
                behavior.replan(agent, &ctx, rng).map(|intents| (agent, intents))
            })
            .collect();

        #[cfg(feature = "parallel")]
        let staged: Result<Staged, _> = {
            use rayon::prelude::*;

            rngs.inner
                .par_iter_mut()
                .enumerate()
                .map(|(i, rng)| {
                    let agent = AgentId(i as u32);
                    behavior.replan(agent, &ctx, rng).map(|intents| (agent, intents))
                })
                .collect()
        };

        Ok(staged?)
    }

    /// Reject the whole tick if any staged intent could not be applied.
    ///
    /// Transitions are checked against the agent's state as it would be after
    /// its earlier intents this tick, so chained forward steps are allowed.
    fn validate(&self, staged: &Staged) -> SimResult<()> {
        for (agent, intents) in staged {
            let mut state = self.agents.state[agent.index()];
            for intent in intents {
                match *intent {
                    Intent::SetUtility(_) => {}
                    Intent::Transition(next) => {
                        if !state.can_transition_to(next) {
                            return Err(SimError::IllegalTransition { agent: *agent, from: state, to: next });
                        }
                        state = next;
                    }
                    Intent::MoveTo(pos) => self.grid.check(pos)?,
                }
            }
        }
        Ok(())
    }

    /// Apply validated intents in ascending `AgentId` order.
    fn commit(&mut self, staged: Staged) -> SimResult<()> {
        for (agent, intents) in staged {
            let i = agent.index();
            for intent in intents {
                match intent {
                    Intent::SetUtility(u) => self.agents.utility[i] = u,
                    Intent::Transition(s) => self.agents.state[i] = s,
                    Intent::MoveTo(pos)   => self.grid.move_agent(agent, pos)?,
                }
            }
        }
        Ok(())
    }
}

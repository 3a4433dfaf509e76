//! Integration tests for vt-sim.

use vt_agent::{AgentRngs, AgentStore, AgentStoreBuilder, VoterState};
use vt_behavior::{BehaviorError, BehaviorModel, BehaviorResult, Intent, NoopBehavior, SimContext, TurnoutBehavior};
use vt_core::{AgentId, AgentRng, GridPos, SimConfig, Tick, Topology};
use vt_grid::Neighborhood;
use vt_population::{DemographicRow, PopulationTables, TurnoutRow};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TickReport, TurnoutRecorder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(agent_count: usize, total_ticks: u64) -> SimConfig {
    SimConfig {
        agent_count,
        grid_width: 10,
        grid_height: 10,
        topology: Topology::Torus,
        total_ticks,
        seed: 42,
    }
}

fn small_store(n: usize) -> (AgentStore, AgentRngs) {
    AgentStoreBuilder::with_count(n, 42).build()
}

fn line_positions(n: u32) -> Vec<GridPos> {
    (0..n).map(|x| GridPos::new(x, 0)).collect()
}

fn single_city_tables() -> PopulationTables {
    PopulationTables::new(
        vec![DemographicRow {
            city:       "A".into(),
            age_group:  "18-25".into(),
            sex:        "M".into(),
            population: 1000,
        }],
        vec![TurnoutRow { city: "A".into(), registered: 500.0 }],
    )
}

/// Commits to voting if any Moore neighbor already will.  Under sequential
/// activation this would sweep a whole line in one tick.
struct FollowNeighbors;

impl BehaviorModel for FollowNeighbors {
    fn replan(&self, agent: AgentId, ctx: &SimContext<'_>, _rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
        if ctx.state_of(agent)? != VoterState::Registered {
            return Ok(vec![]);
        }
        let pos = ctx.position_of(agent)?;
        let seen = ctx.count_neighbors_in(pos, Neighborhood::Moore, false, VoterState::WillVote)?;
        Ok(if seen.matching > 0 {
            vec![Intent::Transition(VoterState::WillVote)]
        } else {
            vec![]
        })
    }
}

/// Agent 0 commits; agent 2 fails.
struct FailsOnAgentTwo;

impl BehaviorModel for FailsOnAgentTwo {
    fn replan(&self, agent: AgentId, _ctx: &SimContext<'_>, _rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
        match agent.0 {
            0 => Ok(vec![Intent::SetUtility(9.0), Intent::Transition(VoterState::WillVote)]),
            2 => Err(BehaviorError::Config("agent two refuses".into())),
            _ => Ok(vec![]),
        }
    }
}

/// Every agent asks for the same intent.
struct Always(Intent);

impl BehaviorModel for Always {
    fn replan(&self, _agent: AgentId, _ctx: &SimContext<'_>, _rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
        Ok(vec![self.0])
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn default_placement_puts_every_agent_on_the_grid() {
        let (store, rngs) = small_store(50);
        let sim = SimBuilder::new(test_config(50, 10), store, rngs, NoopBehavior).build().unwrap();
        assert_eq!(sim.grid.placed_count(), 50);
        for id in sim.agents.agent_ids() {
            let pos = sim.grid.position_of(id).unwrap();
            assert!(sim.grid.contains(pos));
        }
        assert_eq!(sim.current_tick, Tick::ZERO);
    }

    #[test]
    fn placement_is_seeded() {
        let build = |seed| {
            let (store, rngs) = small_store(20);
            let cfg = SimConfig { seed, ..test_config(20, 1) };
            let sim = SimBuilder::new(cfg, store, rngs, NoopBehavior).build().unwrap();
            sim.agents.agent_ids().map(|id| sim.grid.position_of(id)).collect::<Vec<_>>()
        };
        assert_eq!(build(7), build(7));
        assert_ne!(build(7), build(8));
    }

    #[test]
    fn explicit_positions_are_used() {
        let (store, rngs) = small_store(3);
        let sim = SimBuilder::new(test_config(3, 1), store, rngs, NoopBehavior)
            .initial_positions(line_positions(3))
            .build()
            .unwrap();
        assert_eq!(sim.grid.position_of(AgentId(2)), Some(GridPos::new(2, 0)));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let (store, rngs) = small_store(3);
        let result = SimBuilder::new(test_config(3, 1), store, rngs, NoopBehavior)
            .initial_positions(line_positions(2))
            .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 2, what: "initial positions" })
        ));
    }

    #[test]
    fn rng_count_mismatch_errors() {
        let (store, _) = small_store(3);
        let (_, rngs) = small_store(2);
        let result = SimBuilder::new(test_config(3, 1), store, rngs, NoopBehavior).build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { what: "agent RNGs", .. })));
    }

    #[test]
    fn out_of_bounds_position_errors() {
        let (store, rngs) = small_store(1);
        let result = SimBuilder::new(test_config(1, 1), store, rngs, NoopBehavior)
            .initial_positions(vec![GridPos::new(10, 0)])
            .build();
        assert!(matches!(result, Err(SimError::Grid(_))));
    }

    #[test]
    fn invalid_config_errors() {
        let (store, rngs) = small_store(1);
        let cfg = SimConfig { grid_width: 0, ..test_config(1, 1) };
        assert!(matches!(
            SimBuilder::new(cfg, store, rngs, NoopBehavior).build(),
            Err(SimError::Core(_))
        ));
    }

    #[test]
    fn from_population_allocates_target() {
        let sim = SimBuilder::from_population(test_config(10, 5), &single_city_tables(), TurnoutBehavior::default())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(sim.agents.count, 10);
        assert!(sim.agents.profile.iter().all(|p| p.city == "A" && p.sex == "M" && p.age_group == "18-25"));
        assert_eq!(sim.agents.count_in(VoterState::Registered), 10);
    }

    #[test]
    fn failed_allocation_prevents_the_model() {
        let mut tables = single_city_tables();
        tables.turnout.clear();
        let result = SimBuilder::from_population(test_config(10, 5), &tables, TurnoutBehavior::default());
        assert!(matches!(
            result,
            Err(SimError::Population(vt_population::PopulationError::MissingTurnout { .. }))
        ));
    }

    #[test]
    fn allocation_with_no_agents_prevents_the_model() {
        let segment = |age_group: &str| DemographicRow {
            city:       "A".into(),
            age_group:  age_group.into(),
            sex:        "F".into(),
            population: 500,
        };
        let tables = PopulationTables::new(
            vec![segment("18-25"), segment("26-40")],
            vec![TurnoutRow { city: "A".into(), registered: 100.0 }],
        );
        let result = SimBuilder::from_population(test_config(1, 5), &tables, TurnoutBehavior::default());
        assert!(matches!(
            result,
            Err(SimError::Population(vt_population::PopulationError::EmptyAllocation { target: 1 }))
        ));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn activation_is_simultaneous() {
        let (mut store, rngs) = small_store(5);
        store.state[0] = VoterState::WillVote;
        let cfg = SimConfig { topology: Topology::Bounded, ..test_config(5, 10) };
        let mut sim = SimBuilder::new(cfg, store, rngs, FollowNeighbors)
            .initial_positions(line_positions(5))
            .build()
            .unwrap();

        // One cell of spread per tick, never more.
        for expected in 2..=5 {
            let report = sim.step().unwrap();
            assert_eq!(report.will_vote, expected);
        }
        assert_eq!(sim.current_tick, Tick(4));
    }

    #[test]
    fn activation_order_does_not_matter() {
        // Same line, but the seed agent is the last id instead of the first.
        let (mut store, rngs) = small_store(5);
        store.state[4] = VoterState::WillVote;
        let cfg = SimConfig { topology: Topology::Bounded, ..test_config(5, 10) };
        let mut sim = SimBuilder::new(cfg, store, rngs, FollowNeighbors)
            .initial_positions(line_positions(5))
            .build()
            .unwrap();
        assert_eq!(sim.step().unwrap().will_vote, 2);
        assert_eq!(sim.agents.state[3], VoterState::WillVote);
        assert_eq!(sim.agents.state[2], VoterState::Registered);
    }

    #[test]
    fn failing_agent_aborts_the_whole_tick() {
        let (store, rngs) = small_store(3);
        let mut sim = SimBuilder::new(test_config(3, 10), store, rngs, FailsOnAgentTwo).build().unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Behavior(BehaviorError::Config(_))));
        assert_eq!(sim.agents.state[0], VoterState::Registered);
        assert_eq!(sim.agents.utility[0], 0.0);
        assert_eq!(sim.current_tick, Tick::ZERO);
    }

    #[test]
    fn backwards_transition_is_rejected() {
        let (store, rngs) = small_store(2);
        let mut sim = SimBuilder::new(test_config(2, 1), store, rngs, Always(Intent::Transition(VoterState::Undecided)))
            .build()
            .unwrap();
        assert!(matches!(
            sim.step(),
            Err(SimError::IllegalTransition { from: VoterState::Registered, to: VoterState::Undecided, .. })
        ));
        assert_eq!(sim.agents.count_in(VoterState::Registered), 2);
    }

    #[test]
    fn skipping_a_state_is_rejected() {
        let (store, rngs) = small_store(1);
        let mut sim = SimBuilder::new(test_config(1, 1), store, rngs, Always(Intent::Transition(VoterState::Voted)))
            .build()
            .unwrap();
        assert!(matches!(sim.step(), Err(SimError::IllegalTransition { .. })));
    }

    #[test]
    fn move_intents_are_committed() {
        let (store, rngs) = small_store(3);
        let target = GridPos::new(5, 5);
        let mut sim = SimBuilder::new(test_config(3, 1), store, rngs, Always(Intent::MoveTo(target)))
            .build()
            .unwrap();
        sim.step().unwrap();
        assert_eq!(sim.grid.agents_at(target).unwrap().len(), 3);
    }

    #[test]
    fn move_out_of_bounds_aborts_the_tick() {
        let (store, rngs) = small_store(2);
        let mut sim = SimBuilder::new(test_config(2, 1), store, rngs, Always(Intent::MoveTo(GridPos::new(99, 0))))
            .initial_positions(line_positions(2))
            .build()
            .unwrap();
        assert!(matches!(sim.step(), Err(SimError::Grid(_))));
        assert_eq!(sim.grid.position_of(AgentId(1)), Some(GridPos::new(1, 0)));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let (store, rngs) = small_store(2);
        let mut sim = SimBuilder::new(test_config(2, 3), store, rngs, NoopBehavior).build().unwrap();
        sim.run_ticks(7, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(7));
    }
}

// ── Turnout dynamics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod turnout_tests {
    use super::*;

    fn turnout_sim(seed: u64, ticks: u64) -> crate::Sim<TurnoutBehavior> {
        let cfg = SimConfig { seed, ..test_config(200, ticks) };
        let (store, rngs) = AgentStoreBuilder::with_count(200, seed).build();
        SimBuilder::new(cfg, store, rngs, TurnoutBehavior::default()).build().unwrap()
    }

    #[test]
    fn will_vote_is_monotone() {
        let mut sim = turnout_sim(42, 30);
        let mut previous = vec![VoterState::Registered; 200];
        for _ in 0..30 {
            sim.step().unwrap();
            for (before, &after) in previous.iter().zip(&sim.agents.state) {
                if *before == VoterState::WillVote {
                    assert_eq!(after, VoterState::WillVote);
                }
            }
            previous.clone_from(&sim.agents.state);
        }
    }

    #[test]
    fn recorder_series_is_non_decreasing_and_counts_will_vote() {
        let mut sim = turnout_sim(5, 20);
        let mut recorder = TurnoutRecorder::default();
        sim.run(&mut recorder).unwrap();

        assert_eq!(recorder.reports.len(), 21);
        let series = recorder.will_vote_series();
        assert!(series.windows(2).all(|w| w[0] <= w[1]), "{series:?}");
        for r in &recorder.reports {
            assert_eq!(r.total_agents, 200);
            assert_eq!(r.will_vote + r.registered, 200);
        }
        assert_eq!(recorder.reports[0].tick, Tick::ZERO);
        assert_eq!(recorder.reports[0].will_vote, 0);
        assert_eq!(recorder.last().map(|r| r.tick), Some(Tick(20)));
    }

    #[test]
    fn utilities_recorded_for_deciding_agents() {
        let mut sim = turnout_sim(9, 1);
        sim.step().unwrap();
        // First tick: no willing neighbors yet, so utility = 1 - cost in (0, 1].
        assert!(sim.agents.utility.iter().all(|&u| u > 0.0 && u <= 1.0));
        for (u, s) in sim.agents.utility.iter().zip(&sim.agents.state) {
            assert_eq!(*u > 0.5, *s == VoterState::WillVote);
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let series = |seed| {
            let mut sim = turnout_sim(seed, 15);
            let mut recorder = TurnoutRecorder::default();
            sim.run(&mut recorder).unwrap();
            recorder.will_vote_series()
        };
        assert_eq!(series(11), series(11));
    }

    #[test]
    fn everyone_commits_eventually() {
        let mut sim = turnout_sim(3, 60);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.report().will_vote, 200);
    }

    #[test]
    fn noop_population_reports_zero_not_total() {
        let (store, rngs) = small_store(12);
        let mut sim = SimBuilder::new(test_config(12, 3), store, rngs, NoopBehavior).build().unwrap();
        let mut recorder = TurnoutRecorder::default();
        sim.run(&mut recorder).unwrap();
        assert!(recorder.reports.iter().all(|r| r.will_vote == 0 && r.total_agents == 12));
    }

    #[test]
    fn end_to_end_from_tables() {
        let mut sim = SimBuilder::from_population(test_config(10, 25), &single_city_tables(), TurnoutBehavior::default())
            .unwrap()
            .build()
            .unwrap();
        let mut recorder = TurnoutRecorder::default();
        sim.run(&mut recorder).unwrap();
        assert_eq!(recorder.reports.len(), 26);
        assert!(recorder.reports.iter().all(|r| r.total_agents == 10));
    }

    #[test]
    fn recorder_starts_with_the_initial_population() {
        let (store, rngs) = small_store(6);
        let mut sim = SimBuilder::new(test_config(6, 4), store, rngs, TurnoutBehavior::default())
            .build()
            .unwrap();
        let initial = sim.report();
        let mut recorder = TurnoutRecorder::default();
        sim.run(&mut recorder).unwrap();

        assert_eq!(recorder.reports.first(), Some(&initial));
        assert_eq!(initial, TickReport { tick: Tick::ZERO, will_vote: 0, registered: 6, total_agents: 6 });
        let ticks: Vec<Tick> = recorder.reports.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(1), Tick(2), Tick(3), Tick(4)]);
    }

    #[test]
    fn report_share() {
        let r = TickReport { tick: Tick(1), will_vote: 3, registered: 1, total_agents: 4 };
        assert_eq!(r.will_vote_share(), 0.75);
        let empty = TickReport { tick: Tick(0), will_vote: 0, registered: 0, total_agents: 0 };
        assert_eq!(empty.will_vote_share(), 0.0);
    }
}

// ── Control ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;
    use crate::StopHandle;

    /// Stops the run after a given tick and remembers the hooks it saw.
    struct StopAfter {
        handle: StopHandle,
        after:  Tick,
        starts: usize,
        ended:  Option<Tick>,
    }

    impl SimObserver for StopAfter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }

        fn on_tick_end(&mut self, tick: Tick, _report: &TickReport) {
            if tick == self.after {
                self.handle.stop();
            }
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn stop_handle_halts_between_ticks() {
        let (store, rngs) = small_store(4);
        let mut sim = SimBuilder::new(test_config(4, 100), store, rngs, TurnoutBehavior::default())
            .build()
            .unwrap();
        let mut obs = StopAfter { handle: sim.stop_handle(), after: Tick(2), starts: 0, ended: None };
        sim.run(&mut obs).unwrap();

        assert_eq!(sim.current_tick, Tick(3));
        assert_eq!(obs.starts, 3);
        assert_eq!(obs.ended, Some(Tick(3)));
    }

    #[test]
    fn stop_before_run_runs_nothing() {
        let (store, rngs) = small_store(4);
        let mut sim = SimBuilder::new(test_config(4, 100), store, rngs, NoopBehavior).build().unwrap();
        let handle = sim.stop_handle();
        handle.stop();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick::ZERO);

        handle.reset();
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(2));
    }

    #[test]
    fn stop_from_another_thread() {
        let (store, rngs) = small_store(4);
        let sim = SimBuilder::new(test_config(4, 100), store, rngs, NoopBehavior).build().unwrap();
        let handle = sim.stop_handle();
        std::thread::spawn(move || handle.stop()).join().unwrap();
        assert!(sim.stop_handle().is_stopped());
    }

    #[test]
    fn explicit_move_stays_in_von_neumann_reach() {
        let (store, rngs) = small_store(1);
        let cfg = SimConfig { topology: Topology::Bounded, ..test_config(1, 1) };
        let mut sim = SimBuilder::new(cfg, store, rngs, NoopBehavior)
            .initial_positions(vec![GridPos::new(4, 4)])
            .build()
            .unwrap();
        let mut from = GridPos::new(4, 4);
        for _ in 0..200 {
            let to = sim.move_agent(AgentId(0)).unwrap();
            assert!(to.manhattan(from) <= 1, "{from} -> {to}");
            assert_eq!(sim.grid.position_of(AgentId(0)), Some(to));
            from = to;
        }
    }

    #[test]
    fn explicit_move_of_unknown_agent_errors() {
        let (store, rngs) = small_store(1);
        let mut sim = SimBuilder::new(test_config(1, 1), store, rngs, NoopBehavior).build().unwrap();
        assert!(matches!(sim.move_agent(AgentId(5)), Err(SimError::Core(_))));
    }
}

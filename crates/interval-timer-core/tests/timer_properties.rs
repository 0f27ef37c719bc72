//! Property tests for the interval state machine.

use std::time::{Duration, Instant};

use interval_timer_core::{
    IntervalStateMachine, Phase, PhaseConfig, SoundKind, TimerEvent,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Tick(u64),
    Pause,
    Resume,
    Stop,
    Start,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u64..4_000).prop_map(Op::Tick),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Stop),
        1 => Just(Op::Start),
    ]
}

fn config() -> impl Strategy<Value = PhaseConfig> {
    (0u32..4, 1u32..8, 1u32..8, 1u32..5).prop_map(|(lead, work, rest, rounds)| PhaseConfig {
        lead_up_secs: lead,
        work_secs: work,
        rest_secs: rest,
        total_rounds: rounds,
    })
}

fn assert_invariants(timer: &IntervalStateMachine) {
    let state = timer.snapshot();
    let config = timer.config();
    match state.phase.active() {
        None => {
            assert_eq!(state.current_round, 0);
            assert_eq!(state.remaining_secs, 0);
            assert_eq!(state.phase_start, None);
            assert_eq!(state.paused_elapsed, Duration::ZERO);
        }
        Some(active) => {
            assert!(state.remaining_secs <= config.duration_of(active));
            assert!(state.current_round < config.total_rounds);
            assert_eq!(state.phase_start.is_some(), state.phase.is_running());
            if state.phase.is_running() {
                assert_eq!(state.paused_elapsed, Duration::ZERO);
            }
            // Only idle reports the all-zero state.
            assert!(
                state.phase_start.is_some() || state.current_round > 0 || state.remaining_secs > 0
            );
        }
    }
}

/// Expected cue sequence for a complete run of `rounds` rounds.
fn expected_events(rounds: u32) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    for round in 0..rounds {
        events.push(TimerEvent::PlaySound(SoundKind::WorkEnd));
        if round + 1 < rounds {
            events.push(TimerEvent::PlaySound(SoundKind::RestEnd));
        }
    }
    events.push(TimerEvent::PlaySound(SoundKind::AllComplete));
    events.push(TimerEvent::FanfareTriggered);
    events
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(
        cfg in config(),
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let base = Instant::now();
        let mut now = base;
        let mut timer = IntervalStateMachine::new(cfg);
        timer.start(now).unwrap();
        assert_invariants(&timer);

        for op in ops {
            match op {
                Op::Tick(ms) => {
                    now += Duration::from_millis(ms);
                    timer.tick(now);
                }
                Op::Pause => { timer.pause(now); }
                Op::Resume => { timer.resume(now); }
                Op::Stop => { timer.stop(); }
                Op::Start => { timer.start(now).unwrap(); }
            }
            assert_invariants(&timer);
        }
    }

    #[test]
    fn pause_is_idempotent(cfg in config(), offset_ms in 0u64..3_000, later_ms in 0u64..10_000) {
        let base = Instant::now();
        let mut timer = IntervalStateMachine::new(cfg);
        timer.start(base).unwrap();
        let t = base + Duration::from_millis(offset_ms);
        timer.tick(t);
        timer.pause(t);
        let once = timer.snapshot();
        prop_assert!(!timer.pause(t + Duration::from_millis(later_ms)));
        prop_assert_eq!(timer.snapshot(), once);
    }

    #[test]
    fn instant_pause_resume_changes_nothing(cfg in config(), offset_ms in 0u64..3_000) {
        let base = Instant::now();
        let mut timer = IntervalStateMachine::new(cfg);
        timer.start(base).unwrap();
        let t = base + Duration::from_millis(offset_ms);
        let before = timer.tick(t);
        if before.phase.is_running() {
            prop_assert!(timer.pause(t));
            prop_assert!(timer.resume(t));
            let after = timer.tick(t);
            prop_assert_eq!(after.phase, before.phase);
            prop_assert_eq!(after.remaining_secs, before.remaining_secs);
            prop_assert!(after.events.is_empty());
        }
    }

    #[test]
    fn irregular_ticks_do_not_drift(
        work in 1u32..120,
        rest in 1u32..120,
        gaps in prop::collection::vec(1u64..5_000, 0..400),
    ) {
        let cfg = PhaseConfig { lead_up_secs: 0, work_secs: work, rest_secs: rest, total_rounds: 2 };
        let base = Instant::now();
        let end = base + Duration::from_secs(u64::from(work));
        let mut timer = IntervalStateMachine::new(cfg);
        timer.start(base).unwrap();

        let mut now = base;
        for gap in gaps {
            now += Duration::from_millis(gap);
            if now >= end {
                break;
            }
            let out = timer.tick(now);
            prop_assert_eq!(out.phase, Phase::Work);
            prop_assert!(out.events.is_empty());
        }

        let out = timer.tick(end);
        prop_assert_eq!(out.phase, Phase::Rest);
        prop_assert_eq!(out.remaining_secs, u64::from(rest));
        prop_assert_eq!(out.events, vec![TimerEvent::PlaySound(SoundKind::WorkEnd)]);
    }

    #[test]
    fn each_cue_fires_exactly_once_per_transition(
        cfg in config(),
        step_ms in 50u64..1_500,
    ) {
        let base = Instant::now();
        let mut timer = IntervalStateMachine::new(cfg);
        timer.start(base).unwrap();

        let mut now = base;
        let mut events = Vec::new();
        let mut ticks = 0;
        while timer.phase() != Phase::Idle {
            now += Duration::from_millis(step_ms);
            events.extend(timer.tick(now).events);
            ticks += 1;
            prop_assert!(ticks < 100_000, "run never completed");
        }
        prop_assert_eq!(events, expected_events(cfg.total_rounds));
    }
}

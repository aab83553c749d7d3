use stickfight_core::*;

fn fight_ready(config: MatchConfig) -> Simulation {
    let mut sim = Simulation::new(config);
    while sim.round.phase == RoundPhase::Countdown {
        sim.step(&[NULL_INPUT; 2]);
    }
    sim
}

/// P2 placed just inside P1's punch range.
fn face_off(config: MatchConfig) -> Simulation {
    let mut sim = fight_ready(config);
    sim.fighters[1].body.pos.x = sim.fighters[0].body.pos.x + 80.0;
    sim
}

fn press(actions: &[Action]) -> FrameInput {
    FrameInput::holding(actions)
}

fn assert_invariants(sim: &Simulation) {
    for f in &sim.fighters {
        assert!(f.health >= 0 && f.health <= f.max_health, "health {}", f.health);
        if f.health == 0 {
            assert!(f.state.is_finished(), "zero health outside fatality");
        }
        let (min_x, max_x) = sim.arena.x_limits();
        assert!(f.body.pos.x >= min_x && f.body.pos.x <= max_x);
        assert!(f.body.bottom() >= sim.arena.ground_y - 1e-9);
    }
}

#[test]
fn punch_lands_five_ticks_after_press() {
    let mut sim = face_off(MatchConfig::default());
    sim.fighters[1].health = 10;

    sim.step(&[press(&[Action::Punch]), NULL_INPUT]);
    for _ in 0..4 {
        let out = sim.step(&[press(&[Action::Punch]), NULL_INPUT]);
        assert!(out.events.iter().all(|e| e.kind != EventKind::Miss));
        assert_eq!(sim.fighters[1].health, 10);
    }
    let out = sim.step(&[press(&[Action::Punch]), NULL_INPUT]);
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].kind, EventKind::Hit);
    assert_eq!(sim.fighters[1].health, 3);
    assert_eq!(sim.fighters[1].state, FighterState::Hit { ticks_remaining: HIT_TICKS });
    assert_eq!(sim.hit_stop, HIT_STOP_LANDED);
}

#[test]
fn whiff_reports_miss_two_ticks_in() {
    let mut sim = fight_ready(MatchConfig::default());
    let x0 = sim.fighters[0].body.pos.x;
    sim.step(&[press(&[Action::Kick]), NULL_INPUT]);
    let out = sim.step(&[NULL_INPUT; 2]);
    assert!(out.events.is_empty());
    let out = sim.step(&[NULL_INPUT; 2]);
    assert_eq!(out.events[0].kind, EventKind::Miss);
    assert_eq!(sim.fighters[0].body.pos.x, x0 + LUNGE_STEP);
}

#[test]
fn parry_through_the_simulation() {
    let mut sim = face_off(MatchConfig::default());
    sim.step(&[press(&[Action::Punch]), press(&[Action::Block])]);
    let mut parried = false;
    for _ in 0..5 {
        let out = sim.step(&[NULL_INPUT; 2]);
        parried |= out.events.iter().any(|e| e.kind == EventKind::Parry);
    }
    assert!(parried);
    assert_eq!(sim.fighters[1].health, MAX_HEALTH);
    assert!(matches!(sim.fighters[0].state, FighterState::Stunned { .. }));
    assert_eq!(sim.hit_stop, HIT_STOP_PARRY);

    // Stunned fighters ignore input until the stun lapses.
    for _ in 0..HIT_STOP_PARRY + 10 {
        sim.step(&[press(&[Action::Jump]), NULL_INPUT]);
        sim.step(&[NULL_INPUT; 2]);
    }
    assert!(matches!(sim.fighters[0].state, FighterState::Stunned { .. }));
}

#[test]
fn block_shows_twelve_parry_ticks_then_eighteen_partial() {
    let mut sim = fight_ready(MatchConfig::default());
    sim.step(&[press(&[Action::Block]), NULL_INPUT]);
    let mut parry = 0;
    let mut partial = 0;
    for _ in 0..40 {
        match sim.snapshot().fighters[0].pose {
            Pose::Block { parry: true } => parry += 1,
            Pose::Block { parry: false } => partial += 1,
            _ => {}
        }
        sim.step(&[press(&[Action::Block]), NULL_INPUT]);
    }
    assert_eq!((parry, partial), (12, 18));
}

#[test]
fn knockout_runs_fatality_to_dead() {
    let mut sim = face_off(MatchConfig::default());
    sim.fighters[1].health = 5;
    sim.step(&[press(&[Action::Punch]), NULL_INPUT]);

    let mut phases_seen = Vec::new();
    let mut p2_landings = 0;
    let mut record = None;
    let mut fatal_seen = false;
    for _ in 0..2_000 {
        let out = sim.step(&[NULL_INPUT; 2]);
        assert_invariants(&sim);
        fatal_seen |= out.events.iter().any(|e| e.kind == EventKind::Fatal);
        if fatal_seen {
            p2_landings += out
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Landed && e.actor == FighterId::P2)
                .count();
        }
        if let Pose::Fatality { phase } = sim.snapshot().fighters[1].pose {
            if phases_seen.last() != Some(&phase) {
                phases_seen.push(phase);
            }
        }
        if out.record.is_some() {
            record = out.record;
            break;
        }
    }

    let record = record.expect("knockout should end the round");
    assert!(fatal_seen);
    assert_eq!(phases_seen, vec![1, 2, 3]);
    assert_eq!(p2_landings, 1 + BOUNCE_HEIGHTS.len());
    assert_eq!(record.winner, Outcome::Winner(FighterId::P1));
    assert_eq!(record.fighter(FighterId::P2).final_health, 0);
    assert_eq!(record.fighter(FighterId::P1).hits, 1);
    assert!(sim.fighters[1].is_dead());
    assert!(sim.is_over());
}

#[test]
fn fatal_blow_triggers_slow_motion_only_when_enabled() {
    for enabled in [true, false] {
        let config = MatchConfig {
            slow_motion: enabled,
            ..MatchConfig::default()
        };
        let mut sim = face_off(config);
        sim.fighters[1].health = 1;
        sim.step(&[press(&[Action::Punch]), NULL_INPUT]);
        for _ in 0..5 {
            sim.step(&[NULL_INPUT; 2]);
        }
        assert_eq!(sim.hit_stop, HIT_STOP_FATAL);
        let expected = if enabled { SLOW_MOTION_TICKS } else { 0 };
        assert_eq!(sim.slow_motion, expected);
    }
}

#[test]
fn replay_determinism() {
    let mut transcript: Vec<[FrameInput; 2]> = Vec::new();
    for tick in 0..1_500u32 {
        let p1 = match tick % 40 {
            0..=14 => press(&[Action::Right]),
            15 => press(&[Action::Punch]),
            22 => press(&[Action::Kick]),
            30 => press(&[Action::Jump, Action::Right]),
            _ => NULL_INPUT,
        };
        let p2 = match tick % 55 {
            0..=9 => press(&[Action::Left]),
            10 => press(&[Action::Block]),
            25 => press(&[Action::Punch]),
            33 => press(&[Action::Dash]),
            40..=44 => press(&[Action::Right]),
            _ => NULL_INPUT,
        };
        transcript.push([p1, p2]);
    }

    let run = |transcript: &[[FrameInput; 2]]| -> (Simulation, Vec<CombatEvent>) {
        let mut sim = Simulation::new(MatchConfig::default());
        let mut events = Vec::new();
        for inputs in transcript {
            let out = sim.step(inputs);
            events.extend(out.events);
            assert_invariants(&sim);
            if sim.is_over() {
                break;
            }
        }
        (sim, events)
    };

    let (a, events_a) = run(&transcript);
    let (b, events_b) = run(&transcript);
    assert_eq!(a, b);
    assert_eq!(events_a, events_b);
    assert!(events_a.iter().any(|e| e.kind == EventKind::DashStarted));
}

#[test]
fn recorder_collects_finished_matches() {
    let mut history = MatchHistory::default();
    for winner_health in [40, 60] {
        let config = MatchConfig {
            names: ["ann".to_string(), "bob".to_string()],
            round_seconds: 1,
            ..MatchConfig::default()
        };
        let mut sim = Simulation::new(config);
        sim.fighters[1].health = winner_health;
        while !sim.is_over() {
            if let Some(record) = sim.step(&[NULL_INPUT; 2]).record {
                history.record(record);
            }
        }
    }
    assert_eq!(history.matches.len(), 2);
    assert_eq!(history.wins("ann"), 2);
    assert_eq!(history.leaderboard()[0], ("ann".to_string(), 2));
}

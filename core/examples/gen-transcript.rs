//! Generates key transcripts for the headless runner.
//!
//! Usage:
//!   cargo run -p stickfight-core --example gen-transcript -- [idle|brawl|short] > transcript.json

use stickfight_core::*;

fn keys(bindings: &Bindings, actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| bindings.key_for(*a))
        .map(str::to_string)
        .collect()
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());
    let config = MatchConfig::default();
    let bindings = [Bindings::default_for(0), Bindings::default_for(1)];
    let match_ticks = COUNTDOWN_TICKS + config.round_seconds * TICK_RATE;

    let script: Vec<[Vec<Action>; 2]> = match mode.as_str() {
        "idle" => {
            // Nobody moves: time-up draw
            vec![[Vec::new(), Vec::new()]; match_ticks as usize]
        }
        "brawl" => {
            // P1 closes in and alternates punches and kicks, P2 blocks now and then
            (0..match_ticks)
                .map(|tick| {
                    let p1 = match tick % 24 {
                        0..=11 => vec![Action::Right],
                        12 => vec![Action::Punch],
                        18 => vec![Action::Kick],
                        _ => Vec::new(),
                    };
                    let p2 = match tick % 90 {
                        40 => vec![Action::Block],
                        70 => vec![Action::Punch],
                        _ => Vec::new(),
                    };
                    [p1, p2]
                })
                .collect()
        }
        "short" => vec![[Vec::new(), Vec::new()]; 300],
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'brawl', or 'short'", mode);
            std::process::exit(1);
        }
    };

    // Verify by running the sim
    let mut sim = Simulation::new(config);
    for [p1, p2] in &script {
        sim.step(&[FrameInput::holding(p1), FrameInput::holding(p2)]);
        if sim.is_over() {
            break;
        }
    }
    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Final tick: {}", sim.tick);
    eprintln!("Round over: {}", sim.is_over());
    eprintln!("Winner: {:?}", sim.round.winner);
    eprintln!(
        "Health: P1={}, P2={}",
        sim.fighters[0].health, sim.fighters[1].health
    );

    let transcript: Vec<[Vec<String>; 2]> = script
        .iter()
        .map(|[p1, p2]| [keys(&bindings[0], p1), keys(&bindings[1], p2)])
        .collect();
    match serde_json::to_string(&transcript) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode transcript: {}", e);
            std::process::exit(1);
        }
    }
}

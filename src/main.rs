//! Dino Run entry point
//!
//! The browser build is driven from JS through `dino_run::web`. Natively this
//! binary plays a few headless runs with a simple autopilot, reports each
//! score and prints the leaderboard.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run(headless::Args::parse(std::env::args().skip(1))?)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::rc::Rc;

    use dino_run::consts::{LEADERBOARD_ROWS, SIM_DT_MS};
    use dino_run::host::HeadlessHost;
    use dino_run::leaderboard::{MemoryLeaderboard, NameKey, ScoreReporter};
    use dino_run::platform::{FileStore, MemoryStore, RecordStore, now_ms};
    use dino_run::scene::GameOverDialog;
    use dino_run::sim::GamePhase;
    use dino_run::{GameConfig, ms_to_ticks};

    /// Seconds before the autopilot gives up and lets the run end
    const MAX_RUN_SECS: u64 = 120;

    #[derive(Debug, Default)]
    pub struct Args {
        runs: u32,
        offline: bool,
        config: Option<PathBuf>,
        scores: Option<PathBuf>,
        seed: Option<u64>,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args {
                runs: 3,
                config: std::env::var_os("DINO_RUN_CONFIG").map(PathBuf::from),
                ..Default::default()
            };
            while let Some(arg) = args.next() {
                let mut value = |name: &str| {
                    args.next()
                        .ok_or_else(|| format!("{} needs a value", name))
                };
                match arg.as_str() {
                    "--runs" => {
                        parsed.runs = value("--runs")?
                            .parse()
                            .map_err(|e| format!("--runs: {}", e))?
                    }
                    "--seed" => {
                        parsed.seed = Some(
                            value("--seed")?
                                .parse()
                                .map_err(|e| format!("--seed: {}", e))?,
                        )
                    }
                    "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
                    "--scores" => parsed.scores = Some(PathBuf::from(value("--scores")?)),
                    "--offline" => parsed.offline = true,
                    other => return Err(format!("unknown argument: {}", other)),
                }
            }
            Ok(parsed)
        }
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = match &args.config {
            Some(path) => GameConfig::load_from(path),
            None => GameConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.spawn.seed = seed;
        }

        let board = Rc::new(MemoryLeaderboard::with_starter_scores());
        board.set_offline(args.offline);
        let store: Rc<dyn RecordStore> = match &args.scores {
            Some(path) => Rc::new(FileStore::new(path)),
            None => Rc::new(MemoryStore::new()),
        };
        let reporter = ScoreReporter::new(Rc::clone(&board), store);

        let mut host = HeadlessHost::new(config);
        let mut dialog = GameOverDialog::new();

        for run in 1..=args.runs {
            play_one(&mut host, &mut dialog);

            let name = format!("Bot {}", run);
            for c in name.chars() {
                dialog.handle_key(NameKey::Char(c), now_ms());
            }
            if let Some(pending) = dialog.handle_key(NameKey::Enter, now_ms()) {
                let receipt =
                    pollster::block_on(reporter.submit_for(pending.session_id, pending.record));
                dialog.apply_receipt(&receipt);
                println!(
                    "Run {}: {} points ({})",
                    run,
                    receipt.record.score,
                    dialog.status().unwrap_or("")
                );
            }

            // Release, then press jump to restart
            for held in [false, true, false] {
                for event in host.step(held) {
                    dialog.on_event(&event);
                }
            }
        }

        let view = pollster::block_on(reporter.fetch_top(LEADERBOARD_ROWS));
        println!("LEADERBOARD");
        for line in view.lines() {
            println!("  {}", line);
        }
        Ok(())
    }

    /// Play until the run ends; jumps when the next obstacle gets close
    fn play_one(host: &mut HeadlessHost, dialog: &mut GameOverDialog) {
        let give_up_after = ms_to_ticks(MAX_RUN_SECS * 1000);
        let mut ticks = 0;
        while host.session.phase == GamePhase::Running {
            let lead = host.session.speed * 0.35;
            let jump = ticks < give_up_after
                && host.next_obstacle_gap().is_some_and(|gap| gap <= lead);
            for event in host.step(jump) {
                dialog.on_event(&event);
            }
            ticks += 1;
        }
        log::info!(
            "Run {} lasted {:.1}s",
            host.session.session_id,
            (ticks * SIM_DT_MS) as f64 / 1000.0
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Result<Args, String> {
            Args::parse(list.iter().map(|s| s.to_string()))
        }

        #[test]
        fn test_parse_args() {
            let parsed = args(&["--runs", "5", "--offline", "--seed", "9"]).unwrap();
            assert_eq!(parsed.runs, 5);
            assert!(parsed.offline);
            assert_eq!(parsed.seed, Some(9));
        }

        #[test]
        fn test_parse_rejects_unknown() {
            assert!(args(&["--fast"]).is_err());
            assert!(args(&["--runs"]).is_err());
        }
    }
}

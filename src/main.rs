//! Reel Chase headless runner
//!
//! Plays one autopiloted session and prints every outbound event as a JSON
//! line. Useful for tuning presets and replaying seeds.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use clap::Parser;
    use reel_chase::protocol::SessionStart;
    use reel_chase::sim::autopilot;
    use reel_chase::{Difficulty, HostMessage, SessionController, SimulationConfig, StopReason};

    #[derive(Debug, Parser)]
    #[command(name = "reel-chase", about = "Run one autopiloted reeling session")]
    struct Args {
        /// Difficulty preset (easy, normal, hard)
        #[arg(long, default_value = "normal", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        /// Fish pattern name; defaults to the preset's
        #[arg(long)]
        pattern: Option<String>,
        /// RNG seed for replay
        #[arg(long)]
        seed: Option<u64>,
        /// Give up (fish escapes) after this many simulated seconds
        #[arg(long, default_value_t = 30.0)]
        max_seconds: f32,
        /// JSON config file overriding the preset
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Only print the outcome
        #[arg(long)]
        quiet: bool,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::from_name(s).ok_or_else(|| format!("unknown difficulty {s:?}"))
    }

    fn load_config(args: &Args) -> Result<SimulationConfig, String> {
        match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                SimulationConfig::from_json(&json).map_err(|e| e.to_string())
            }
            None => Ok(args.difficulty.config()),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();
        log::info!("Reel Chase (native) starting...");

        let config = match load_config(&args) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        };
        let tick_interval = config.tick_interval;
        let half_width = config.capture_half_width;

        let mut controller = SessionController::new(config, Default::default());
        let start = SessionStart {
            pattern: args.pattern.clone(),
            seed: args.seed,
            ..Default::default()
        };
        if let Err(err) = controller.handle_message(HostMessage::SessionStart(start)) {
            log::error!("Could not start session: {}", err);
            return ExitCode::FAILURE;
        }

        let mut elapsed = 0.0;
        let mut holding = false;
        while controller.is_active() {
            if elapsed >= args.max_seconds {
                controller.stop(StopReason::Failure);
                break;
            }

            let hold = match (controller.snapshot(), controller.zone()) {
                (Some(snapshot), Some(zone)) => {
                    autopilot::hold_input(snapshot.fish_position, zone, half_width)
                }
                _ => holding,
            };
            if hold != holding {
                holding = hold;
                if hold {
                    controller.on_control_pressed();
                } else {
                    controller.on_control_released();
                }
            }

            controller.advance(tick_interval);
            elapsed += tick_interval;
            print_events(&mut controller, args.quiet);
        }
        print_events(&mut controller, args.quiet);

        match controller.last_summary() {
            Some(summary) => {
                log::info!(
                    "{:?} after {} ticks (seed {}, capture ratio {:.0}%, bounces {}, pattern {})",
                    summary.reason,
                    summary.ticks,
                    summary.seed,
                    summary.capture_ratio() * 100.0,
                    summary.bounces.total_bounces,
                    summary.final_pattern
                );
                if summary.reason.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            None => ExitCode::FAILURE,
        }
    }

    fn print_events(controller: &mut SessionController, quiet: bool) {
        for event in controller.drain_events() {
            if quiet && matches!(event, reel_chase::SessionEvent::Snapshot(_)) {
                continue;
            }
            match event.to_json() {
                Ok(line) => println!("{line}"),
                Err(err) => log::warn!("Could not encode event: {}", err),
            }
        }
    }
}

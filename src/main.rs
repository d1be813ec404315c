// src/main.rs
use log::{LevelFilter, info};
use prizewheel::{Phase, Roulette, WheelConfig, WheelHost};
use std::env;
use std::error::Error;
use std::fs;

const TICK: f32 = 1.0 / 60.0;
const MAX_LANDINGS: u32 = 10;

struct ConsoleHost;

impl WheelHost for ConsoleHost {
    fn on_start(&mut self) {
        info!("spin accepted");
    }
    fn on_complete(&mut self, prize: &str) {
        info!("wheel settled on '{}'", prize);
    }
    fn on_receive_gift(&mut self, prize: &str) {
        info!("claimed prize '{}'", prize);
    }
}

fn load_config() -> Result<WheelConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            info!("loading wheel config from '{}'", path);
            Ok(serde_json::from_str(&fs::read_to_string(&path)?)?)
        }
        None => Ok(WheelConfig {
            prize_list: ["gold", "silver", "try_again", "bronze"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            spins_limit: Some(3),
            ..WheelConfig::default()
        }),
    }
}

// Headless stand-in for a UI event loop: tick at 60 Hz until the current
// spin settles.
fn run_until_landed(wheel: &mut Roulette, host: &mut ConsoleHost) {
    while wheel.phase() == Phase::Spinning {
        wheel.update(TICK, host);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .init();

    let config = load_config()?;
    let mut wheel = Roulette::new(config)?;
    let mut host = ConsoleHost;

    info!("prize wheel ready");

    let mut landings = 0;
    while landings < MAX_LANDINGS {
        match wheel.phase() {
            Phase::LandedTryAgain => wheel.request_try_again(),
            _ => {
                if !wheel.can_spin() {
                    info!("spin limit reached after {} landings", landings);
                    break;
                }
                wheel.request_start(&mut host);
            }
        }
        run_until_landed(&mut wheel, &mut host);
        landings += 1;

        info!(
            "pointer at {:.1} deg, highlight {:.2}",
            wheel.rotation().rem_euclid(360.0),
            wheel.highlight_opacity()
        );
        for control in wheel.controls() {
            info!("control available: {:?} ('{}')", control.kind, control.label);
        }

        if wheel.phase() == Phase::LandedClaimable {
            wheel.request_claim(&mut host);
        }
    }

    info!("demo session over after {} landings", landings);
    Ok(())
}

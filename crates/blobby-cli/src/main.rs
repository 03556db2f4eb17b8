//! blobby - TUI and CLI for random blob shapes
//!
//! Usage:
//!   blobby [--config FILE] [--seed N]   Launch the interactive editor
//!   blobby generate [options]           Write one shape as PNG, SVG or JSON
//!   blobby help                         Show usage

mod app;
mod cli;
mod config;
mod render;
mod tui;

use std::env;
use std::path::PathBuf;

use app::App;
use cli::cmd_generate;
use config::Config;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "generate" | "gen" => {
                if let Err(e) = cmd_generate(&args[2..]) {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            _ => {}
        }
    }

    if let Err(e) = launch_editor(&args[1..]) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parse editor flags, load config, and run the TUI.
fn launch_editor(args: &[String]) -> Result<(), String> {
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing value for --config")?;
                config_path = Some(PathBuf::from(path));
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --seed")?;
                seed = Some(value.parse().map_err(|_| format!("Invalid seed: {}", value))?);
            }
            other => return Err(format!("Unknown argument: {}. Try 'blobby help'.", other)),
        }
        i += 1;
    }

    let config = Config::discover(config_path.as_deref()).map_err(|e| e.to_string())?;
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    log::info!("Starting editor with seed {}", seed);

    let mut app = App::new(&config, seed);
    tui::run_tui(&mut app)
}

fn print_usage(prog: &str) {
    eprintln!("blobby - random smooth closed shapes");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [--config FILE] [--seed N]     Launch the editor", prog);
    eprintln!("  {} generate [options]             Generate one shape", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Generate options:");
    eprintln!("  -n, --min <n>          Minimum vertex count, at least 3 (default: 10)");
    eprintln!("  -x, --max <n>          Maximum vertex count (default: 15)");
    eprintln!("  -s, --scatter <rad>    Angular scatter std-dev in radians (default: 0.1)");
    eprintln!("  -w, --line-width <pt>  Line width in points (default: 1.0)");
    eprintln!("  --seed <n>             Seed for a reproducible shape");
    eprintln!("  --size <px>            Canvas size in pixels (default: 500)");
    eprintln!("  -f, --format <fmt>     png, svg or json (default: from -o, else png)");
    eprintln!("  -o, --output <file>    Output path (- for stdout with svg/json)");
    eprintln!("  -c, --config <file>    YAML config (default: ./blobby.yaml if present)");
    eprintln!();
    eprintln!("Editor controls:");
    eprintln!("  Tab / ↑↓      Select field");
    eprintln!("  ← → / - +     Step field (line width adjusts, others refresh)");
    eprintln!("  e / Enter     Type a value");
    eprintln!("  a             Adjust line width only");
    eprintln!("  r             Refresh: new random shape");
    eprintln!("  s             Save PNG");
    eprintln!("  q / Esc       Quit");
    eprintln!();
    eprintln!("Set RUST_LOG=info for progress logging on stderr.");
}

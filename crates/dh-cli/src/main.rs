//! Diffie-Hellman Demo Binary
//!
//! Walks two parties through a finite-field key exchange and sends one
//! message under the derived secret.
//!
//! ## Usage
//!
//! ```bash
//! dh-demo --pause-ms 0 --max-prime 1000
//! dh-demo --random-keys --seed 7
//! ```

mod demo;
mod prompt;

use clap::Parser;
use dh_session::SessionConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::demo::Demo;
use crate::prompt::Prompter;

/// Diffie-Hellman key exchange demo over a small prime field
#[derive(Parser, Debug)]
#[command(name = "dh-demo")]
#[command(version)]
#[command(about = "Interactive Diffie-Hellman key exchange demo", long_about = None)]
struct Args {
    /// Largest prime accepted for the generator search
    #[arg(short = 'm', long, default_value_t = 10_000)]
    max_prime: u64,

    /// Pause between steps in milliseconds
    #[arg(short = 'p', long, default_value_t = 2_000)]
    pause_ms: u64,

    /// Reject private keys outside [1, p-1]
    #[arg(long)]
    strict: bool,

    /// Draw private keys at random instead of asking
    #[arg(short = 'r', long)]
    random_keys: bool,

    /// Seed for --random-keys
    #[arg(long, requires = "random_keys")]
    seed: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,

    /// Generate sample configuration file
    #[arg(long)]
    generate_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = args.generate_config {
        let config = SessionConfig::default();
        config.save_to_file(&path)?;
        println!("Generated sample configuration at: {}", path.display());
        return Ok(());
    }

    let config = if let Some(config_path) = &args.config {
        SessionConfig::load_from_file(config_path)?
    } else {
        SessionConfig::builder()
            .max_prime(args.max_prime)
            .pause_ms(args.pause_ms)
            .strict_private_keys(args.strict)
            .log_level(&args.log_level)
            .build()?
    };

    // Initialize logging
    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    if let Some(config_path) = &args.config {
        info!("Loaded configuration from: {}", config_path.display());
    }
    info!(
        max_prime = config.max_prime,
        pause_ms = config.pause_ms,
        strict = config.strict_private_keys,
        "starting session"
    );

    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let mut demo = Demo::new(config, prompter);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rng = args.random_keys.then_some(&mut rng);

    match demo.run(rng) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Demo ended: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["dh-demo", "--pause-ms", "0", "--strict"]);
        assert_eq!(args.pause_ms, 0);
        assert!(args.strict);
        assert_eq!(args.max_prime, 10_000);
        assert!(!args.random_keys);
    }

    #[test]
    fn test_seed_requires_random_keys() {
        assert!(Args::try_parse_from(["dh-demo", "--seed", "3"]).is_err());
        let args = Args::try_parse_from(["dh-demo", "-r", "--seed", "3"]).unwrap();
        assert_eq!(args.seed, Some(3));
    }
}

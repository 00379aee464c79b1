//! Ethereum Vanity Address Search CLI
//!
//! Usage:
//!   vanity_search -p dead                          # Address starting with "dead"
//!   vanity_search -p BEEF -t suffix -o out.txt     # Ending with "BEEF", saved to out.txt
//!   vanity_search --cmd verify                     # Address of a private key (prompted)

use std::process;

use clap::Parser;

use vanity_search::verify::{self, KeySource};
use vanity_search::{output, Command, Config, Driver, Result, SearchOutcome, Secp256k1Generator};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    config.validate()?;
    match config.cmd {
        Command::Generate => run_generate(config),
        Command::Verify => run_verify(config),
    }
}

fn run_generate(config: &Config) -> Result<()> {
    let settings = config.search_settings();

    if config.verbose {
        println!("Ethereum Vanity Address Search");
        println!("==============================");
        println!(
            "Pattern:    {} ({})",
            settings.pattern.literal(),
            settings.pattern.position()
        );
        println!("Difficulty: {}", settings.pattern.difficulty_description());
        println!("Workers:    {}", settings.workers);
        println!();
    }

    let driver = Driver::new(settings, Secp256k1Generator::new()).with_progress(print_progress);

    let stop = driver.stop_signal();
    if let Err(e) = ctrlc::set_handler(move || {
        stop.fire();
    }) {
        log::warn!("Ctrl-C handler not installed: {}", e);
    }

    let outcome = driver.run()?;

    if config.verbose {
        print_stats(&outcome);
    }

    match outcome.found {
        Some(keypair) => output::write_result(&keypair, config.out.as_deref()),
        None => {
            eprintln!("Stopped before a match was found.");
            process::exit(1);
        }
    }
}

fn run_verify(config: &Config) -> Result<()> {
    let secret = KeySource::from_flag(config.priv_hex.as_deref()).read()?;
    let address = verify::derive_address(&secret)?;
    print!("{}", output::render_address(&address));
    Ok(())
}

fn print_progress(step: u64, address: &str) {
    println!("step: {} latest addr: {}", step, address);
}

fn print_stats(outcome: &SearchOutcome) {
    println!("\n--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(outcome.keys_generated));
    println!("Candidates checked:   {}", format_number(outcome.checked));
    println!("Time elapsed:         {:.2}s", outcome.elapsed.as_secs_f64());
    println!(
        "Average speed:        {}/s",
        format_number(outcome.keys_per_second() as u64)
    );
    println!();
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

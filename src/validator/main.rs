//! Standalone validator for bot configuration files.
//!
//! This tool validates YAML configuration files for the username bot,
//! checking structure, types, ranges and log format syntax.

use std::process::ExitCode;

use clap::Parser;

// Import from the main crate
use username_bot::config::{ConfigError, Configuration, DEFAULT_CONFIG_PATH};

/// Bot configuration validator.
#[derive(Parser, Debug)]
#[command(name = "validate_config")]
#[command(about = "Validates configuration files for the Telegram username bot")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file to validate.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    file: String,

    /// Generate an example configuration file at the specified path.
    #[arg(long)]
    generate_example: Option<String>,

    /// Show the resolved value of every setting.
    #[arg(short, long)]
    verbose: bool,

    /// Print the resolved configuration as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Handle example generation
    if let Some(output_path) = args.generate_example {
        return generate_example(&output_path);
    }

    // Validate the configuration file
    validate_config(&args.file, args.verbose, args.json)
}

fn generate_example(output_path: &str) -> ExitCode {
    match Configuration::example().save_to_file(output_path) {
        Ok(()) => {
            println!("✓ Example configuration written to: {output_path}");
            println!("\nAll optional settings are filled with their defaults.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Failed to write example file: {e}");
            ExitCode::FAILURE
        }
    }
}

fn validate_config(path: &str, verbose: bool, json: bool) -> ExitCode {
    if !json {
        println!("Validating: {path}\n");
    }

    let config = match Configuration::load_from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ {}: {e}", error_kind(&e));
            return ExitCode::FAILURE;
        }
    };

    if json {
        return match serde_json::to_string_pretty(&config) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ Failed to render configuration: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if verbose {
        print_config(&config);
        println!();
    }

    println!("✓ Configuration is valid ({} v{})", config.app.name, config.app.version);
    ExitCode::SUCCESS
}

fn error_kind(error: &ConfigError) -> &'static str {
    match error {
        ConfigError::NotFound { .. } => "Not found",
        ConfigError::Read { .. } => "Read error",
        ConfigError::Parse { .. } => "Parse error",
        ConfigError::Validation { .. } => "Validation error",
        ConfigError::Write { .. } | ConfigError::Serialize(_) => "Error",
    }
}

fn print_config(config: &Configuration) {
    let checker = &config.checker;
    let bot = &config.bot;
    let logging = &config.logging;

    println!("[app]");
    println!("  name           {}", config.app.name);
    println!("  version        {}", config.app.version);

    println!("[checker]");
    println!("  batch_size     {}", checker.batch_size);
    println!("  max_usernames  {}", checker.max_usernames);
    println!("  retry_delay    {}s", checker.retry_delay);
    println!("  max_retries    {}", checker.max_retries);
    let schedule: Vec<String> = checker
        .retry_delays()
        .map(|d| format!("{}s", d.as_secs()))
        .collect();
    if schedule.is_empty() {
        println!("  retry pauses   none (single attempt)");
    } else {
        println!("  retry pauses   {}", schedule.join(", "));
    }

    println!("[bot]");
    println!("  timeout        {}s", bot.timeout);
    println!("  workers        {}", bot.workers);
    let updates: Vec<&str> = bot.allowed_updates.iter().map(|k| k.as_str()).collect();
    println!("  updates        {}", updates.join(", "));

    println!("[logging]");
    println!("  level          {}", logging.level);
    println!("  format         {}", logging.format);
    println!("  date_format    {}", logging.date_format);
}

use std::env;
use std::error::Error;

use clap::{Parser, Subcommand};
use colored::*;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use onthemap::config::constant::DEFAULT_LIMIT;
use onthemap::{Completion, LocationRecord, ParseClient, ParseConfig, StaticUser};

#[derive(Debug, Parser)]
#[command(name = "onthemap", about = "List and share student locations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the most recent student locations
    List {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Share your location
    Post {
        #[arg(long)]
        media_url: String,
        #[arg(long)]
        map_string: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },
}

/// Initialize tracing and environment
fn init_tracing_and_env() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenv().ok();
}

/// Identity of the signed-in user, taken from USER_* variables
fn load_user() -> Result<StaticUser, Box<dyn Error>> {
    let var = |name: &str| {
        env::var(name).map_err(|_| format!("Missing {} in environment or .env", name))
    };
    Ok(StaticUser::new(
        var("USER_UNIQUE_KEY")?,
        var("USER_FIRST_NAME")?,
        var("USER_LAST_NAME")?,
    ))
}

fn print_locations(records: &[LocationRecord]) {
    for record in records {
        println!(
            "{:<28} {:>9.4} {:>10.4}  {}  {}",
            record.full_name().bold(),
            record.latitude,
            record.longitude,
            record.map_string,
            record.media_url.cyan()
        );
    }
}

fn report(completion: &Completion) {
    match &completion.error_message {
        None => println!("{}", "OK".green()),
        Some(message) => eprintln!("{} {}", "Error:".red().bold(), message),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let cli = Cli::parse();

    let mut client = ParseClient::new(ParseConfig::from_env()?)?;
    info!(
        "Using Parse endpoint {} (timeout {:?})",
        client.config().base_url,
        client.config().timeout
    );

    let completion = match cli.command {
        Command::List { limit } => {
            let result = client.fetch_recent(limit).await;
            if let Ok(records) = &result {
                print_locations(records);
            }
            Completion::from_result(&result)
        }
        Command::Post {
            media_url,
            map_string,
            latitude,
            longitude,
        } => {
            let user = load_user()?;
            let record = LocationRecord::draft(&user, media_url, map_string, latitude, longitude);
            Completion::from_result(&client.submit_location(&record).await)
        }
    };

    report(&completion);
    if !completion.success {
        error!("Request did not complete successfully");
        std::process::exit(1);
    }
    Ok(())
}

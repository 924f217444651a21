use std::{
    io::{self, BufRead, Write},
    num::NonZeroUsize,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use materializer::{
    benchmark, helpers::load_dotenv, Config, ConsoleProgress, Materializer, SurrealStore,
    SystemClock,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Materializes sensor measurements into a queryable view")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the materialized view once.
    Materialize,
    /// Rebuild the view repeatedly and report timing statistics.
    Benchmark {
        #[arg(short = 'n', long)]
        iterations: NonZeroUsize,

        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },
}

type Store = Materializer<SurrealStore, SurrealStore>;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("materializer=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Invalid database configuration")?;
    let store = SurrealStore::connect(&config)
        .await
        .with_context(|| format!("Could not connect to {}", config.endpoint))?;
    println!("Connected with database!");

    let materializer = Materializer::new(store.clone(), store);

    match cli.command {
        Some(Command::Materialize) => materialize(&materializer).await,
        Some(Command::Benchmark { iterations, json }) => {
            microbenchmark(&materializer, iterations, json).await
        }
        None => menu(&materializer).await,
    }
}

async fn materialize(materializer: &Store) -> Result<()> {
    println!("Starting materialize process...");
    let report = materializer
        .run_timed(&SystemClock, &ConsoleProgress::new())
        .await
        .context("Materialize process failed")?;
    println!(
        "Time elapsed: {:.6} seconds for {} measurements",
        report.elapsed.as_secs_f64(),
        report.records
    );
    Ok(())
}

async fn microbenchmark(
    materializer: &Store,
    iterations: NonZeroUsize,
    json: bool,
) -> Result<()> {
    println!("Starting microbenchmark...");
    let statistics = benchmark(materializer, iterations, &SystemClock, &ConsoleProgress::new())
        .await
        .context("Microbenchmark failed")?;
    println!("Microbenchmark finished\n");

    if json {
        println!("{}", serde_json::to_string_pretty(&statistics)?);
    } else {
        println!("{statistics}\n");
    }
    Ok(())
}

/// Interactive loop used when no subcommand is given.
async fn menu(materializer: &Store) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("0: Exit");
        println!("1: Execute materialize process");
        println!("2: Execute materialize microbenchmark");

        let Some(choice) = prompt(&mut lines, "Select a function: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "0" => return Ok(()),
            "1" => materialize(materializer).await?,
            "2" => {
                let mut question = "How many iterations?: ";
                let iterations = loop {
                    let Some(answer) = prompt(&mut lines, question)? else {
                        return Ok(());
                    };
                    match answer.trim().parse::<NonZeroUsize>() {
                        Ok(n) => break n,
                        Err(_) => question = "Please input a correct number: ",
                    }
                };
                microbenchmark(materializer, iterations, false).await?;
            }
            _ => continue,
        }
    }
}

/// Prints `question` and reads one line; `None` once stdin is exhausted.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    question: &str,
) -> Result<Option<String>> {
    print!("{question}");
    io::stdout().flush()?;
    lines.next().transpose().context("Failed to read from stdin")
}

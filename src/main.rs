use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use cfbpull::cfbd::{Client, DEFAULT_TIMEOUT_SECS, Query};
use cfbpull::config;
use cfbpull::sink::{self, Destination};

/// cfbpull queries the CollegeFootballData API once and dumps the
/// normalized table to a CSV file, or replaces a table in Postgres,
/// BigQuery, or Snowflake. Connection parameters come from the
/// environment; the API key comes from CFBD_API_KEY.
#[derive(Parser, Debug)]
struct Cli {
    /// API resource category to query, e.g. "games" or "teams".
    #[arg(short, long)]
    category: String,

    /// Filter key, repeatable; pairs up with --value in order.
    #[arg(short, long = "search", value_name = "KEY")]
    search: Vec<String>,

    /// Filter value, one per --search key, in the same order.
    #[arg(short, long = "value", value_name = "VALUE")]
    value: Vec<String>,

    /// Base name of the CSV output file; ".csv" is appended.
    #[arg(short, long, default_value = "output")]
    file: String,

    /// Destination to write the fetched table to.
    #[arg(short, long, value_enum, default_value = "csv")]
    to: Sink,

    /// Destination table name; required for every destination except csv.
    #[arg(long)]
    table: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Sink {
    Csv,
    Postgres,
    Bigquery,
    Snowflake,
}

fn main() {
    match main_result() {
        Ok(_) => {}
        Err(err) => {
            eprintln!("{err:?}");
            std::process::exit(1);
        }
    }
}

fn main_result() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let query = Query::new(&cli.category, &cli.search, &cli.value)?;
    println!("Query URL: {}", query.url());

    let api_key = config::api_key()?;
    let client = Client::new(&api_key, Duration::from_secs(cli.timeout))?;
    let table = client.fetch(&query)?;
    log::info!("fetched {} rows of {}", table.rows().len(), cli.category);

    let destination = destination(&cli)?;
    sink::write(&table, &destination)?;

    println!("Success");
    Ok(())
}

// Parameters are loaded only for the destination that was selected,
// so a CSV run works without any warehouse environment.
fn destination(cli: &Cli) -> cfbpull::Result<Destination> {
    let table_name = || {
        cli.table.clone().ok_or_else(|| {
            cfbpull::Error::Validation(
                "--table is required for database destinations".to_string(),
            )
        })
    };
    Ok(match cli.to {
        Sink::Csv => Destination::Csv {
            path: PathBuf::from(format!("{}.csv", cli.file)),
        },
        Sink::Postgres => Destination::Postgres {
            params: config::PostgresParams::from_env()?,
            table: table_name()?,
        },
        Sink::Bigquery => Destination::BigQuery {
            params: config::BigQueryParams::from_env()?,
            table: table_name()?,
        },
        Sink::Snowflake => Destination::Snowflake {
            params: config::SnowflakeParams::from_env()?,
            table: table_name()?,
        },
    })
}

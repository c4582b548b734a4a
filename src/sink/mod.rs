// sink module - writes one fetched table to one destination
//
// architecture:
//   Destination (enum) -> selects exactly one adapter per invocation
//   csv.rs       -> local file
//   postgres.rs  -> relational database
//   bigquery.rs  -> columnar warehouse
//   snowflake.rs -> cloud warehouse
//   sql.rs       -> shared statement generation for the SQL sinks
//
// every adapter replaces the destination table in full; none of them
// append or merge

mod bigquery;
mod csv;
mod postgres;
mod snowflake;
mod sql;

use std::path::PathBuf;

use crate::Result;
use crate::config::{BigQueryParams, PostgresParams, SnowflakeParams};
use crate::error::Error;
use crate::table::Table;

/// The single target a fetched table is written to.
#[derive(Debug)]
pub enum Destination {
    Csv {
        path: PathBuf,
    },
    Postgres {
        params: PostgresParams,
        table: String,
    },
    BigQuery {
        params: BigQueryParams,
        table: String,
    },
    Snowflake {
        params: SnowflakeParams,
        table: String,
    },
}

/// Route the table to the destination's adapter and run the write
/// once. The adapter's outcome propagates unchanged.
pub fn write(table: &Table, destination: &Destination) -> Result<()> {
    if table.columns().is_empty() && !matches!(destination, Destination::Csv { .. }) {
        return Err(Error::Write(
            "refusing to create a table with no columns".to_string(),
        ));
    }
    match destination {
        Destination::Csv { path } => csv::write(table, path),
        Destination::Postgres { params, table: name } => postgres::write(table, params, name),
        Destination::BigQuery { params, table: name } => bigquery::write(table, params, name),
        Destination::Snowflake { params, table: name } => snowflake::write(table, params, name),
    }
}

use std::env;

use crate::Result;
use crate::error::Error;

// Connection parameters are read once per invocation, only for the
// destination that was actually selected, and dropped when the write
// finishes. A missing variable surfaces here, before any connection
// attempt.

fn evar(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Connection(format!("{name} is not set")))
}

/// API credential for the fetch side.
pub fn api_key() -> Result<String> {
    env::var("CFBD_API_KEY").map_err(|_| Error::Validation("CFBD_API_KEY is not set".to_string()))
}

#[derive(Debug, Clone)]
pub struct PostgresParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl PostgresParams {
    pub fn from_env() -> Result<PostgresParams> {
        let port = evar("POSTGRES_PORT")?;
        Ok(PostgresParams {
            host: evar("POSTGRES_HOST")?,
            port: port.parse().map_err(|_| {
                Error::Connection(format!("POSTGRES_PORT is not a port number: {port}"))
            })?,
            user: evar("POSTGRES_USER")?,
            password: evar("POSTGRES_PASSWORD")?,
            dbname: evar("POSTGRES_DBNAME")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BigQueryParams {
    pub project_id: String,
    pub access_token: String,
}

impl BigQueryParams {
    pub fn from_env() -> Result<BigQueryParams> {
        Ok(BigQueryParams {
            project_id: evar("BIGQUERY_PROJECT_ID")?,
            access_token: evar("BIGQUERY_ACCESS_TOKEN")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SnowflakeParams {
    pub account: String,
    pub user: String,
    pub password: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,
    pub role: Option<String>,
}

impl SnowflakeParams {
    pub fn from_env() -> Result<SnowflakeParams> {
        Ok(SnowflakeParams {
            account: evar("SNOWFLAKE_ACCT")?,
            user: evar("SNOWFLAKE_USER")?,
            password: evar("SNOWFLAKE_PASS")?,
            warehouse: evar("SNOWFLAKE_WAREHOUSE")?,
            database: evar("SNOWFLAKE_DB")?,
            schema: evar("SNOWFLAKE_SCHEMA")?,
            role: env::var("SNOWFLAKE_ROLE").ok(),
        })
    }
}

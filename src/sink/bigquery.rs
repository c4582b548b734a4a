use log::info;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::BigQueryParams;
use crate::error::Error;
use crate::table::Table;

use super::sql::{self, Dialect};

const ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";

// Request/response bodies for the jobs.query endpoint, documented at
// https://cloud.google.com/bigquery/docs/reference/rest/v2/jobs/query
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    query: String,
    use_legacy_sql: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct QueryResponse {
    job_complete: bool,
    errors: Vec<JobError>,
}

#[derive(Deserialize, Default)]
struct JobError {
    message: String,
}

/// Replace the dataset-qualified `name` under the configured project.
/// Each statement of the replace script runs as one synchronous query
/// job; the first rejected statement aborts the write.
pub fn write(table: &Table, params: &BigQueryParams, name: &str) -> Result<()> {
    let url = format!("{ENDPOINT}/projects/{}/queries", params.project_id);
    let qualified = format!("{}.{}", params.project_id, name);
    let http = reqwest::blocking::Client::new();

    for statement in sql::replace_script(Dialect::BigQuery, &qualified, table) {
        let resp = http
            .post(&url)
            .bearer_auth(&params.access_token)
            .json(&QueryRequest {
                query: statement,
                use_legacy_sql: false,
            })
            .send()
            .map_err(|e| Error::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Error::Write(format!(
                "bigquery refused statement: status {}",
                resp.status().as_u16()
            )));
        }
        let body: QueryResponse = resp.json().map_err(|e| Error::Write(e.to_string()))?;
        if let Some(err) = body.errors.first() {
            return Err(Error::Write(err.message.clone()));
        }
        if !body.job_complete {
            return Err(Error::Write("bigquery job did not complete".to_string()));
        }
    }

    info!("replaced table {name} ({} rows)", table.rows().len());
    Ok(())
}

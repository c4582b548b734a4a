use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::config::SnowflakeParams;
use crate::error::Error;
use crate::table::Table;

use super::sql::{self, Dialect};

// Wire shapes for the session login and query endpoints, as spoken by
// the vendor connectors (session/v1/login-request, queries/v1/query-request).

#[derive(Serialize)]
struct LoginRequest {
    data: LoginData,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct LoginData {
    account_name: String,
    login_name: String,
    password: String,
    client_app_id: String,
    client_app_version: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    success: bool,
    message: Option<String>,
    data: Option<LoginToken>,
}

#[derive(Deserialize)]
struct LoginToken {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    sql_text: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    success: bool,
    message: Option<String>,
}

/// One authenticated Snowflake session. Logout happens in [`Drop`], so
/// the session is released on every exit path, including a rejected
/// write partway through the script.
struct Session {
    http: reqwest::blocking::Client,
    base: String,
    token: String,
}

impl Session {
    fn connect(params: &SnowflakeParams) -> Result<Session> {
        let base = format!("https://{}.snowflakecomputing.com", params.account);
        let http = reqwest::blocking::Client::new();

        let mut url = format!(
            "{base}/session/v1/login-request?warehouse={}&databaseName={}&schemaName={}",
            params.warehouse, params.database, params.schema
        );
        if let Some(role) = &params.role {
            url.push_str("&roleName=");
            url.push_str(role);
        }

        let request = LoginRequest {
            data: LoginData {
                account_name: params.account.clone(),
                login_name: params.user.clone(),
                password: params.password.clone(),
                client_app_id: env!("CARGO_PKG_NAME").to_string(),
                client_app_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        let resp = http
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| Error::Connection(e.to_string()))?;
        let body: LoginResponse = resp.json().map_err(|e| Error::Connection(e.to_string()))?;
        if !body.success {
            return Err(Error::Connection(
                body.message.unwrap_or_else(|| "login refused".to_string()),
            ));
        }
        let token = body
            .data
            .ok_or_else(|| Error::Connection("login response carried no token".to_string()))?
            .token;

        Ok(Session { http, base, token })
    }

    // Run one statement. The caller decides which error class a
    // failure maps to, so this returns the bare message.
    fn execute(&self, statement: &str) -> std::result::Result<(), String> {
        debug!("snowflake: {statement}");
        let url = format!(
            "{}/queries/v1/query-request?requestId={}",
            self.base,
            Uuid::new_v4()
        );
        let outcome = self
            .http
            .post(&url)
            .header("Authorization", format!("Snowflake Token=\"{}\"", self.token))
            .json(&QueryRequest {
                sql_text: statement.to_string(),
            })
            .send()
            .and_then(|resp| resp.json::<QueryResponse>());
        match outcome {
            Ok(body) if body.success => Ok(()),
            Ok(body) => Err(body
                .message
                .unwrap_or_else(|| "statement refused".to_string())),
            Err(err) => Err(err.to_string()),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let url = format!("{}/session/logout-request", self.base);
        let _ = self
            .http
            .post(&url)
            .header("Authorization", format!("Snowflake Token=\"{}\"", self.token))
            .send();
    }
}

/// Replace `name` in the configured warehouse. The session's default
/// context may differ from the configured one, so warehouse, database,
/// and schema are selected explicitly before the write; the script is
/// committed before the session is released.
pub fn write(table: &Table, params: &SnowflakeParams, name: &str) -> Result<()> {
    let session = Session::connect(params)?;

    for statement in [
        format!("USE WAREHOUSE {}", params.warehouse),
        format!("USE DATABASE {}", params.database),
        format!("USE SCHEMA {}", params.schema),
    ] {
        session.execute(&statement).map_err(Error::Context)?;
    }

    for statement in sql::replace_script(Dialect::Snowflake, name, table) {
        session.execute(&statement).map_err(Error::Write)?;
    }
    session.execute("COMMIT").map_err(Error::Write)?;

    info!("replaced table {name} ({} rows)", table.rows().len());
    Ok(())
}

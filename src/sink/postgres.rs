use log::info;
use postgres::NoTls;

use crate::Result;
use crate::config::PostgresParams;
use crate::error::Error;
use crate::table::Table;

use super::sql::{self, Dialect};

/// Replace `name` in the target database with the table's contents.
/// Drop, create, and insert run inside one transaction, so a rejected
/// write leaves the previous copy of the table intact.
pub fn write(table: &Table, params: &PostgresParams, name: &str) -> Result<()> {
    let mut client = postgres::Config::new()
        .host(&params.host)
        .port(params.port)
        .user(&params.user)
        .password(&params.password)
        .dbname(&params.dbname)
        .connect(NoTls)
        .map_err(|e| Error::Connection(e.to_string()))?;

    let script = sql::replace_script(Dialect::Postgres, name, table).join(";\n");

    let mut tx = client
        .transaction()
        .map_err(|e| Error::Write(e.to_string()))?;
    tx.batch_execute(&script)
        .map_err(|e| Error::Write(e.to_string()))?;
    tx.commit().map_err(|e| Error::Write(e.to_string()))?;

    info!("replaced table {name} ({} rows)", table.rows().len());
    Ok(())
}

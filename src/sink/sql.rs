use serde_json::Value;

use crate::table::Table;

// Statements are assembled as plain text. The three sinks disagree on
// identifier quoting, string escaping, and type names; everything else
// is shared.

/// Rows per INSERT statement. Large pulls split into several inserts
/// so no single statement outgrows what the warehouses accept.
const INSERT_CHUNK: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dialect {
    Postgres,
    BigQuery,
    Snowflake,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnType {
    Boolean,
    Integer,
    Float,
    Text,
}

impl Dialect {
    fn quote_ident(self, name: &str) -> String {
        match self {
            Dialect::BigQuery => format!("`{}`", name.replace('`', "\\`")),
            _ => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    // BigQuery table names arrive dataset-qualified and are quoted as
    // one path; the others treat the name as a single identifier.
    fn quote_table(self, name: &str) -> String {
        match self {
            Dialect::BigQuery => format!("`{}`", name.replace('`', "\\`")),
            _ => self.quote_ident(name),
        }
    }

    fn type_name(self, column: ColumnType) -> &'static str {
        match (self, column) {
            (Dialect::Postgres, ColumnType::Boolean) => "BOOLEAN",
            (Dialect::Postgres, ColumnType::Integer) => "BIGINT",
            (Dialect::Postgres, ColumnType::Float) => "DOUBLE PRECISION",
            (Dialect::Postgres, ColumnType::Text) => "TEXT",
            (Dialect::BigQuery, ColumnType::Boolean) => "BOOL",
            (Dialect::BigQuery, ColumnType::Integer) => "INT64",
            (Dialect::BigQuery, ColumnType::Float) => "FLOAT64",
            (Dialect::BigQuery, ColumnType::Text) => "STRING",
            (Dialect::Snowflake, ColumnType::Boolean) => "BOOLEAN",
            (Dialect::Snowflake, ColumnType::Integer) => "BIGINT",
            (Dialect::Snowflake, ColumnType::Float) => "DOUBLE",
            (Dialect::Snowflake, ColumnType::Text) => "VARCHAR",
        }
    }

    fn string_literal(self, s: &str) -> String {
        match self {
            // BigQuery escapes with backslashes, not doubled quotes.
            Dialect::BigQuery => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            _ => format!("'{}'", s.replace('\'', "''")),
        }
    }

    fn literal(self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => self.string_literal(s),
            other => self.string_literal(&other.to_string()),
        }
    }
}

// A column's type is the widest scalar type its cells carry: integers
// widen to float alongside floats, anything else widens to text.
// Nulls carry no type; an all-null column lands on text.
fn infer_column(table: &Table, col: usize) -> ColumnType {
    let mut seen: Option<ColumnType> = None;
    for row in table.rows() {
        let next = match &row[col] {
            Value::Null => continue,
            Value::Bool(_) => ColumnType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ColumnType::Integer,
            Value::Number(_) => ColumnType::Float,
            _ => ColumnType::Text,
        };
        seen = Some(match (seen, next) {
            (None, first) => first,
            (Some(a), b) if a == b => a,
            (Some(ColumnType::Integer), ColumnType::Float)
            | (Some(ColumnType::Float), ColumnType::Integer) => ColumnType::Float,
            _ => ColumnType::Text,
        });
    }
    seen.unwrap_or(ColumnType::Text)
}

/// The statements that replace `name` with the table's contents, in
/// execution order: destroy any previous copy, create the table from
/// the inferred column types, insert every row.
pub fn replace_script(dialect: Dialect, name: &str, table: &Table) -> Vec<String> {
    let target = dialect.quote_table(name);

    let column_defs = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, column)| {
            format!(
                "{} {}",
                dialect.quote_ident(column),
                dialect.type_name(infer_column(table, col))
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut statements = Vec::new();
    match dialect {
        Dialect::Postgres => {
            statements.push(format!("DROP TABLE IF EXISTS {target}"));
            statements.push(format!("CREATE TABLE {target} ({column_defs})"));
        }
        _ => statements.push(format!("CREATE OR REPLACE TABLE {target} ({column_defs})")),
    }

    let column_list = table
        .columns()
        .iter()
        .map(|c| dialect.quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    for chunk in table.rows().chunks(INSERT_CHUNK) {
        let values = chunk
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .map(|v| dialect.literal(v))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({cells})")
            })
            .collect::<Vec<_>>()
            .join(", ");
        statements.push(format!(
            "INSERT INTO {target} ({column_list}) VALUES {values}"
        ));
    }

    statements
}

// cfbd module - one-shot queries against the CollegeFootballData API
//
// architecture:
//   query.rs    -> category + ordered filters, rendered as a URL
//   client.rs   -> authenticated blocking GET, JSON -> Table
//   constant.rs -> base URL and defaults

mod client;
mod constant;
mod query;

pub use client::Client;
pub use constant::DEFAULT_TIMEOUT_SECS;
pub use query::Query;

//! cfbpull pulls one query's worth of college football statistics from
//! the CollegeFootballData API and dumps the normalized table to a CSV
//! file or a database destination.

pub mod cfbd;
pub mod config;
pub mod error;
pub mod sink;
pub mod table;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

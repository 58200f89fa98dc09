// SQLite engine: a worker-thread `Connection` over rusqlite.
//
// - config: open options, quota and version handling
// - params: parameter conversion to rusqlite values
// - query: statement execution and result extraction
// - worker / dispatcher: the worker thread and its transaction loop

pub mod config;
mod dispatcher;
pub mod params;
pub mod query;
pub mod worker;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use query::build_result_set;
pub use worker::SqliteConnection;

mod cancel;
pub use cancel::{CancelToken, ResolveOptions};

pub mod compile;

pub mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

mod engine;

mod record;
pub use record::{Field, Record};

mod resolved;
pub use resolved::Resolved;

pub use onyx_core::{
    driver::{self, Driver, Row},
    schema::{self, Schema},
    stmt::{self, Filter, Value},
    Error, Result,
};

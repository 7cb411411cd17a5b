pub mod db;

pub mod categories;
pub mod funding;
pub mod goals;
pub mod ledger;
pub mod projection;
pub mod recurring;

pub mod errors;
pub mod schema;
pub(crate) mod utils;

pub use errors::{Error, Result};
pub use funding::*;
pub use projection::*;

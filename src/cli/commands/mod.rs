//! CLI command implementations
//!
//! Handlers return the text to print so they can be exercised without a
//! terminal.

pub mod inspect;
pub mod records;
pub mod sql;

pub use inspect::{handle_events, handle_forms, handle_metadata};
pub use records::handle_records;
pub use sql::handle_sql;

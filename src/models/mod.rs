//! Models module for the SDK
//!
//! Defines the data structures reconstructed from a REDCap project's
//! metadata and record exports.

pub mod event;
pub mod field;
pub mod form;
pub mod record;

pub use event::{Arm, Event};
pub use field::{Choice, Field, FieldType, Validation};
pub use form::{EVENT_NAME_COLUMN, FORM_STATUS_COLUMN, Form};
pub use record::Record;

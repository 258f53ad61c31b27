//! Questionnaire answer schema
//!
//! This module defines the typed input schema for diagnosis requests: the
//! raw answer record, its categorical enumerations, and range validation.

mod answers;

pub use answers::*;

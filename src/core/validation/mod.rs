//! Validation and filtering of mutation payloads
//!
//! Payloads pass through field filters (whitespace trimming) before they are
//! deserialized and checked with `validator` rules declared on the input
//! structs.

pub mod extractor;
pub mod filters;

pub use extractor::Validated;

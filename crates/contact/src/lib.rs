//! Contact field validation for order submission.

pub mod validator;

pub use validator::{ContactInput, FieldId, ValidationReport, validate};

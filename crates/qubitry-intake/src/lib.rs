//! # qubitry-intake
//!
//! Patient intake for the Qubitry workbench.
//!
//! This crate provides:
//!
//! - [`validator::FormValidator`], which implements the
//!   [`qubitry_core::traits::IntakeValidator`] trait. It checks a
//!   manual-entry form in two phases: JSON Schema structure via the
//!   `jsonschema` crate, then declarative rules (`RequiredField`,
//!   `NonEmpty`, `AllowedValues`, `Custom`).
//! - [`csv_import::read_records`], which parses a patient CSV upload into
//!   `ImportedRecord`s, rejecting the whole file on the first bad row.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use qubitry_intake::validator::FormValidator;
//!
//! let mut validator = FormValidator::new();
//! validator.register_rule("catalog-medications", Box::new(|form| {
//!     // return Some(message) to reject the form
//!     None
//! }));
//! ```

pub mod csv_import;
pub mod validator;

pub use csv_import::read_records;
pub use validator::FormValidator;

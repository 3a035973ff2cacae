//! Schema definitions and structural validation.
//!
//! Task input and output shapes are declared as plain JSON-schema values
//! (via [`ObjectSchema`] or `serde_json::json!`) and checked with
//! [`SchemaValidator`]. Validation is structural only: field presence, type,
//! enum membership, numeric range, string/array length, regex pattern.
//! No business rules live here.
//!
//! # Examples
//!
//! ```
//! use structcall::schema::{ObjectSchema, SchemaValidator};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .property("sentiment", json!({"type": "string", "enum": ["Positive", "Neutral", "Negative"]}))
//!     .required(["sentiment"])
//!     .build();
//!
//! let validator = SchemaValidator::strict(schema);
//! assert!(validator.validate(&json!({"sentiment": "Positive"})).is_valid());
//! assert!(!validator.validate(&json!({})).is_valid());
//! ```

pub mod builder;
pub mod error;
pub mod validator;

pub use builder::{non_empty_string, ObjectSchema};
pub use error::{ValidationError, ValidationResult};
pub use validator::SchemaValidator;

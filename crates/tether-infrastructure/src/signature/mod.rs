//! Signatures - registration-time introspection
//!
//! Emulates runtime reflection with an explicit table of declared classes,
//! functions and methods, optionally assembled from modules registered at
//! compile time through `linkme`.

pub mod registry;
pub mod table;

pub use registry::{SIGNATURES, SignatureEntry, list_signature_modules};
pub use table::{SignatureTable, SignatureTableBuilder};

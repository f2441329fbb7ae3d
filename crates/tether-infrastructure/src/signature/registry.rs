//! Signature Registry
//!
//! Compile-time registration of signature modules. A crate declares its
//! constructible units in a function and submits it to [`SIGNATURES`]; the
//! container collects every submitted module at startup.
//!
//! ```ignore
//! use tether_infrastructure::signature::{SignatureEntry, SignatureTableBuilder, SIGNATURES};
//!
//! #[linkme::distributed_slice(SIGNATURES)]
//! static MAILING: SignatureEntry = SignatureEntry {
//!     name: "mailing",
//!     description: "Mailer and transports",
//!     register: register_mailing,
//! };
//!
//! fn register_mailing(builder: &mut SignatureTableBuilder) {
//!     builder.class(ClassInfo::new("Mailer").instantiate_with(Mailer::default));
//! }
//! ```

use tracing::debug;

use super::table::{SignatureTable, SignatureTableBuilder};

/// Registry entry for a signature module
pub struct SignatureEntry {
    /// Unique module name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Declares the module's signatures
    pub register: fn(&mut SignatureTableBuilder),
}

// Auto-collection via linkme distributed slices - modules submit entries at compile time
#[linkme::distributed_slice]
pub static SIGNATURES: [SignatureEntry] = [..];

impl SignatureTableBuilder {
    /// Builder pre-populated with every registered signature module
    pub fn from_registry() -> Self {
        let mut builder = Self::default();
        for entry in SIGNATURES {
            debug!(module = entry.name, "registering signature module");
            (entry.register)(&mut builder);
        }
        builder
    }
}

impl SignatureTable {
    /// Table of every registered signature module
    pub fn from_registry() -> Self {
        SignatureTableBuilder::from_registry().build()
    }
}

/// List all registered signature modules
///
/// Returns (name, description) pairs, useful for diagnostics.
pub fn list_signature_modules() -> Vec<(&'static str, &'static str)> {
    SIGNATURES.iter().map(|e| (e.name, e.description)).collect()
}

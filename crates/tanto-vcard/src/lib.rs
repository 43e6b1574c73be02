//! vCard property model and format-dispatch registry.
//!
//! This crate provides typed vCard properties and reads and writes them as
//! plain text (RFC 2426 / RFC 6350), xCard (RFC 6351) and jCard (RFC 7095):
//!
//! - `model`: Cards, properties, parameters and the capability traits
//! - `scribe`: Per-property encoders and the registry that dispatches to them
//! - `io`: The encode/decode engine and the three format adapters
//!
//! ## Example
//!
//! ```rust
//! use tanto_vcard::io::{ReadOptions, WriteOptions, text};
//! use tanto_vcard::model::{HasLanguage, Note, VCard, VCardVersion};
//! use tanto_vcard::scribe::ScribeRegistry;
//!
//! let registry = ScribeRegistry::shared();
//!
//! let mut note = Note::new("hello");
//! note.set_language(Some("en"));
//! let mut card = VCard::with_version(VCardVersion::V4);
//! card.add_property(note);
//!
//! let output = text::write_single(&card, registry, &WriteOptions::default())?;
//! assert!(output.contains("NOTE;LANGUAGE=en:hello\r\n"));
//!
//! let decoded = text::read(&output, registry, ReadOptions::default());
//! let note = decoded[0].card.property::<Note>().map(|note| note.value.as_str());
//! assert_eq!(note, Some("hello"));
//! # Ok::<(), tanto_vcard::error::VCardError>(())
//! ```

pub mod constants;
pub mod error;
pub mod io;
pub mod model;
pub mod scribe;

#[cfg(test)]
mod tests;

// Re-export commonly used items at crate level
pub use error::{VCardError, VCardResult};
pub use io::{Decoded, ReadOptions, Warning, WarningKind, WriteOptions};
pub use model::{VCard, VCardProperty, VCardVersion};
pub use scribe::ScribeRegistry;

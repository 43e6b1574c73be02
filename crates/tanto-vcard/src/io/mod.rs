//! Reading and writing documents.
//!
//! ## Summary
//! [`encode`] turns a card into wire tokens and [`CardDecoder`] turns tokens
//! back into a card. The format adapters ([`text`], [`xml`], [`json`]) only
//! deal with their own syntax and delegate everything else to these two.

pub mod decode;
pub mod encode;
pub mod json;
pub mod text;
pub mod warning;
pub mod xml;

pub use decode::{CardDecoder, ContentToken, Decoded};
pub use encode::{Encoded, WriteOptions, encode};
pub use json::{JCardReader, JCardWriter};
pub use text::ReadOptions;
pub use warning::{Warning, WarningKind};

//! xCard (RFC 6351) reading and writing.
//!
//! xCard documents are always vCard 4.0. Groups become `<group name="..">`
//! wrappers, parameters are listed under `<parameters>` and values are
//! elements named after their data type. Structured values use the
//! component names their scribe declares.

mod reader;
mod writer;

pub use reader::read;
pub use writer::{write, write_single};

/// Namespace of every xCard element.
pub const NAMESPACE: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// Element name for component `index` of a structured value whose scribe
/// declares no component names.
fn component_name(labels: &[&str], index: usize) -> String {
    labels
        .get(index)
        .map_or_else(|| format!("component{}", index + 1), |label| (*label).to_owned())
}

/// Highest `componentN` accepted when reading.
const MAX_COMPONENTS: usize = 64;

/// Inverse of [`component_name`]. Numbered components past
/// [`MAX_COMPONENTS`] are not recognised.
fn component_index(labels: &[&str], name: &str) -> Option<usize> {
    labels.iter().position(|label| *label == name).or_else(|| {
        name.strip_prefix("component")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n <= MAX_COMPONENTS)
            .and_then(|n| n.checked_sub(1))
    })
}

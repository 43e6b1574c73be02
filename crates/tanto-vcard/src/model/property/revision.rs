use chrono::{DateTime, Utc};

use crate::model::version::VersionSet;

crate::property_type! {
    /// Time the card was last modified (`REV`).
    pub struct Revision(DateTime<Utc>) {
        name: "REV",
        versions: VersionSet::ALL,
        text: |revision| revision.value.format("%Y%m%dT%H%M%SZ").to_string(),
    }
}

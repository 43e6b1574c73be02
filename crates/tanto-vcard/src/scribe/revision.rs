use chrono::{DateTime, NaiveDateTime, Utc};

use super::{Scribe, TypedScribe};
use crate::error::ParseFailure;
use crate::model::{
    ParameterBag, PropertyType, Revision, VCardProperty, VCardVersion, ValueShape, ValueType,
    WireValue,
};

const BASIC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const EXTENDED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Scribe for `REV`.
///
/// 4.0 uses the basic timestamp format (`20240115T103000Z`); 2.1 and 3.0 use
/// the extended one (`2024-01-15T10:30:00Z`). Both are accepted on input.
#[derive(Debug, Default)]
pub struct RevisionScribe;

impl RevisionScribe {
    fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        NaiveDateTime::parse_from_str(value, BASIC_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(value, EXTENDED_FORMAT))
            .map(|dt| dt.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    }
}

impl Scribe for RevisionScribe {
    fn property_name(&self) -> &str {
        Revision::NAME
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Raw
    }

    fn default_data_type(&self, _version: VCardVersion) -> ValueType {
        ValueType::Timestamp
    }

    fn write_value(&self, property: &dyn VCardProperty, version: VCardVersion) -> WireValue {
        let Some(revision) = property.downcast_ref::<Revision>() else {
            return WireValue::Raw(property.text_value());
        };
        let format = match version {
            VCardVersion::V4 => BASIC_FORMAT,
            VCardVersion::V2_1 | VCardVersion::V3 => EXTENDED_FORMAT,
        };
        WireValue::Raw(revision.value.format(format).to_string())
    }

    fn parse_value(
        &self,
        value: WireValue,
        _parameters: &ParameterBag,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        let text = value.into_text();
        let timestamp = Self::parse_timestamp(&text).ok_or_else(|| {
            ParseFailure::new(Revision::NAME, format!("{text:?} is not a timestamp"))
        })?;
        Ok(Box::new(Revision::new(timestamp)))
    }
}

impl TypedScribe for RevisionScribe {
    type Property = Revision;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn revision() -> Revision {
        Revision::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
                .single()
                .expect("valid date"),
        )
    }

    #[test]
    fn format_follows_version() {
        let scribe = RevisionScribe;

        assert_eq!(
            scribe.write_value(&revision(), VCardVersion::V4),
            WireValue::Raw("20240115T103000Z".to_owned())
        );
        assert_eq!(
            scribe.write_value(&revision(), VCardVersion::V3),
            WireValue::Raw("2024-01-15T10:30:00Z".to_owned())
        );
    }

    #[test]
    fn parses_both_formats() {
        for input in ["20240115T103000Z", "2024-01-15T10:30:00Z", "2024-01-15T11:30:00+01:00"] {
            let parsed = RevisionScribe
                .parse_value(
                    WireValue::Raw(input.to_owned()),
                    &ParameterBag::new(),
                    VCardVersion::V4,
                )
                .expect("timestamp should parse");
            assert_eq!(parsed.downcast_ref::<Revision>(), Some(&revision()));
        }
    }

    #[test]
    fn rejects_garbage() {
        let err = RevisionScribe
            .parse_value(
                WireValue::Raw("yesterday".to_owned()),
                &ParameterBag::new(),
                VCardVersion::V4,
            )
            .expect_err("not a timestamp");
        assert_eq!(err.property, "REV");
    }
}

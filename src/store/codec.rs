//! Serialization of the saved collection into the single storage blob.
//!
//! The current layout is `{"version": 1, "records": [...]}`. Blobs written
//! before the layout was versioned are a bare JSON array of records and are
//! still accepted on decode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::PresentationRecord;

/// Layout version written by [`encode`].
pub const STORAGE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid storage blob: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported storage version {found}, expected at most {expected}")]
    UnsupportedVersion { expected: u32, found: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Bare array, no version field.
    Legacy,
    Versioned(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub layout: Layout,
    pub records: Vec<PresentationRecord>,
}

impl Decoded {
    /// Whether the blob should be rewritten in the current layout.
    pub fn needs_upgrade(&self) -> bool {
        self.layout != Layout::Versioned(STORAGE_VERSION)
            || self.records.iter().any(|r| r.id.is_none())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    records: &'a [PresentationRecord],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Persisted {
    Versioned {
        version: u32,
        #[serde(default)]
        records: Vec<PresentationRecord>,
    },
    Legacy(Vec<PresentationRecord>),
}

pub fn encode(records: &[PresentationRecord]) -> Result<String, CodecError> {
    let envelope = EnvelopeRef {
        version: STORAGE_VERSION,
        records,
    };
    Ok(serde_json::to_string(&envelope)?)
}

pub fn decode(blob: &str) -> Result<Decoded, CodecError> {
    match serde_json::from_str::<Persisted>(blob)? {
        Persisted::Legacy(records) => Ok(Decoded {
            layout: Layout::Legacy,
            records,
        }),
        Persisted::Versioned { version, records } => {
            if version > STORAGE_VERSION {
                return Err(CodecError::UnsupportedVersion {
                    expected: STORAGE_VERSION,
                    found: version,
                });
            }
            Ok(Decoded {
                layout: Layout::Versioned(version),
                records,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_array_decodes_with_missing_fields() {
        let blob = r#"[
            {"title":"A","link":"https://a","category":"training","date":"01.02.2024"},
            {"title":"B","link":"https://b"}
        ]"#;
        let decoded = decode(blob).unwrap();
        assert_eq!(decoded.layout, Layout::Legacy);
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].date.as_deref(), Some("01.02.2024"));
        assert_eq!(decoded.records[1].category, "");
        assert!(decoded.needs_upgrade());
    }

    #[test]
    fn null_category_keeps_the_collection() {
        let blob = r#"{"version":1,"records":[
            {"title":"A","link":"https://a","category":"training"},
            {"title":"B","link":"https://b","category":null}
        ]}"#;
        let decoded = decode(blob).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[1].display_category(), "other");
    }

    #[test]
    fn encoded_blob_carries_version() {
        let records = vec![PresentationRecord::new("A", "https://a", "product")];
        let blob = encode(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], STORAGE_VERSION);
        assert_eq!(value["records"][0]["title"], "A");
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = decode(r#"{"version":7,"records":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedVersion { found: 7, .. }
        ));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#""just a string""#).is_err());
    }
}

//! Reading and writing documents as YAML.
//!
//! ```yaml
//! attributes:
//!   title: Etude
//!   tempo: 96
//! tracks:
//!   - attributes:
//!       name: Lead
//!       strings: [64, 59, 55, 50, 45, 40]
//!     measures:
//!       - - duration: 4
//!           notes:
//!             - { string: 1, fret: 3 }
//!         - duration: 4
//! ```

use log::warn;

use crate::{CodecError, Document};

/// Parse a document and assign its measures' back-references.
///
/// Tracks of different lengths are accepted with a warning.
///
/// # Errors
///
/// Fails if `source` is not valid YAML or does not describe a document.
pub fn from_yaml(source: &str) -> Result<Document, CodecError> {
    let mut document: Document = serde_yaml::from_str(source).map_err(CodecError::Parse)?;
    document.renumber();

    if !document.is_aligned() {
        warn!(
            "Tracks differ in length, the longest has {} measure(s)",
            document.measure_count()
        );
    }
    Ok(document)
}

/// # Errors
///
/// Fails if the document cannot be represented as YAML.
pub fn to_yaml(document: &Document) -> Result<String, CodecError> {
    serde_yaml::to_string(document).map_err(CodecError::Write)
}

use thiserror::Error;

use crate::{EditKind, ObjectKind, Side};

/// Raised when a token sequence cannot be turned back into a `Document`.
///
/// Every variant points at the offending token so that broken merge results
/// can be traced back to the change that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Cannot restore a document from an empty token sequence")]
    EmptySequence,

    #[error("Token {index} must open the document, found a {found} marker instead")]
    MissingDocumentMarker { index: usize, found: ObjectKind },

    #[error("Token {index} opens a second document")]
    DuplicateDocument { index: usize },

    #[error("Field `{name}` at token {index} has no enclosing object")]
    OrphanField { index: usize, name: String },

    #[error("Measure at token {index} appears before any track")]
    MeasureWithoutTrack { index: usize },

    #[error("{kind} marker at token {index} appears before any track")]
    MissingTrack { index: usize, kind: ObjectKind },
}

/// Raised when an edit script handed to the combiner breaks the pairwise
/// diff contract: edits must be ordered, gap-free and cover both sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("{side} edit {index} has a reversed range")]
    ReversedRange { side: Side, index: usize },

    #[error("{side} edit {index} starts at base index {found}, expected {expected}")]
    BaseGap {
        side: Side,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{side} edit {index} starts at other index {found}, expected {expected}")]
    OtherGap {
        side: Side,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{side} edit script covers {covered} of {expected} base elements")]
    IncompleteBase {
        side: Side,
        covered: usize,
        expected: usize,
    },

    #[error("{side} edit script covers {covered} of {expected} elements of its version")]
    IncompleteOther {
        side: Side,
        covered: usize,
        expected: usize,
    },

    #[error(
        "{side} edit {index} is tagged {kind} but spans {base_len} base and {other_len} other \
         elements"
    )]
    InconsistentKind {
        side: Side,
        index: usize,
        kind: EditKind,
        base_len: usize,
        other_len: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabDiffError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error("Merging requires a base and two descendants, but only two versions were given")]
    MergeRequiresThreeVersions,
}

/// Failures of the YAML document codec.
#[cfg(feature = "yaml")]
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to parse document: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("Failed to write document: {0}")]
    Write(#[source] serde_yaml::Error),
}

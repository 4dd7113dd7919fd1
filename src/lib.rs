mod canonical;
#[cfg(feature = "yaml")]
pub mod codec;
mod comparison;
mod diffs;
mod document;
mod errors;
mod grid;
mod merge;
mod navigation;
mod report;
mod utils;

pub use canonical::{ObjectKind, Token, flatten, measures, restore, track_signature};
pub use comparison::Comparison;
pub use diffs::{Edit, EditKind, diff, validate_script};
pub use document::{
    Attributes, Beat, Document, Freeze, FrozenValue, Measure, Note, Placeholder, Track, Value,
};
pub use errors::{AlignmentError, StructuralError, TabDiffError};
#[cfg(feature = "yaml")]
pub use errors::CodecError;
pub use grid::{Grid, LEGEND, Symbol, project};
pub use merge::{AlignedChange, MergeCache, Versions, apply, apply_keeping, combine};
pub use navigation::{LineChanges, NavigationIndex};
pub use report::attribute_report;
pub use utils::{pane::Pane, side::Side};

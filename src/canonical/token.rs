use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FrozenValue, Measure, Placeholder};

/// The kinds of structured objects making up a `Document`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Document,
    PageSetup,
    Track,
    Channel,
    Settings,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Document => write!(f, "document"),
            ObjectKind::PageSetup => write!(f, "page setup"),
            ObjectKind::Track => write!(f, "track"),
            ObjectKind::Channel => write!(f, "channel"),
            ObjectKind::Settings => write!(f, "track settings"),
        }
    }
}

/// The atomic unit of a flattened `Document`.
///
/// A `TypeMarker` opens an object and announces how many `Field`s follow
/// it; measures are embedded whole so that they diff as single units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    TypeMarker {
        kind: ObjectKind,
        field_count: usize,
    },
    Field {
        name: Box<str>,
        value: FrozenValue,
    },
    Measure(Measure),
}

impl Token {
    #[must_use]
    pub fn is_marker(&self, of_kind: ObjectKind) -> bool {
        matches!(self, Token::TypeMarker { kind, .. } if *kind == of_kind)
    }

    #[must_use]
    pub fn is_type_marker(&self) -> bool { matches!(self, Token::TypeMarker { .. }) }
}

impl Placeholder for Token {
    fn is_placeholder(&self) -> bool {
        match self {
            Token::Measure(measure) => measure.is_empty(),
            Token::TypeMarker { .. } | Token::Field { .. } => false,
        }
    }
}

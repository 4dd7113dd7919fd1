use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Side;

/// One of the (up to three) sequences shown side by side: the local
/// descendant, the common base and the remote descendant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Local,
    Base,
    Remote,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Local, Pane::Base, Pane::Remote];

    pub(crate) const fn index(self) -> usize {
        match self {
            Pane::Local => 0,
            Pane::Base => 1,
            Pane::Remote => 2,
        }
    }
}

impl From<Side> for Pane {
    fn from(side: Side) -> Self {
        match side {
            Side::Local => Pane::Local,
            Side::Remote => Pane::Remote,
        }
    }
}

impl Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::Local => write!(f, "Local"),
            Pane::Base => write!(f, "Base"),
            Pane::Remote => write!(f, "Remote"),
        }
    }
}

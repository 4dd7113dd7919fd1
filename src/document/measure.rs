use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fretted note: the (1-based) string and the fret pressed on it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub string: u8,
    pub fret: u8,
}

/// A beat lasting `duration` ticks. A beat without notes is a rest.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Beat {
    pub duration: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Vec<Note>,
}

impl Beat {
    #[must_use]
    pub fn new(duration: u16, notes: Vec<Note>) -> Self { Self { duration, notes } }

    #[must_use]
    pub fn rest(duration: u16) -> Self { Self::new(duration, Vec::new()) }

    #[must_use]
    pub fn is_rest(&self) -> bool { self.notes.is_empty() }
}

/// The content of one track at one position of the timeline.
///
/// Besides its beats a measure remembers which track it belongs to and where
/// it sits in that track. These back-references are assigned when the owning
/// document is built or restored and are ignored by equality and hashing,
/// so a measure moved to another track still compares equal to its original.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default)]
pub struct Measure {
    beats: Vec<Beat>,

    #[cfg_attr(feature = "serde", serde(skip))]
    track: usize,

    #[cfg_attr(feature = "serde", serde(skip))]
    number: usize,
}

impl Measure {
    #[must_use]
    pub fn new(beats: Vec<Beat>) -> Self {
        Self {
            beats,
            track: 0,
            number: 0,
        }
    }

    #[must_use]
    pub fn beats(&self) -> &[Beat] { &self.beats }

    /// The 1-based number of the owning track, 0 if the measure is detached.
    #[must_use]
    pub fn track(&self) -> usize { self.track }

    /// The 1-based position within the owning track, 0 if detached.
    #[must_use]
    pub fn number(&self) -> usize { self.number }

    /// A measure is empty when it is pure silence, which makes it a
    /// placeholder that may be filled in by another version.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.beats.iter().all(Beat::is_rest) }

    pub(crate) fn set_position(&mut self, track: usize, number: usize) {
        self.track = track;
        self.number = number;
    }

    #[must_use]
    pub(crate) fn positioned(mut self, track: usize, number: usize) -> Self {
        self.set_position(track, number);
        self
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool { self.beats == other.beats }
}

impl Eq for Measure {}

impl Hash for Measure {
    fn hash<H: Hasher>(&self, state: &mut H) { self.beats.hash(state); }
}

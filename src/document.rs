mod attributes;
mod measure;
mod value;

pub use attributes::Attributes;
pub use measure::{Beat, Measure, Note};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use value::{Freeze, FrozenValue, Value};

/// Elements that can stand in for missing content, such as the silent
/// measures padding a track when measures are added to another track.
///
/// The combiner lets a real change win over a placeholder instead of
/// reporting a conflict.
pub trait Placeholder {
    fn is_placeholder(&self) -> bool;
}

impl Placeholder for Measure {
    fn is_placeholder(&self) -> bool { self.is_empty() }
}

// Unit tests spell sequences as strings, with placeholders starting with `_`.
#[cfg(test)]
impl Placeholder for &str {
    fn is_placeholder(&self) -> bool { self.starts_with('_') }
}

/// A tablature score: global attributes, page setup and tracks sharing one
/// timeline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,

    #[cfg_attr(feature = "serde", serde(default))]
    pub page_setup: Attributes,

    #[cfg_attr(feature = "serde", serde(default))]
    pub tracks: Vec<Track>,
}

impl Document {
    #[must_use]
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_page_setup(mut self, page_setup: Attributes) -> Self {
        self.page_setup = page_setup;
        self
    }

    /// Append a track and point its measures back at it.
    #[must_use]
    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self.renumber();
        self
    }

    /// Length of the timeline: the measure count of the longest track.
    ///
    /// Tracks of a well-formed document all have this many measures, but
    /// nothing enforces it. A merge that drops a conflicting measure leaves
    /// its track one measure short. See [`Document::is_aligned`].
    #[must_use]
    pub fn measure_count(&self) -> usize {
        self.tracks
            .iter()
            .map(|track| track.measures.len())
            .max()
            .unwrap_or(0)
    }

    /// Whether all tracks have the same number of measures.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.tracks
            .windows(2)
            .all(|pair| pair[0].measures.len() == pair[1].measures.len())
    }

    /// Reassign every measure's track number and position. Needed after
    /// editing `tracks` directly.
    pub fn renumber(&mut self) {
        for (track_index, track) in self.tracks.iter_mut().enumerate() {
            for (measure_index, measure) in track.measures.iter_mut().enumerate() {
                measure.set_position(track_index + 1, measure_index + 1);
            }
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,

    #[cfg_attr(feature = "serde", serde(default))]
    pub channel: Attributes,

    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: Attributes,

    #[cfg_attr(feature = "serde", serde(default))]
    pub measures: Vec<Measure>,
}

impl Track {
    #[must_use]
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: Attributes) -> Self {
        self.channel = channel;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Attributes) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_measures(mut self, measures: Vec<Measure>) -> Self {
        self.measures = measures;
        self
    }
}

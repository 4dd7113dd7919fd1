mod restore;
pub mod token;

pub use restore::restore;
pub use token::{ObjectKind, Token};

use crate::{Attributes, Document, Freeze, Measure, Track};

/// Flatten a `Document` into its canonical token sequence.
///
/// The walk is depth-first: each object emits a type marker carrying its own
/// field count, then its fields, then its named sub-objects. Measures are
/// emitted whole after their track's attribute objects.
#[must_use]
pub fn flatten(document: &Document) -> Vec<Token> {
    let mut tokens = Vec::new();

    push_object(&mut tokens, ObjectKind::Document, &document.attributes);
    push_object(&mut tokens, ObjectKind::PageSetup, &document.page_setup);

    for track in &document.tracks {
        tokens.extend(track_signature(track));
        tokens.extend(track.measures.iter().cloned().map(Token::Measure));
    }

    tokens
}

/// All measures of a document, concatenated in track order, with their
/// back-references pointing at their place in `document`.
#[must_use]
pub fn measures(document: &Document) -> Vec<Measure> {
    document
        .tracks
        .iter()
        .enumerate()
        .flat_map(|(track_index, track)| {
            track
                .measures
                .iter()
                .enumerate()
                .map(move |(index, measure)| measure.clone().positioned(track_index + 1, index + 1))
        })
        .collect()
}

/// The canonical tokens of a track without its measures. Two tracks with the
/// same signature are considered the same track when aligning grid columns.
#[must_use]
pub fn track_signature(track: &Track) -> Vec<Token> {
    let mut tokens = Vec::new();
    push_object(&mut tokens, ObjectKind::Track, &track.attributes);
    push_object(&mut tokens, ObjectKind::Channel, &track.channel);
    push_object(&mut tokens, ObjectKind::Settings, &track.settings);
    tokens
}

fn push_object(tokens: &mut Vec<Token>, kind: ObjectKind, attributes: &Attributes) {
    tokens.push(Token::TypeMarker {
        kind,
        field_count: attributes.len(),
    });
    tokens.extend(attributes.iter().map(|(name, value)| Token::Field {
        name: name.into(),
        value: value.freeze(),
    }));
}

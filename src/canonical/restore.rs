use log::debug;

use crate::{
    Attributes, Document, Freeze, ObjectKind, StructuralError, Token, Track, Value,
};

/// Where the reconstruction stands between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the document marker.
    AwaitingTypeMarker,

    /// Inside an object that still expects `remaining` fields.
    InObjectFields {
        target: ObjectKind,
        remaining: usize,
    },

    /// The object got all the fields its marker announced. Surplus fields
    /// still go to it.
    ObjectComplete { target: ObjectKind },

    /// After a measure, measures go to the newest track.
    InMeasureList,
}

impl State {
    fn open(target: ObjectKind, field_count: usize) -> Self {
        if field_count == 0 {
            State::ObjectComplete { target }
        } else {
            State::InObjectFields {
                target,
                remaining: field_count,
            }
        }
    }

    fn advance(
        self,
        document: &mut Document,
        index: usize,
        token: &Token,
    ) -> Result<Self, StructuralError> {
        match (self, token) {
            (
                State::AwaitingTypeMarker,
                Token::TypeMarker {
                    kind: ObjectKind::Document,
                    field_count,
                },
            ) => Ok(Self::open(ObjectKind::Document, *field_count)),
            (State::AwaitingTypeMarker, Token::TypeMarker { kind, .. }) => {
                Err(StructuralError::MissingDocumentMarker {
                    index,
                    found: *kind,
                })
            }
            (State::InObjectFields { target, remaining }, Token::Field { name, value }) => {
                target_attributes(document, target, index)?.push(name.to_string(), Value::thaw(value));

                if remaining == 1 {
                    Ok(State::ObjectComplete { target })
                } else {
                    Ok(State::InObjectFields {
                        target,
                        remaining: remaining - 1,
                    })
                }
            }
            (State::InObjectFields { target, remaining }, _) => {
                debug!("Closing {target} at token {index} with {remaining} field(s) missing");
                State::ObjectComplete { target }.advance(document, index, token)
            }
            (State::ObjectComplete { target }, Token::Field { name, value }) => {
                debug!("Surplus field `{name}` at token {index} goes to the preceding {target}");
                target_attributes(document, target, index)?.push(name.to_string(), Value::thaw(value));
                Ok(self)
            }
            (_, Token::Field { name, .. }) => Err(StructuralError::OrphanField {
                index,
                name: name.to_string(),
            }),
            (_, Token::TypeMarker { kind, field_count }) => {
                open_object(document, *kind, index)?;
                Ok(Self::open(*kind, *field_count))
            }
            (_, Token::Measure(measure)) => {
                let track_number = document.tracks.len();
                let track = document
                    .tracks
                    .last_mut()
                    .ok_or(StructuralError::MeasureWithoutTrack { index })?;
                let number = track.measures.len() + 1;
                track
                    .measures
                    .push(measure.clone().positioned(track_number, number));

                Ok(State::InMeasureList)
            }
        }
    }
}

/// Create the object a marker announces and attach it to its container.
fn open_object(
    document: &mut Document,
    kind: ObjectKind,
    index: usize,
) -> Result<(), StructuralError> {
    match kind {
        ObjectKind::Document => return Err(StructuralError::DuplicateDocument { index }),
        ObjectKind::PageSetup => document.page_setup = Attributes::new(),
        ObjectKind::Track => document.tracks.push(Track::default()),
        ObjectKind::Channel | ObjectKind::Settings => {
            *target_attributes(document, kind, index)? = Attributes::new();
        }
    }
    Ok(())
}

fn target_attributes(
    document: &mut Document,
    target: ObjectKind,
    index: usize,
) -> Result<&mut Attributes, StructuralError> {
    let missing_track = StructuralError::MissingTrack {
        index,
        kind: target,
    };

    match target {
        ObjectKind::Document => Ok(&mut document.attributes),
        ObjectKind::PageSetup => Ok(&mut document.page_setup),
        ObjectKind::Track => document
            .tracks
            .last_mut()
            .map(|track| &mut track.attributes)
            .ok_or(missing_track),
        ObjectKind::Channel => document
            .tracks
            .last_mut()
            .map(|track| &mut track.channel)
            .ok_or(missing_track),
        ObjectKind::Settings => document
            .tracks
            .last_mut()
            .map(|track| &mut track.settings)
            .ok_or(missing_track),
    }
}

/// Rebuild a `Document` from its canonical token sequence in a single pass.
///
/// A marker's field count closes its object once reached. An object cut
/// short by the next marker, a measure or the end of the sequence is closed
/// with the fields it got, and surplus fields right after a complete object
/// are added to it. Merged sequences with dropped conflicts rely on both.
///
/// Measures get fresh back-references: the number of the track they end up
/// in and their position within it.
///
/// # Errors
///
/// Returns a `StructuralError` when the sequence does not start with a
/// document marker, or when a field or measure has no object to belong to.
pub fn restore(tokens: &[Token]) -> Result<Document, StructuralError> {
    if tokens.is_empty() {
        return Err(StructuralError::EmptySequence);
    }

    let mut document = Document::default();
    let mut state = State::AwaitingTypeMarker;

    for (index, token) in tokens.iter().enumerate() {
        state = state.advance(&mut document, index, token)?;
    }

    Ok(document)
}

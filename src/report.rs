use std::ops::Range;

use crate::{AlignedChange, Edit, EditKind, Freeze, MergeCache, ObjectKind, Side, Token, Value};

/// Describe the attribute changes of a token-level comparison, one line per
/// touched field: `+ Song: tempo = 96`, `- Track 2: name = "Bass"`.
///
/// Measures and type markers are not described. A conflict is introduced by
/// a row of its side's marker (`>` for local, `<` for remote) and lists the
/// conflicting base fields, or the side's fields if the base has none there.
/// Without `remote` the comparison is two-way and `local` is the version
/// compared against `base`.
#[must_use]
pub fn attribute_report(
    cache: &MergeCache,
    local: &[Token],
    base: &[Token],
    remote: Option<&[Token]>,
) -> Vec<String> {
    let reporter = Reporter {
        base: Numbered::new(base),
        sides: [Numbered::new(local), Numbered::new(remote.unwrap_or_default())],
        conflict_markers: if remote.is_some() {
            ['>', '<']
        } else {
            ['!', '!']
        },
    };

    let mut lines = Vec::new();
    for change in cache {
        match *change {
            AlignedChange::Local(edit) => reporter.describe(&mut lines, Side::Local, edit),
            AlignedChange::Remote(edit) => reporter.describe(&mut lines, Side::Remote, edit),
            AlignedChange::Both { local, remote } if change.is_conflict() => {
                reporter.describe(&mut lines, Side::Local, local);
                reporter.describe(&mut lines, Side::Remote, remote);
            }
            AlignedChange::Both { local, .. } => reporter.describe(&mut lines, Side::Local, local),
        }
    }
    lines
}

#[derive(Debug)]
struct Reporter<'a> {
    base: Numbered<'a>,
    sides: [Numbered<'a>; 2],
    conflict_markers: [char; 2],
}

impl Reporter<'_> {
    fn describe(&self, lines: &mut Vec<String>, side: Side, edit: Edit) {
        let other = &self.sides[side.index()];

        match edit.kind {
            EditKind::Replace => {
                lines.extend(self.base.fields(edit.base_range(), '-'));
                lines.extend(other.fields(edit.other_range(), '+'));
            }
            EditKind::Delete => lines.extend(self.base.fields(edit.base_range(), '-')),
            EditKind::Insert => lines.extend(other.fields(edit.other_range(), '+')),
            EditKind::Conflict => {
                lines.push(self.conflict_markers[side.index()].to_string().repeat(8));
                if edit.base_len() == 0 {
                    lines.extend(other.fields(edit.other_range(), 'x'));
                } else {
                    lines.extend(self.base.fields(edit.base_range(), 'x'));
                }
            }
            EditKind::Equal => {}
        }
    }
}

/// A token sequence along with the number of the track each token belongs
/// to, 0 for the song's own objects.
#[derive(Debug)]
struct Numbered<'a> {
    tokens: &'a [Token],
    tracks: Vec<usize>,
}

impl<'a> Numbered<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let tracks = tokens
            .iter()
            .scan(0, |track, token| {
                if token.is_marker(ObjectKind::Track) {
                    *track += 1;
                }
                Some(*track)
            })
            .collect();

        Self { tokens, tracks }
    }

    fn fields(&self, range: Range<usize>, prefix: char) -> impl Iterator<Item = String> + '_ {
        range.filter_map(move |index| self.describe_field(index, prefix))
    }

    fn describe_field(&self, index: usize, prefix: char) -> Option<String> {
        let Token::Field { name, value } = self.tokens.get(index)? else {
            return None;
        };

        let value = match Value::thaw(value) {
            Value::List(mut items) if &**name == "strings" => {
                items.reverse();
                Value::List(items)
            }
            value => value,
        };

        Some(match self.tracks[index] {
            0 => format!("{prefix} Song: {name} = {value}"),
            track => format!("{prefix} Track {track}: {name} = {value}"),
        })
    }
}

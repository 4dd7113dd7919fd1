mod columns;
mod symbol;

use std::{fmt::Display, ops::Range};

use columns::ColumnMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use symbol::{LEGEND, Symbol};

use crate::{
    AlignedChange, AlignmentError, Document, Edit, EditKind, Measure, MergeCache, Pane,
    Placeholder, Side, Versions, canonical::measures,
};

/// A track × measure overview of a comparison.
///
/// Each column stands for one aligned track and each row for one measure
/// position of the timeline. The header holds one symbol per column for the
/// track itself.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    header: Vec<Symbol>,
    rows: Vec<Vec<Symbol>>,
}

impl Grid {
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            header: vec![Symbol::Unchanged; columns],
            rows: vec![vec![Symbol::Unchanged; columns]; rows],
        }
    }

    #[must_use]
    pub fn header(&self) -> &[Symbol] { &self.header }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Symbol>] { &self.rows }

    #[must_use]
    pub fn column_count(&self) -> usize { self.header.len() }

    #[must_use]
    pub fn row_count(&self) -> usize { self.rows.len() }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Symbol> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Whether anything at all is marked.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.header
            .iter()
            .chain(self.rows.iter().flatten())
            .any(|symbol| *symbol != Symbol::Unchanged)
    }

    /// Combine `symbol` into a cell. Cells outside the grid are ignored.
    pub fn mark(&mut self, row: usize, column: usize, symbol: Symbol) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            *cell = cell.combine(symbol);
        }
    }

    /// The grid of the comparison in the opposite direction.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mirror = |symbols: &Vec<Symbol>| -> Vec<Symbol> {
            symbols.iter().map(|symbol| symbol.mirrored()).collect()
        };
        Self {
            header: mirror(&self.header),
            rows: self.rows.iter().map(mirror).collect(),
        }
    }

    /// The rows as strings of symbol characters, one character per column.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|symbol| symbol.as_char()).collect())
            .collect()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self.header.iter().map(|symbol| symbol.as_char()).collect::<String>();
        writeln!(f, "{:>5} |{header}|", "Track")?;
        for (number, line) in self.lines().iter().enumerate() {
            writeln!(f, "{:>5} |{line}|", number + 1)?;
        }
        Ok(())
    }
}

/// Project a comparison onto a track × measure grid.
///
/// Without `remote` this is a two-way comparison of `base` against `local`:
/// changes show as `!`, insertions in `local` as `+` and removals as `-`.
/// With `remote` the measures of all three documents are combined and
/// changes made by one side only show as `>` (local) or `<` (remote).
///
/// # Errors
///
/// Only fails if the differ produced a malformed edit script.
pub fn project(
    local: &Document,
    base: &Document,
    remote: Option<&Document>,
) -> Result<Grid, AlignmentError> {
    let local_measures = measures(local);
    let base_measures = measures(base);

    let (columns, cache, remote_measures) = match remote {
        Some(remote) => {
            let remote_measures = measures(remote);
            let cache = MergeCache::three_way(Versions::new(
                &local_measures,
                &base_measures,
                &remote_measures,
            ))?;
            (ColumnMap::three_way(local, base, remote)?, cache, remote_measures)
        }
        None => (
            ColumnMap::two_way(base, local),
            MergeCache::two_way(&base_measures, &local_measures),
            Vec::new(),
        ),
    };

    let rows = [Some(local), Some(base), remote]
        .into_iter()
        .flatten()
        .map(Document::measure_count)
        .max()
        .unwrap_or(0);

    let mut projector = Projector {
        grid: Grid::new(columns.len(), rows),
        columns: &columns,
        measures: [&local_measures, &base_measures, &remote_measures],
        changed: if remote.is_some() {
            [Symbol::ChangedLocal, Symbol::ChangedRemote]
        } else {
            [Symbol::Changed, Symbol::Changed]
        },
    };
    projector.grid.header = columns.header().to_vec();

    for change in &cache {
        projector.mark_change(change);
    }

    Ok(projector.grid)
}

/// Resolves changes to cells through each measure's back-reference.
#[derive(Debug)]
struct Projector<'a> {
    grid: Grid,
    columns: &'a ColumnMap,
    measures: [&'a [Measure]; 3],
    changed: [Symbol; 2],
}

impl Projector<'_> {
    fn mark_change(&mut self, change: &AlignedChange) {
        match *change {
            AlignedChange::Local(edit) => {
                self.mark_edit(Side::Local, edit, self.changed[Side::Local.index()]);
            }
            AlignedChange::Remote(edit) => {
                self.mark_edit(Side::Remote, edit, self.changed[Side::Remote.index()]);
            }
            AlignedChange::Both { local, remote } => {
                self.mark_edit(Side::Local, local, Symbol::Changed);
                self.mark_edit(Side::Remote, remote, Symbol::Changed);
            }
        }
    }

    fn mark_edit(&mut self, side: Side, edit: Edit, changed: Symbol) {
        let pane = Pane::from(side);
        let common = edit.base_len().min(edit.other_len());

        match edit.kind {
            EditKind::Replace if self.is_padding(Pane::Base, edit.base_range()) => {
                self.mark_range(pane, edit.other_range(), Symbol::Inserted);
            }
            EditKind::Replace if self.is_padding(pane, edit.other_range()) => {
                self.mark_range(Pane::Base, edit.base_range(), Symbol::Removed);
            }
            EditKind::Replace => {
                for offset in 0..common {
                    self.mark_measure(Pane::Base, edit.base_start + offset, changed);
                    self.mark_measure(pane, edit.other_start + offset, changed);
                }
                self.mark_range(Pane::Base, edit.base_start + common..edit.base_end, Symbol::Removed);
                self.mark_range(pane, edit.other_start + common..edit.other_end, Symbol::Inserted);
            }
            EditKind::Insert => self.mark_range(pane, edit.other_range(), Symbol::Inserted),
            EditKind::Delete => self.mark_range(Pane::Base, edit.base_range(), Symbol::Removed),
            EditKind::Conflict if edit.base_len() > 0 => {
                self.mark_range(Pane::Base, edit.base_range(), Symbol::Conflict);
            }
            EditKind::Conflict => self.mark_range(pane, edit.other_range(), Symbol::Conflict),
            EditKind::Equal => {}
        }
    }

    /// Silent measures replaced by real ones count as insertions, and the
    /// reverse as removals.
    fn is_padding(&self, pane: Pane, range: Range<usize>) -> bool {
        self.measures[pane.index()]
            .get(range)
            .is_some_and(|measures| measures.iter().all(Placeholder::is_placeholder))
    }

    fn mark_range(&mut self, pane: Pane, range: Range<usize>, symbol: Symbol) {
        for index in range {
            self.mark_measure(pane, index, symbol);
        }
    }

    fn mark_measure(&mut self, pane: Pane, index: usize, symbol: Symbol) {
        let Some(measure) = self.measures[pane.index()].get(index) else {
            return;
        };
        let (Some(track), Some(row)) = (
            measure.track().checked_sub(1),
            measure.number().checked_sub(1),
        ) else {
            return;
        };
        if let Some(column) = self.columns.column(pane, track) {
            self.grid.mark(row, column, symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::{Attributes, Beat, Note, Track};

    /// A measure holding a single note, distinct for every `fret`.
    fn measure(fret: u8) -> Measure {
        Measure::new(vec![Beat::new(4, vec![Note { string: 1, fret }])])
    }

    /// Build a document from `(track name, measure frets)` pairs.
    fn document(tracks: &[(&str, &[u8])]) -> Document {
        tracks
            .iter()
            .fold(Document::default(), |document, (name, frets)| {
                document.with_track(
                    Track::new(Attributes::new().with("name", *name))
                        .with_measures(frets.iter().copied().map(measure).collect()),
                )
            })
    }

    fn one_track() -> Document { document(&[("Lead", &[1, 2])]) }

    fn two_tracks() -> Document { document(&[("Lead", &[1, 2]), ("Rhythm", &[3, 4])]) }

    fn two_tracks_modified() -> Document { document(&[("Lead", &[1, 2]), ("Rhythm", &[3, 40])]) }

    fn three_tracks() -> Document {
        document(&[("Lead", &[1, 2]), ("Bass", &[5, 6]), ("Rhythm", &[3, 4])])
    }

    fn three_tracks_modified() -> Document {
        document(&[("Lead", &[1, 2]), ("Bass", &[5, 6]), ("Rhythm", &[3, 40])])
    }

    fn four_tracks() -> Document {
        document(&[
            ("Lead", &[1, 2]),
            ("Bass", &[5, 6]),
            ("Rhythm", &[3, 4]),
            ("Drums", &[7, 8]),
        ])
    }

    #[test_case(one_track(), document(&[("Lead", &[1, 20])]), &[" ", "!"]; "measure changed")]
    #[test_case(one_track(), document(&[("Lead", &[1, 20, 30])]), &[" ", "!", "+"]; "measure changed and appended")]
    #[test_case(one_track(), document(&[("Lead", &[1])]), &[" ", "-"]; "measure removed")]
    #[test_case(one_track(), document(&[("Lead", &[1, 2, 3])]), &[" ", " ", "+"]; "measure appended")]
    #[test_case(one_track(), document(&[("Lead", &[10])]), &["!", "-"]; "measure changed and removed")]
    #[test_case(one_track(), two_tracks(), &[" +", " +"]; "track appended")]
    #[test_case(two_tracks(), three_tracks(), &[" + ", " + "]; "track inserted")]
    #[test_case(two_tracks(), three_tracks_modified(), &[" + ", " +!"]; "track inserted and measure changed")]
    #[test_case(three_tracks_modified(), two_tracks(), &[" - ", " -!"]; "track removed and measure changed")]
    #[test_case(two_tracks(), four_tracks(), &[" + +", " + +"]; "tracks inserted")]
    #[test_case(two_tracks_modified(), four_tracks(), &[" + +", " +!+"]; "tracks inserted and measure changed")]
    #[test_case(four_tracks(), two_tracks_modified(), &[" - -", " -!-"]; "tracks removed and measure changed")]
    fn test_two_way_grid(base: Document, other: Document, expected: &[&str]) {
        let grid = project(&other, &base, None).unwrap();
        assert_eq!(grid.lines(), expected);
    }

    #[test]
    fn test_two_way_header() {
        let grid = project(&three_tracks_modified(), &two_tracks(), None).unwrap();
        assert_eq!(grid.header(), &[Symbol::Unchanged, Symbol::Inserted, Symbol::Unchanged]);

        let grid = project(&document(&[("Lead", &[1, 2]), ("Keys", &[3, 4])]), &two_tracks(), None)
            .unwrap();
        assert_eq!(grid.header(), &[Symbol::Unchanged, Symbol::Changed]);
        assert_eq!(grid.lines(), vec!["  ", "  "]);
    }

    #[test_case(one_track(), document(&[("Lead", &[1, 20, 30])]); "measures")]
    #[test_case(two_tracks(), four_tracks(); "tracks")]
    #[test_case(two_tracks_modified(), four_tracks(); "tracks and measures")]
    fn test_two_way_symmetry(a: Document, b: Document) {
        let forward = project(&b, &a, None).unwrap();
        let backward = project(&a, &b, None).unwrap();

        assert_eq!(forward.mirrored(), backward);
    }

    #[test]
    fn test_three_way_sides() {
        let base = document(&[("Lead", &[1, 2, 3]), ("Bass", &[4, 5, 6])]);
        let local = document(&[("Lead", &[1, 20, 3]), ("Bass", &[4, 5, 6])]);
        let remote = document(&[("Lead", &[1, 2, 3]), ("Bass", &[4, 5, 60])]);

        let grid = project(&local, &base, Some(&remote)).unwrap();

        assert_eq!(grid.lines(), vec!["  ", "> ", " <"]);
        assert!(!grid.header().iter().any(|symbol| *symbol != Symbol::Unchanged));
    }

    #[test]
    fn test_three_way_identical_and_conflicting() {
        let base = document(&[("Lead", &[1, 2, 3])]);
        let local = document(&[("Lead", &[10, 2, 30])]);
        let remote = document(&[("Lead", &[10, 2, 31])]);

        let grid = project(&local, &base, Some(&remote)).unwrap();

        assert_eq!(grid.lines(), vec!["!", " ", "x"]);
    }

    #[test]
    fn test_three_way_placeholders_replaced() {
        let silent = || Measure::new(vec![Beat::rest(4)]);
        let padded = Document::default().with_track(
            Track::new(Attributes::new().with("name", "Lead"))
                .with_measures(vec![measure(1), silent(), silent()]),
        );
        let written = document(&[("Lead", &[1, 5, 6, 7])]);

        let grid = project(&padded, &padded, Some(&written)).unwrap();
        assert_eq!(grid.lines(), vec![" ", "+", "+", "+"]);

        let forward = project(&written, &padded, None).unwrap();
        let backward = project(&padded, &written, None).unwrap();
        assert_eq!(forward.lines(), vec![" ", "+", "+", "+"]);
        assert_eq!(forward.mirrored(), backward);
    }

    #[test]
    fn test_display() {
        let grid = project(&document(&[("Lead", &[1, 20])]), &one_track(), None).unwrap();

        assert_eq!(grid.to_string(), "Track | |\n    1 | |\n    2 |!|\n");
    }
}

use crate::{
    AlignedChange, AlignmentError, Document, EditKind, MergeCache, Pane, Side, Symbol, Token,
    Versions, canonical::track_signature,
};

/// Assignment of every track of every compared document to a grid column,
/// together with the header symbol of each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    columns: [Vec<usize>; 3],
    header: Vec<Symbol>,
}

impl ColumnMap {
    /// Align the tracks of `base` and `other`; `other` takes the local pane.
    pub(crate) fn two_way(base: &Document, other: &Document) -> Self {
        let base_signatures = signatures(base);
        let other_signatures = signatures(other);
        let cache = MergeCache::two_way(&base_signatures, &other_signatures);

        let mut builder = ColumnBuilder::new([
            Some(other_signatures.len()),
            Some(base_signatures.len()),
            None,
        ]);
        builder.walk(&cache, [Symbol::Changed, Symbol::Changed]);
        builder.finish()
    }

    pub(crate) fn three_way(
        local: &Document,
        base: &Document,
        remote: &Document,
    ) -> Result<Self, AlignmentError> {
        let local_signatures = signatures(local);
        let base_signatures = signatures(base);
        let remote_signatures = signatures(remote);
        let cache = MergeCache::three_way(Versions::new(
            &local_signatures,
            &base_signatures,
            &remote_signatures,
        ))?;

        let mut builder = ColumnBuilder::new([
            Some(local_signatures.len()),
            Some(base_signatures.len()),
            Some(remote_signatures.len()),
        ]);
        builder.walk(&cache, [Symbol::ChangedLocal, Symbol::ChangedRemote]);
        Ok(builder.finish())
    }

    /// The column of the 0-based `track` of the document shown in `pane`.
    pub(crate) fn column(&self, pane: Pane, track: usize) -> Option<usize> {
        self.columns[pane.index()].get(track).copied()
    }

    pub(crate) fn header(&self) -> &[Symbol] { &self.header }

    pub(crate) fn len(&self) -> usize { self.header.len() }
}

fn signatures(document: &Document) -> Vec<Vec<Token>> {
    document.tracks.iter().map(track_signature).collect()
}

// Tracks carry no placeholder content, so padding never resolves a track
// conflict.
impl crate::Placeholder for Vec<Token> {
    fn is_placeholder(&self) -> bool { false }
}

#[derive(Debug)]
struct ColumnBuilder {
    lens: [Option<usize>; 3],
    cursors: [usize; 3],
    columns: [Vec<usize>; 3],
    header: Vec<Symbol>,
}

impl ColumnBuilder {
    fn new(lens: [Option<usize>; 3]) -> Self {
        Self {
            lens,
            cursors: [0; 3],
            columns: lens.map(|len| vec![0; len.unwrap_or(0)]),
            header: Vec::new(),
        }
    }

    fn is_present(&self, pane: Pane) -> bool { self.lens[pane.index()].is_some() }

    /// Give the next `count` tracks of every pane a shared column each.
    fn unchanged(&mut self, count: usize) {
        for _ in 0..count {
            let tracks = Pane::ALL.map(|pane| self.is_present(pane).then_some(0));
            self.open(tracks, Symbol::Unchanged);
            self.advance([1; 3]);
        }
    }

    /// Assign a new column to the given offsets from each pane's cursor.
    fn open(&mut self, offsets: [Option<usize>; 3], symbol: Symbol) {
        let column = self.header.len();
        self.header.push(symbol);

        for pane in Pane::ALL {
            let Some(offset) = offsets[pane.index()] else {
                continue;
            };
            let track = self.cursors[pane.index()] + offset;
            if let Some(slot) = self.columns[pane.index()].get_mut(track) {
                *slot = column;
            }
        }
    }

    fn advance(&mut self, steps: [usize; 3]) {
        for (cursor, step) in self.cursors.iter_mut().zip(steps) {
            *cursor += step;
        }
    }

    fn walk(&mut self, cache: &MergeCache, changed: [Symbol; 2]) {
        for change in cache {
            let base = change.base_range();
            let base_cursor = self.cursors[Pane::Base.index()];
            self.unchanged(base.start.saturating_sub(base_cursor));

            let side_len = |side: Side| {
                change
                    .side(side)
                    .map_or(base.len(), |edit| edit.other_len())
            };
            let lens = [side_len(Side::Local), base.len(), side_len(Side::Remote)];

            let paired = match change {
                AlignedChange::Local(_) => changed[Side::Local.index()],
                AlignedChange::Remote(_) => changed[Side::Remote.index()],
                AlignedChange::Both { .. } if change.is_conflict() => Symbol::Conflict,
                AlignedChange::Both { .. } => Symbol::Changed,
            };

            let width = lens.iter().copied().max().unwrap_or(0);
            for k in 0..width {
                let offsets = Pane::ALL.map(|pane| {
                    (self.is_present(pane) && k < lens[pane.index()]).then_some(k)
                });
                let complete = Pane::ALL
                    .iter()
                    .all(|pane| !self.is_present(*pane) || offsets[pane.index()].is_some());

                let symbol = if change.kind() == EditKind::Conflict || complete {
                    paired
                } else if k >= base.len() {
                    Symbol::Inserted
                } else {
                    Symbol::Removed
                };
                self.open(offsets, symbol);
            }

            self.advance(lens);
        }

        let remaining = self.lens[Pane::Base.index()]
            .unwrap_or(0)
            .saturating_sub(self.cursors[Pane::Base.index()]);
        self.unchanged(remaining);
    }

    fn finish(self) -> ColumnMap {
        ColumnMap {
            columns: self.columns,
            header: self.header,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Attributes, Track};

    fn document(names: &[&str]) -> Document {
        names.iter().fold(Document::default(), |document, name| {
            document.with_track(Track::new(Attributes::new().with("name", *name)))
        })
    }

    fn header(map: &ColumnMap) -> String { map.header().iter().map(|symbol| symbol.as_char()).collect() }

    fn columns(map: &ColumnMap, pane: Pane, count: usize) -> Vec<Option<usize>> {
        (0..count).map(|track| map.column(pane, track)).collect()
    }

    #[test]
    fn test_two_way_inserted_tracks() {
        let map = ColumnMap::two_way(&document(&["A", "C"]), &document(&["A", "B", "C", "D"]));

        assert_eq!(header(&map), " + +");
        assert_eq!(columns(&map, Pane::Base, 2), vec![Some(0), Some(2)]);
        assert_eq!(columns(&map, Pane::Local, 4), vec![
            Some(0),
            Some(1),
            Some(2),
            Some(3)
        ]);
    }

    #[test]
    fn test_two_way_removed_track() {
        let map = ColumnMap::two_way(&document(&["A", "B", "C"]), &document(&["A", "C"]));

        assert_eq!(header(&map), " - ");
        assert_eq!(columns(&map, Pane::Base, 3), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(columns(&map, Pane::Local, 2), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_two_way_renamed_track_shares_column() {
        let map = ColumnMap::two_way(&document(&["A", "B"]), &document(&["A", "Bass"]));

        assert_eq!(header(&map), " !");
        assert_eq!(map.column(Pane::Local, 1), Some(1));
        assert_eq!(map.column(Pane::Base, 1), Some(1));
    }

    #[test]
    fn test_three_way_tracks() {
        let map = ColumnMap::three_way(
            &document(&["A", "B", "L"]),
            &document(&["A", "B"]),
            &document(&["A2", "B"]),
        )
        .unwrap();

        assert_eq!(header(&map), "< +");
        assert_eq!(map.len(), 3);
        assert_eq!(columns(&map, Pane::Remote, 2), vec![Some(0), Some(1)]);
        assert_eq!(columns(&map, Pane::Local, 3), vec![Some(0), Some(1), Some(2)]);
    }
}

use log::debug;

use crate::{
    Document, Grid, MergeCache, NavigationIndex, Pane, TabDiffError, Token, Versions,
    apply_keeping, flatten, grid, report, restore,
};

/// A two-way or three-way comparison of documents, computed once up front.
///
/// Documents are compared through their canonical token sequences. In a
/// two-way comparison the second document takes the local pane.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    local: &'a Document,
    base: &'a Document,
    remote: Option<&'a Document>,
    tokens: [Vec<Token>; 3],
    cache: MergeCache,
}

impl<'a> Comparison<'a> {
    /// Compare `other` against `base`.
    #[must_use]
    pub fn two_way(base: &'a Document, other: &'a Document) -> Self {
        let tokens = [flatten(other), flatten(base), Vec::new()];
        let cache = MergeCache::two_way(&tokens[Pane::Base.index()], &tokens[Pane::Local.index()]);
        debug!("Two-way comparison found {} change(s)", cache.len());

        Self {
            local: other,
            base,
            remote: None,
            tokens,
            cache,
        }
    }

    /// Compare two descendants of `base` with each other.
    ///
    /// # Errors
    ///
    /// Only fails if the differ produced a malformed edit script.
    pub fn three_way(
        local: &'a Document,
        base: &'a Document,
        remote: &'a Document,
    ) -> Result<Self, TabDiffError> {
        let tokens = [flatten(local), flatten(base), flatten(remote)];
        let [local_tokens, base_tokens, remote_tokens] = &tokens;
        let cache = MergeCache::three_way(Versions::new(local_tokens, base_tokens, remote_tokens))?;
        debug!(
            "Three-way comparison found {} change(s), {} in conflict",
            cache.len(),
            cache.conflicts().len()
        );

        Ok(Self {
            local,
            base,
            remote: Some(remote),
            tokens,
            cache,
        })
    }

    #[must_use]
    pub fn cache(&self) -> &MergeCache { &self.cache }

    #[must_use]
    pub fn conflicts(&self) -> &[usize] { self.cache.conflicts() }

    #[must_use]
    pub fn has_conflicts(&self) -> bool { self.cache.has_conflicts() }

    #[must_use]
    pub fn is_three_way(&self) -> bool { self.remote.is_some() }

    /// The canonical tokens of the document shown in `pane`, empty for the
    /// remote pane of a two-way comparison.
    #[must_use]
    pub fn tokens(&self, pane: Pane) -> &[Token] { &self.tokens[pane.index()] }

    /// The merged token sequence. Conflicting regions are left out, except
    /// for the base's type markers inside them.
    ///
    /// # Errors
    ///
    /// Fails for two-way comparisons, which have nothing to merge.
    pub fn merged_tokens(&self) -> Result<Vec<Token>, TabDiffError> {
        if !self.is_three_way() {
            return Err(TabDiffError::MergeRequiresThreeVersions);
        }

        Ok(apply_keeping(
            &self.cache,
            Versions::new(
                self.tokens(Pane::Local),
                self.tokens(Pane::Base),
                self.tokens(Pane::Remote),
            ),
            Token::is_type_marker,
        ))
    }

    /// Merge both descendants into a new document.
    ///
    /// # Errors
    ///
    /// Fails for two-way comparisons and when the merged tokens do not form
    /// a well-formed document. Conflicts alone never make it fail.
    pub fn merge(&self) -> Result<Document, TabDiffError> {
        let merged = restore(&self.merged_tokens()?)?;
        debug!(
            "Merged document has {} track(s) and {} measure(s)",
            merged.tracks.len(),
            merged.measure_count()
        );
        Ok(merged)
    }

    /// The track × measure overview of the comparison.
    ///
    /// # Errors
    ///
    /// Only fails if the differ produced a malformed edit script.
    pub fn measure_grid(&self) -> Result<Grid, TabDiffError> {
        Ok(grid::project(self.local, self.base, self.remote)?)
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationIndex {
        NavigationIndex::new(
            &self.cache,
            self.tokens(Pane::Local).len(),
            self.tokens(Pane::Base).len(),
            self.is_three_way()
                .then(|| self.tokens(Pane::Remote).len()),
        )
    }

    #[must_use]
    pub fn attribute_report(&self) -> Vec<String> {
        report::attribute_report(
            &self.cache,
            self.tokens(Pane::Local),
            self.tokens(Pane::Base),
            self.is_three_way().then(|| self.tokens(Pane::Remote)),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Attributes, Beat, Measure, Note, Track};

    fn measure(fret: u8) -> Measure {
        Measure::new(vec![Beat::new(4, vec![Note { string: 2, fret }])])
    }

    fn document(tempo: i64, lead: &[u8], bass: &[u8]) -> Document {
        Document::new(Attributes::new().with("title", "Song").with("tempo", tempo))
            .with_track(
                Track::new(Attributes::new().with("name", "Lead"))
                    .with_measures(lead.iter().copied().map(measure).collect()),
            )
            .with_track(
                Track::new(Attributes::new().with("name", "Bass"))
                    .with_measures(bass.iter().copied().map(measure).collect()),
            )
    }

    #[test]
    fn test_merge_independent_changes() {
        let base = document(120, &[1, 2, 3], &[4, 5, 6]);
        let local = document(120, &[1, 20, 3], &[4, 5, 6]);
        let remote = document(96, &[1, 2, 3], &[4, 5, 60]);

        let comparison = Comparison::three_way(&local, &base, &remote).unwrap();
        assert!(!comparison.has_conflicts());

        let merged = comparison.merge().unwrap();
        assert_eq!(merged, document(96, &[1, 20, 3], &[4, 5, 60]));
        assert_eq!(merged.tracks[1].measures[2].track(), 2);
        assert_eq!(merged.tracks[1].measures[2].number(), 3);

        assert_eq!(
            comparison.measure_grid().unwrap().lines(),
            vec!["  ", "> ", " <"]
        );
        assert_eq!(comparison.attribute_report(), vec![
            "- Song: tempo = 120",
            "+ Song: tempo = 96"
        ]);
    }

    #[test]
    fn test_conflicting_measure_is_dropped() {
        let base = document(120, &[1, 2, 3], &[4, 5, 6]);
        let local = document(120, &[1, 20, 3], &[4, 5, 6]);
        let remote = document(120, &[1, 21, 3], &[4, 5, 6]);

        let comparison = Comparison::three_way(&local, &base, &remote).unwrap();
        assert_eq!(comparison.conflicts().len(), 1);

        let merged = comparison.merge().unwrap();
        assert_eq!(merged.tracks[0].measures, vec![measure(1), measure(3)]);
        assert_eq!(merged.tracks[1].measures.len(), 3);
        assert_eq!(
            comparison.measure_grid().unwrap().lines(),
            vec!["  ", "x ", "  "]
        );
    }

    #[test]
    fn test_conflicting_attribute_is_dropped() {
        let base = document(120, &[1, 2], &[3, 4]);
        let local = document(96, &[1, 2], &[3, 4]);
        let remote = document(100, &[1, 2], &[3, 4]);

        let comparison = Comparison::three_way(&local, &base, &remote).unwrap();
        assert_eq!(comparison.conflicts().len(), 1);

        let merged = comparison.merge().unwrap();
        assert_eq!(merged.attributes, Attributes::new().with("title", "Song"));
        assert_eq!(merged.tracks, base.tracks);
        assert_eq!(
            comparison.measure_grid().unwrap().lines(),
            vec!["  ", "  "]
        );
    }

    #[test]
    fn test_conflicting_marker_keeps_structure() {
        let base = document(120, &[1, 2], &[3, 4]);
        let mut local = base.clone();
        local.attributes.set("key", "Am");
        let mut remote = base.clone();
        remote.attributes = Attributes::new().with("title", "Song");

        let comparison = Comparison::three_way(&local, &base, &remote).unwrap();
        assert_eq!(comparison.conflicts().len(), 1);

        let merged = comparison.merge().unwrap();
        assert_eq!(
            merged.attributes,
            Attributes::new().with("title", "Song").with("key", "Am")
        );
        assert_eq!(merged.tracks, base.tracks);
    }

    #[test]
    fn test_two_way_cannot_merge() {
        let base = document(120, &[1, 2], &[3, 4]);
        let other = document(120, &[1, 2, 5], &[3, 4, 6]);

        let comparison = Comparison::two_way(&base, &other);

        assert!(!comparison.is_three_way());
        assert_eq!(comparison.merge(), Err(TabDiffError::MergeRequiresThreeVersions));
        assert_eq!(
            comparison.measure_grid().unwrap().lines(),
            vec!["  ", "  ", "++"]
        );
        assert!(comparison.navigation().pane(Pane::Remote).is_empty());
        assert_eq!(
            comparison.navigation().pane(Pane::Base).len(),
            comparison.tokens(Pane::Base).len() + 1
        );
    }
}

//! Grouping an edit script into unified-diff hunks
//!
//! A hunk is a run of edits around one cluster of changes, padded with up to
//! [`HUNK_CONTEXT`] equal lines on each side. Two change clusters separated
//! by more than twice the context collapse into separate hunks, the same
//! grouping unified diff tools use.

use crate::artifacts::diff::myers::Edit;

/// Equal lines shown around each change cluster
pub const HUNK_CONTEXT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    a_start: usize,
    b_start: usize,
    edits: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    /// 1-based first line of the hunk on the old side, 0 when it has none
    pub fn a_start(&self) -> usize {
        self.a_start
    }

    /// 1-based first line of the hunk on the new side, 0 when it has none
    pub fn b_start(&self) -> usize {
        self.b_start
    }

    pub fn a_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| matches!(edit, Edit::Delete { .. } | Edit::Equal { .. }))
            .count()
    }

    pub fn b_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| matches!(edit, Edit::Insert { .. } | Edit::Equal { .. }))
            .count()
    }

    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }
}

impl<T: Clone> Hunk<T> {
    pub fn build(edits: Vec<Edit<T>>) -> Vec<Hunk<T>> {
        // (a, b) line positions in effect before each edit
        let mut positions = Vec::with_capacity(edits.len());
        let (mut a_pos, mut b_pos) = (0, 0);
        for edit in &edits {
            positions.push((a_pos, b_pos));
            match edit {
                Edit::Delete { .. } => a_pos += 1,
                Edit::Insert { .. } => b_pos += 1,
                Edit::Equal { .. } => {
                    a_pos += 1;
                    b_pos += 1;
                }
            }
        }

        let changes: Vec<usize> = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| !matches!(edit, Edit::Equal { .. }))
            .map(|(index, _)| index)
            .collect();
        let Some((&first, rest)) = changes.split_first() else {
            return Vec::new();
        };

        let mut hunks = Vec::new();
        let (mut cluster_start, mut cluster_end) = (first, first);
        for &index in rest {
            // changes separated by more than 2 * context equal lines split apart
            if index - cluster_end > 2 * HUNK_CONTEXT + 1 {
                hunks.push(Self::cut(&edits, &positions, cluster_start, cluster_end));
                cluster_start = index;
            }
            cluster_end = index;
        }
        hunks.push(Self::cut(&edits, &positions, cluster_start, cluster_end));

        hunks
    }

    fn cut(
        edits: &[Edit<T>],
        positions: &[(usize, usize)],
        first_change: usize,
        last_change: usize,
    ) -> Hunk<T> {
        let lo = first_change.saturating_sub(HUNK_CONTEXT);
        let hi = (last_change + HUNK_CONTEXT + 1).min(edits.len());
        let slice = edits[lo..hi].to_vec();
        let (a_pos, b_pos) = positions[lo];

        let a_lines = slice
            .iter()
            .filter(|edit| matches!(edit, Edit::Delete { .. } | Edit::Equal { .. }))
            .count();
        let b_lines = slice
            .iter()
            .filter(|edit| matches!(edit, Edit::Insert { .. } | Edit::Equal { .. }))
            .count();

        // unified headers are 1-based, except a side with no lines anchors at 0
        Hunk {
            a_start: if a_lines == 0 { a_pos } else { a_pos + 1 },
            b_start: if b_lines == 0 { b_pos } else { b_pos + 1 },
            edits: slice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::myers::MyersDiff;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn numbered_lines(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("l{n}")).collect()
    }

    fn header<T>(hunk: &Hunk<T>) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            hunk.a_start(),
            hunk.a_size(),
            hunk.b_start(),
            hunk.b_size()
        )
    }

    #[rstest]
    fn distant_changes_land_in_separate_hunks() {
        let a = numbered_lines(11);
        let mut b = a.clone();
        b[1] = "l2-changed".to_string();
        b[9] = "l10-changed".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 2);
        assert_eq!(header(&hunks[0]), "@@ -1,5 +1,5 @@");
        assert_eq!(header(&hunks[1]), "@@ -7,5 +7,5 @@");
    }

    #[rstest]
    fn nearby_changes_share_a_hunk() {
        let a = numbered_lines(10);
        let mut b = a.clone();
        b[1] = "l2-changed".to_string();
        b[8] = "l9-changed".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 1);
        assert_eq!(header(&hunks[0]), "@@ -1,10 +1,10 @@");
    }

    #[rstest]
    fn pure_insertion_anchors_the_empty_side_at_zero() {
        let a: Vec<String> = vec![];
        let b = vec!["new".to_string()];

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 1);
        assert_eq!(header(&hunks[0]), "@@ -0,0 +1,1 @@");
        assert_eq!(hunks[0].edits().len(), 1);
    }

    #[rstest]
    fn no_changes_means_no_hunks() {
        let a = numbered_lines(4);

        let hunks = MyersDiff::new(&a, &a).hunks();

        assert!(hunks.is_empty());
    }

    #[rstest]
    fn context_is_clamped_to_the_file() {
        let a = vec!["only".to_string()];
        let b = vec!["only-changed".to_string()];

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 1);
        assert_eq!(header(&hunks[0]), "@@ -1,1 +1,1 @@");
    }
}

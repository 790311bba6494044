//! Which commits touched a single file
//!
//! Walks the commit graph from HEAD with a priority queue ordered by
//! committer timestamp, so histories with concurrent branches still come out
//! newest first. A commit is listed when the file's tree entry differs from
//! the one in its first parent; merge commits are traversed but never listed.

use crate::areas::repository::{ContentError, Repository, RepositoryError};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::artifacts::tracking::tracker::RevisionSource;
use bytes::Bytes;
use derive_new::new;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::path::PathBuf;

/// Heap entry ordered so the queue pops the newest commit first
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueuedCommit(Commit);

impl Ord for QueuedCommit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .committer()
            .timestamp()
            .cmp(&other.0.committer().timestamp())
            // equal timestamps fall back to oid order to stay deterministic
            .then_with(|| self.0.oid().cmp(other.0.oid()))
    }
}

impl PartialOrd for QueuedCommit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The commits that changed one file, walked backward from HEAD
#[derive(new)]
pub struct FileHistory<'r> {
    repository: &'r Repository,
    file_path: PathBuf,
}

impl FileHistory<'_> {
    /// The file's tree entry under `tree_oid`, memoized per root tree
    fn entry_at(
        &self,
        tree_oid: &ObjectId,
        entries: &mut HashMap<ObjectId, Option<TreeEntry>>,
    ) -> Result<Option<TreeEntry>, RepositoryError> {
        if let Some(entry) = entries.get(tree_oid) {
            return Ok(entry.clone());
        }

        let entry = self
            .repository
            .database()
            .entry_at_path(tree_oid, &self.file_path)?;
        entries.insert(tree_oid.clone(), entry.clone());
        Ok(entry)
    }

    /// Whether the file's entry differs between `commit` and its first parent
    fn touches_path(
        &self,
        commit: &Commit,
        trees: &HashMap<ObjectId, ObjectId>,
        entries: &mut HashMap<ObjectId, Option<TreeEntry>>,
    ) -> Result<bool, RepositoryError> {
        let current = self.entry_at(commit.tree_oid(), entries)?;

        let Some(parent_oid) = commit.parent() else {
            // a root commit touches the file exactly when it contains it
            return Ok(current.is_some());
        };
        let parent_tree = match trees.get(parent_oid) {
            Some(tree_oid) => tree_oid.clone(),
            None => self
                .repository
                .database()
                .parse_object_as_commit(parent_oid)?
                .tree_oid()
                .clone(),
        };
        let before = self.entry_at(&parent_tree, entries)?;

        // any difference counts, including a bare mode change
        Ok(current != before)
    }
}

impl RevisionSource for FileHistory<'_> {
    fn commits(&self) -> Result<Vec<Commit>, RepositoryError> {
        let database = self.repository.database();
        let mut queue = BinaryHeap::new();
        let mut seen = HashSet::new();
        let mut trees: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut entries: HashMap<ObjectId, Option<TreeEntry>> = HashMap::new();

        let head = self.repository.head_commit()?;
        seen.insert(head.oid().clone());
        trees.insert(head.oid().clone(), head.tree_oid().clone());
        queue.push(QueuedCommit(head));

        let mut commits = Vec::new();
        while let Some(QueuedCommit(commit)) = queue.pop() {
            for parent_oid in commit.parents() {
                if seen.insert(parent_oid.clone()) {
                    let parent = database.parse_object_as_commit(parent_oid)?;
                    trees.insert(parent_oid.clone(), parent.tree_oid().clone());
                    queue.push(QueuedCommit(parent));
                }
            }

            // merge commits join histories but carry no change of their own
            if commit.is_merge() {
                continue;
            }

            if self.touches_path(&commit, &trees, &mut entries)? {
                commits.push(commit);
            }
        }

        Ok(commits)
    }

    fn content(&self, commit: &Commit) -> Result<Bytes, ContentError> {
        self.repository.content_at(commit, &self.file_path)
    }
}

//! The backward walk that follows one node through a file's history
//!
//! [`NodeTracker`] walks the file's commits newest to oldest, re-parses the
//! file at each one and matches the older tree against the tracked one to
//! decide whether the node changed, stayed put, or disappeared. Revisions
//! whose tree is structurally identical produce no record but still advance
//! the walk, so the next change is pinned to the commit it really happened
//! at. When a revision has no counterpart for the node the walk stops and
//! nothing older is fetched or parsed.

use crate::areas::parse_service::ParseError;
use crate::areas::repository::{ContentError, RepositoryError};
use crate::artifacts::matching::matcher::TreeMatcher;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::syntax::tree::{NodeId, SyntaxTree};
use crate::artifacts::tracking::record::{ChangeRecord, NodeVersion, Revision};
use crate::artifacts::tracking::timings::PhaseTimings;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Where the walk gets its revisions from
pub trait RevisionSource {
    /// Commits that touched the file, newest first
    fn commits(&self) -> Result<Vec<Commit>, RepositoryError>;

    /// The file's content at `commit`
    fn content(&self, commit: &Commit) -> Result<Bytes, ContentError>;
}

/// Turns one revision's bytes into a syntax tree
#[allow(async_fn_in_trait)]
pub trait SourceParser {
    async fn parse(&self, path: &Path, content: &[u8]) -> Result<SyntaxTree, ParseError>;
}

#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("node with id {id} not found")]
    NodeNotFound { id: u32 },
    #[error("no commits found for {}", path.display())]
    EmptyHistory { path: PathBuf },
}

/// The node's identity in the oldest revision examined so far
struct TrackedState {
    revision: Revision,
    tree: SyntaxTree,
    node: NodeId,
}

impl TrackedState {
    fn version(&self) -> NodeVersion {
        NodeVersion::new(
            self.revision.content().clone(),
            self.tree.node(self.node).span(),
        )
    }
}

/// Everything a finished walk produced
#[derive(Debug)]
pub struct TrackOutcome {
    records: Vec<ChangeRecord>,
    timings: PhaseTimings,
}

impl TrackOutcome {
    /// Change records, newest first
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn timings(&self) -> PhaseTimings {
        self.timings
    }
}

/// Follows one node of `file_path` backward through its history
#[derive(new)]
pub struct NodeTracker<S, P, M> {
    source: S,
    parser: P,
    matcher: M,
    file_path: PathBuf,
}

impl<S, P, M> NodeTracker<S, P, M>
where
    S: RevisionSource,
    P: SourceParser,
    M: TreeMatcher,
{
    /// Walk the file's history backward from its newest revision, reporting
    /// every structural change of the node carrying `node_id` there
    pub async fn track(&self, node_id: u32) -> Result<TrackOutcome, TrackError> {
        let mut timings = PhaseTimings::default();

        let walk_started = Instant::now();
        let commits = self.source.commits()?;
        timings.add_repository(walk_started.elapsed());
        debug!("file history holds {} revisions", commits.len());

        let mut older = commits.into_iter();
        let newest = older.next().ok_or_else(|| TrackError::EmptyHistory {
            path: self.file_path.clone(),
        })?;

        let revision = self.fetch(newest, &mut timings)?;
        let tree = self.parse(&revision, &mut timings).await?;
        let node = tree
            .find_by_id(node_id)
            .ok_or(TrackError::NodeNotFound { id: node_id })?;
        let mut tracked = TrackedState {
            revision,
            tree,
            node,
        };
        debug!(
            commit = %tracked.revision.commit().oid().to_short_oid(),
            title = %tracked.revision.commit().short_message(),
            "tracking {} {} `{}`",
            tracked.tree.node(node).label(),
            tracked.tree.node(node).span(),
            String::from_utf8_lossy(tracked.version().text())
        );

        let mut records = Vec::new();
        let mut terminated = false;

        for commit in older {
            let revision = self.fetch(commit, &mut timings)?;
            let src_tree = self.parse(&revision, &mut timings).await?;

            let match_started = Instant::now();
            let mappings = self.matcher.match_trees(&src_tree, &tracked.tree);
            timings.add_matching(match_started.elapsed());

            let Some(src_node) = mappings.src_for(tracked.node) else {
                // the node does not exist this far back
                debug!(
                    commit = %revision.commit().oid().to_short_oid(),
                    title = %revision.commit().short_message(),
                    "no counterpart, stopping the walk"
                );
                records.push(ChangeRecord::introduced(
                    tracked.revision.commit().clone(),
                    tracked.version(),
                ));
                terminated = true;
                break;
            };

            if self
                .matcher
                .isomorphic(&src_tree, src_node, &tracked.tree, tracked.node)
            {
                debug!(
                    commit = %revision.commit().oid().to_short_oid(),
                    title = %revision.commit().short_message(),
                    "skipping isomorphic revision"
                );
            } else {
                let version =
                    NodeVersion::new(revision.content().clone(), src_tree.node(src_node).span());
                debug!(
                    commit = %revision.commit().oid().to_short_oid(),
                    title = %revision.commit().short_message(),
                    "matched {} `{}`",
                    src_tree.node(src_node).label(),
                    String::from_utf8_lossy(version.text())
                );
                records.push(ChangeRecord::changed(
                    tracked.revision.commit().clone(),
                    version,
                    tracked.version(),
                ));
            }

            tracked = TrackedState {
                revision,
                tree: src_tree,
                node: src_node,
            };
        }

        if !terminated {
            // history exhausted: the oldest revision reached introduced the node
            records.push(ChangeRecord::introduced(
                tracked.revision.commit().clone(),
                tracked.version(),
            ));
        }

        Ok(TrackOutcome { records, timings })
    }

    fn fetch(&self, commit: Commit, timings: &mut PhaseTimings) -> Result<Revision, ContentError> {
        let started = Instant::now();
        let content = self.source.content(&commit)?;
        timings.add_repository(started.elapsed());
        Ok(Revision::new(commit, content))
    }

    async fn parse(
        &self,
        revision: &Revision,
        timings: &mut PhaseTimings,
    ) -> Result<SyntaxTree, ParseError> {
        let started = Instant::now();
        let tree = self.parser.parse(&self.file_path, revision.content()).await;
        timings.add_parsing(started.elapsed());
        tree
    }
}

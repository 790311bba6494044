//! What the walk reports
//!
//! - [`Revision`]: one commit that touched the file, with the file's bytes at it
//! - [`NodeVersion`]: the tracked node's text range inside one revision
//! - [`ChangeRecord`]: a structural change between two adjacent tracked revisions

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::syntax::tree::Span;
use bytes::Bytes;
use derive_new::new;
use std::borrow::Cow;

/// One commit that touched the tracked file, paired with the file content at it
#[derive(Debug, Clone, new)]
pub struct Revision {
    commit: Commit,
    content: Bytes,
}

impl Revision {
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// The tracked node as it looked in one revision
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct NodeVersion {
    content: Bytes,
    span: Span,
}

impl NodeVersion {
    /// The bytes the node covers inside its revision's content
    pub fn text(&self) -> &[u8] {
        &self.content[self.span.start..self.span.end]
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// One structural change to the tracked node
///
/// `commit` is the newer of the two revisions the change sits between. A
/// record without a previous version marks where the node first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    commit: Commit,
    previous: Option<NodeVersion>,
    current: NodeVersion,
}

impl ChangeRecord {
    /// The node changed between some older revision and `commit`
    pub fn changed(commit: Commit, previous: NodeVersion, current: NodeVersion) -> Self {
        ChangeRecord {
            commit,
            previous: Some(previous),
            current,
        }
    }

    /// No older revision carries the node: it first appeared at `commit`
    pub fn introduced(commit: Commit, current: NodeVersion) -> Self {
        ChangeRecord {
            commit,
            previous: None,
            current,
        }
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn previous(&self) -> Option<&NodeVersion> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> &NodeVersion {
        &self.current
    }

    /// Text of the older version, empty when the node was just introduced
    pub fn previous_text(&self) -> Cow<'_, str> {
        self.previous
            .as_ref()
            .map_or(Cow::Borrowed(""), |version| {
                String::from_utf8_lossy(version.text())
            })
    }

    pub fn current_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.current.text())
    }
}

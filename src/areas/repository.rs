//! High-level access to an existing git repository
//!
//! [`Repository`] ties the object database and the refs reader together and
//! answers the two questions the walk keeps asking: what does HEAD point at,
//! and what were this file's bytes at that commit.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures raised while reading repository state
///
/// Any of these aborts the run; the walk never papers over a repository it
/// cannot read faithfully.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unable to open repository at {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },
    #[error("HEAD does not resolve to a commit")]
    UnresolvedHead,
    #[error("unable to read ref {name}")]
    RefRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ref {name}: {reason}")]
    MalformedRef { name: String, reason: String },
    #[error("unable to read object {oid}")]
    ObjectRead {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },
    #[error("object {oid} is corrupt: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },
    #[error("object {oid} is a {actual}, expected a {expected}")]
    UnexpectedType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Failures raised while materializing a file's bytes at a commit
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("file {} does not exist at commit {commit}", path.display())]
    NotFound { path: PathBuf, commit: ObjectId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct Repository {
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open an existing repository rooted at `path`
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        let path = path.canonicalize().map_err(|err| RepositoryError::Open {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let git_path = path.join(".git");
        if !git_path.is_dir() {
            return Err(RepositoryError::Open {
                path,
                reason: "not a git repository (missing .git directory)".to_string(),
            });
        }

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository { database, refs })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The commit HEAD currently points at
    pub fn head_commit(&self) -> Result<Commit, RepositoryError> {
        let oid = self
            .refs
            .read_head()?
            .ok_or(RepositoryError::UnresolvedHead)?;
        self.database.parse_object_as_commit(&oid)
    }

    /// The file's bytes as committed, located by walking the commit's tree
    pub fn content_at(&self, commit: &Commit, path: &Path) -> Result<Bytes, ContentError> {
        let entry = self
            .database
            .entry_at_path(commit.tree_oid(), path)?
            .ok_or_else(|| ContentError::NotFound {
                path: path.to_path_buf(),
                commit: commit.oid().clone(),
            })?;

        let blob = self.database.parse_object_as_blob(entry.oid())?;
        Ok(blob.into_content())
    }
}

//! Git references (HEAD and what it points at)
//!
//! References are human-readable names pointing to commits. The walk only
//! ever needs one of them: HEAD, resolved through any chain of symbolic
//! references down to a commit ID.
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references
//!
//! Refs created by `git clone` may live only in `.git/packed-refs`, one
//! `<oid> <name>` pair per line; that file is consulted when the loose ref
//! file is absent.

use crate::areas::repository::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Regex pattern for parsing symbolic references
static SYMREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ref: (.+)$").expect("hard-coded regex compiles"));

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Git references reader
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.git` directory
    path: Box<Path>,
}

/// Internal representation of a reference value
///
/// Can be either a symbolic reference or a direct object ID.
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { target: String },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path, name: &str) -> Result<Option<Self>, RepositoryError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            RepositoryError::RefRead {
                name: name.to_string(),
                source,
            }
        })?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        if let Some(symref_match) = SYMREF_REGEX.captures(content) {
            Ok(Some(SymRefOrOid::SymRef {
                target: symref_match[1].to_string(),
            }))
        } else {
            let oid = ObjectId::try_parse(content.to_string()).map_err(|err| {
                RepositoryError::MalformedRef {
                    name: name.to_string(),
                    reason: err.to_string(),
                }
            })?;
            Ok(Some(SymRefOrOid::Oid(oid)))
        }
    }
}

impl Refs {
    /// Resolve HEAD to a commit ID, following symbolic references
    ///
    /// # Returns
    ///
    /// Some(ObjectId) if HEAD resolves to a commit, None for an unborn branch
    pub fn read_head(&self) -> Result<Option<ObjectId>, RepositoryError> {
        self.read_symref(&self.head_path(), HEAD_REF_NAME)
    }

    fn read_symref(&self, path: &Path, name: &str) -> Result<Option<ObjectId>, RepositoryError> {
        match SymRefOrOid::read_symref_or_oid(path, name)? {
            Some(SymRefOrOid::SymRef { target }) => {
                let target_path = self.path.join(&target);
                if target_path.exists() {
                    self.read_symref(&target_path, &target)
                } else {
                    self.read_packed_ref(&target)
                }
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    fn read_packed_ref(&self, name: &str) -> Result<Option<ObjectId>, RepositoryError> {
        let packed_path = self.path.join("packed-refs");
        if !packed_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&packed_path).map_err(|source| {
            RepositoryError::RefRead {
                name: "packed-refs".to_string(),
                source,
            }
        })?;

        for line in content.lines() {
            // '#' starts the header, '^' a peeled tag line
            if line.starts_with('#') || line.starts_with('^') {
                continue;
            }
            if let Some((oid, ref_name)) = line.split_once(' ')
                && ref_name == name
            {
                let oid = ObjectId::try_parse(oid.to_string()).map_err(|err| {
                    RepositoryError::MalformedRef {
                        name: name.to_string(),
                        reason: err.to_string(),
                    }
                })?;
                return Ok(Some(oid));
            }
        }

        Ok(None)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }
}

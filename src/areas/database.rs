//! Loose object database (read side)
//!
//! Objects are zlib-deflated files under `.git/objects/XX/YYYY...`, named by
//! the SHA-1 of their inflated bytes. Every load re-hashes the inflated bytes
//! and compares against the requested ID, so a truncated or bit-flipped
//! object file surfaces as a corruption error instead of a bogus parse.

use crate::areas::repository::RepositoryError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use anyhow::Context;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Cursor, Read};
use std::path::{Component, Path};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles so repositories that have been gc'd work too
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob, RepositoryError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => {
                Blob::deserialize(object_reader).map_err(|err| Self::corrupt(object_id, err))
            }
            actual => Err(Self::unexpected(object_id, ObjectType::Blob, actual)),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree, RepositoryError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => {
                Tree::deserialize(object_reader).map_err(|err| Self::corrupt(object_id, err))
            }
            actual => Err(Self::unexpected(object_id, ObjectType::Tree, actual)),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit, RepositoryError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_id.clone(), object_reader)
                .map_err(|err| Self::corrupt(object_id, err)),
            actual => Err(Self::unexpected(object_id, ObjectType::Commit, actual)),
        }
    }

    /// Walk a root tree down to the entry named by `path`
    ///
    /// Returns None when any path component is missing, or when a non-final
    /// component names a blob instead of a subtree.
    pub fn entry_at_path(
        &self,
        root_tree: &ObjectId,
        path: &Path,
    ) -> Result<Option<TreeEntry>, RepositoryError> {
        let mut tree_oid = root_tree.clone();
        let mut components = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .peekable();

        while let Some(name) = components.next() {
            let tree = self.parse_object_as_tree(&tree_oid)?;
            let Some(entry) = tree.entry(name) else {
                return Ok(None);
            };

            if components.peek().is_none() {
                return Ok(Some(entry.clone()));
            }
            if !entry.is_tree() {
                return Ok(None);
            }
            tree_oid = entry.oid().clone();
        }

        Ok(None)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> Result<(ObjectType, impl BufRead), RepositoryError> {
        let object_content = self.read_object(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)
            .map_err(|err| Self::corrupt(object_id, err))?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId) -> Result<Bytes, RepositoryError> {
        let object_path = self.path.join(object_id.to_path());

        // read the object file
        let object_content = std::fs::read(&object_path).map_err(|source| {
            RepositoryError::ObjectRead {
                oid: object_id.clone(),
                source,
            }
        })?;

        // decompress the object content
        let object_content = Self::decompress(object_content.into())
            .map_err(|err| Self::corrupt(object_id, err))?;

        // an object is named by the hash of its inflated bytes
        let mut hasher = Sha1::new();
        hasher.update(&object_content);
        let actual = format!("{:x}", hasher.finalize());
        if actual != object_id.as_ref() {
            return Err(RepositoryError::CorruptObject {
                oid: object_id.clone(),
                reason: format!("checksum mismatch, content hashes to {actual}"),
            });
        }

        Ok(object_content)
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn corrupt(object_id: &ObjectId, err: anyhow::Error) -> RepositoryError {
        RepositoryError::CorruptObject {
            oid: object_id.clone(),
            reason: err.to_string(),
        }
    }

    fn unexpected(object_id: &ObjectId, expected: ObjectType, actual: ObjectType) -> RepositoryError {
        RepositoryError::UnexpectedType {
            oid: object_id.clone(),
            expected,
            actual,
        }
    }
}

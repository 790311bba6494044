//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. The walk
//! only ever reads three of them:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! All objects are stored as `<type> <size>\0<content>`, zlib-deflated.

pub mod blob;
pub mod commit;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

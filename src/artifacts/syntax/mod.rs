//! Parsed-file representation
//!
//! - `tree`: post-order arena of labeled, byte-spanned nodes
//! - `fingerprint`: structural digests used to decide subtree isomorphism

pub mod fingerprint;
pub mod tree;

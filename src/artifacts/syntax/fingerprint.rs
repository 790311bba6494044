//! Structural fingerprints for syntax subtrees
//!
//! A fingerprint digests a node's label and the fingerprints of its children,
//! in order. Two subtrees carry the same fingerprint exactly when they have
//! the same shape and labels; byte offsets never enter the digest, so
//! reformatting a file leaves every fingerprint untouched.

use sha1::{Digest, Sha1};

/// SHA-1 over `label \0 child-fingerprints...`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    pub fn of_node(label: &str, children: impl Iterator<Item = Fingerprint>) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(label.as_bytes());
        hasher.update([0u8]);
        for child in children {
            hasher.update(child.0);
        }
        Fingerprint(hasher.finalize().into())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // first 4 bytes are plenty for log output
        write!(
            f,
            "Fingerprint({:02x}{:02x}{:02x}{:02x})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use proptest::prelude::*;
    use rstest::rstest;

    fn leaf(label: &str) -> Fingerprint {
        Fingerprint::of_node(label, std::iter::empty())
    }

    #[rstest]
    fn same_label_and_children_digest_identically() {
        let left = Fingerprint::of_node("file", [leaf("alpha"), leaf("beta")].into_iter());
        let right = Fingerprint::of_node("file", [leaf("alpha"), leaf("beta")].into_iter());

        assert_eq!(left, right);
    }

    #[rstest]
    fn child_order_matters() {
        let left = Fingerprint::of_node("file", [leaf("alpha"), leaf("beta")].into_iter());
        let right = Fingerprint::of_node("file", [leaf("beta"), leaf("alpha")].into_iter());

        assert_ne!(left, right);
    }

    #[rstest]
    fn label_separator_prevents_concatenation_clashes() {
        // "ab" + child "c" must not collide with "a" + child "bc"
        let left = Fingerprint::of_node("ab", std::iter::once(leaf("c")));
        let right = Fingerprint::of_node("a", std::iter::once(leaf("bc")));

        assert_ne!(left, right);
    }

    proptest! {
        #[test]
        fn digest_depends_only_on_labels(labels in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
            let one = Fingerprint::of_node("file", labels.iter().map(|l| leaf(l)));
            let two = Fingerprint::of_node("file", labels.iter().map(|l| leaf(l)));

            prop_assert_eq!(one, two);
        }
    }
}

//! Identifier management using string interning.
//!
//! Every node and group in a diagram gets an [`Id`]. Interning keeps the
//! identifiers `Copy` and makes equality and hashing cheap, which matters
//! because layout and export look identifiers up constantly.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all diagrams in the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned identifier for diagram elements.
///
/// # Examples
///
/// ```
/// use stencil_core::identifier::Id;
///
/// let group_id = Id::new("platform");
/// let node_id = Id::from_anonymous(0);
/// let nested = group_id.create_nested(Id::new("pod"));
/// assert_eq!(nested, "platform::pod");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Creates a generated identifier from a sequence number.
    ///
    /// Diagram builders hand these out for nodes, which have no
    /// user-visible name of their own (only a display label).
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Creates a nested identifier by joining parent and child with `::`.
    ///
    /// Used for groups so that two clusters with the same name under
    /// different parents stay distinct.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let parent = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let child = interner
            .resolve(child_id.0)
            .expect("Child ID should exist in interner");
        let nested = format!("{parent}::{child}");
        Self(interner.get_or_intern(&nested))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        value == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interned_equality() {
        let id1 = Id::new("vault");
        let id2 = Id::new("vault");
        let id3 = Id::new("server");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "vault");
    }

    #[test]
    fn test_anonymous_ids_are_distinct() {
        let id0 = Id::from_anonymous(0);
        let id1 = Id::from_anonymous(1);

        assert_ne!(id0, id1);
        assert_eq!(id0, Id::from_anonymous(0));
    }

    #[test]
    fn test_nested_group_ids() {
        let platform = Id::new("platform");
        let pod = platform.create_nested(Id::new("pod"));
        let other_pod = Id::new("edge").create_nested(Id::new("pod"));

        assert_eq!(pod, "platform::pod");
        assert_ne!(pod, other_pod);
    }

    #[test]
    fn test_deep_nesting() {
        let level1 = Id::new("cloud");
        let level2 = level1.create_nested(Id::new("platform"));
        let level3 = level2.create_nested(Id::new("pod"));

        assert_eq!(level3, "cloud::platform::pod");
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("a"), 1);
        map.insert(Id::new("b"), 2);

        assert_eq!(map.get(&Id::new("a")), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_display() {
        let id = Id::new("display_me");
        assert_eq!(format!("{id}"), "display_me");
    }

    proptest::proptest! {
        #[test]
        fn test_intern_roundtrip(name in "[a-zA-Z0-9_ :./-]{1,40}") {
            let id = Id::new(&name);
            proptest::prop_assert_eq!(format!("{id}"), name.clone());
            proptest::prop_assert_eq!(id, Id::new(&name));
        }
    }
}

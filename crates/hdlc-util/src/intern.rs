//! Arena-backed string interning.
//!
//! A [`StringPool`] owns one copy of every distinct string seen in a
//! compilation unit, allocated in the unit's bump arena. Interning the
//! same text twice returns the same [`StringEntry`], so name equality is
//! pointer equality for the rest of the front end.
//!
//! The pool is per compilation unit and single-threaded; two strings
//! interned in *different* pools never compare equal even when their text
//! matches.
//!
//! # Examples
//!
//! ```
//! use bumpalo::Bump;
//! use hdlc_util::intern::StringPool;
//!
//! let arena = Bump::new();
//! let pool = StringPool::new(&arena);
//! let a = pool.intern("clk");
//! let b = pool.intern("clk");
//! assert_eq!(a, b);
//! assert_eq!(&*a, "clk");
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use ahash::RandomState;
use bumpalo::Bump;

/// A handle to one interned string.
///
/// Equality and hashing use the identity of the owned text, not its
/// contents; within one pool the two coincide.
#[derive(Clone, Copy)]
pub struct StringEntry<'a>(&'a str);

impl<'a> StringEntry<'a> {
    #[inline]
    pub fn as_str(self) -> &'a str {
        self.0
    }
}

impl PartialEq for StringEntry<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for StringEntry<'_> {}

impl Hash for StringEntry<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0.as_ptr() as usize).hash(state);
        self.0.len().hash(state);
    }
}

impl Deref for StringEntry<'_> {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for StringEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for StringEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// The set of owned strings for one compilation unit.
pub struct StringPool<'a> {
    arena: &'a Bump,
    table: RefCell<HashSet<&'a str, RandomState>>,
}

impl<'a> StringPool<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            table: RefCell::new(HashSet::with_hasher(RandomState::new())),
        }
    }

    /// Intern `text`, returning the pool's canonical entry for it.
    pub fn intern(&self, text: &str) -> StringEntry<'a> {
        let mut table = self.table.borrow_mut();
        if let Some(&existing) = table.get(text) {
            return StringEntry(existing);
        }
        let owned: &'a str = self.arena.alloc_str(text);
        table.insert(owned);
        StringEntry(owned)
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string() {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let a = pool.intern("hello");
        let b = pool.intern("hello");
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_intern_different_strings() {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let a = pool.intern("hello");
        let b = pool.intern("world");
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_entry_text() {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let entry = pool.intern("module");
        assert_eq!(&*entry, "module");
        assert_eq!(entry.as_str(), "module");
        assert_eq!(entry.to_string(), "module");
    }

    #[test]
    fn test_identity_equality_matches_content_equality() {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let names = ["a", "bb", "a", "ccc", "bb", "a"];
        let entries: Vec<_> = names.iter().map(|n| pool.intern(n)).collect();
        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                assert_eq!(entries[i] == entries[j], a == b);
            }
        }
    }

    #[test]
    fn test_empty_string() {
        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let entry = pool.intern("");
        assert_eq!(&*entry, "");
        assert_eq!(entry, pool.intern(""));
    }

    #[test]
    fn test_entries_usable_as_map_keys() {
        use std::collections::HashMap;

        let arena = Bump::new();
        let pool = StringPool::new(&arena);
        let mut map = HashMap::new();
        map.insert(pool.intern("x"), 1);
        map.insert(pool.intern("y"), 2);
        assert_eq!(map[&pool.intern("x")], 1);
        assert_eq!(map[&pool.intern("y")], 2);
    }
}

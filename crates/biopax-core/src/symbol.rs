//! Interned attribute names.
//!
//! Large BioPAX exports repeat the same few dozen property names hundreds of
//! thousands of times. Attribute names are therefore stored as [`Symbol`]s,
//! `Copy` handles into a process-wide string interner, so that attribute maps
//! hash and compare integers instead of strings.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Symbol`].
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`; symbols themselves are plain
/// integers and can be shared freely across threads.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An interned attribute name such as `entity_reference` or `xref_of`.
///
/// # Examples
///
/// ```
/// use biopax_core::symbol::Symbol;
///
/// let xref = Symbol::new("xref");
/// assert_eq!(xref, "xref");
/// assert_eq!(xref, Symbol::new("xref"));
/// assert_eq!(xref.with_suffix("_of"), "xref_of");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(DefaultSymbol);

impl Symbol {
    /// Interns `name` and returns its symbol.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the symbol for `name` only if it has been interned before.
    ///
    /// Lookups of attribute names coming from user input (path queries) use
    /// this so that probing unknown names does not grow the interner.
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }

    /// Returns a new symbol made of this name followed by `suffix`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut interner = interner();
        let joined = {
            let base = interner
                .resolve(self.0)
                .expect("symbol should exist in interner");
            format!("{base}{suffix}")
        };
        Self(interner.get_or_intern(joined))
    }

    /// Returns an owned copy of the interned string.
    pub fn to_owned_string(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("symbol should exist in interner")
            .to_owned()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("symbol should exist in interner");
        f.write_str(name)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_symbol() {
        assert_eq!(Symbol::new("participant"), Symbol::new("participant"));
        assert_ne!(Symbol::new("left"), Symbol::new("right"));
    }

    #[test]
    fn test_display_round_trips_name() {
        let sym = Symbol::new("member_physical_entity");
        assert_eq!(sym.to_string(), "member_physical_entity");
        assert_eq!(sym.to_owned_string(), "member_physical_entity");
    }

    #[test]
    fn test_with_suffix() {
        let inverse = Symbol::new("entity_reference").with_suffix("_of");
        assert_eq!(inverse, Symbol::new("entity_reference_of"));
    }

    #[test]
    fn test_lookup_does_not_intern() {
        assert!(Symbol::lookup("never_seen_attribute_name_1f3a").is_none());
        let sym = Symbol::new("seen_attribute_name_1f3a");
        assert_eq!(Symbol::lookup("seen_attribute_name_1f3a"), Some(sym));
    }

    #[test]
    fn test_str_comparison() {
        let sym = Symbol::new("xref");
        assert!(sym == "xref");
        assert!(sym != "xrefs");
    }
}

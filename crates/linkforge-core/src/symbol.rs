//! Interned connector type labels.
//!
//! The dictionary interns every connector label once. Connectors then carry a
//! 4-byte [`Symbol`], so chain comparison and hashing during duplicate
//! elimination never touch string data.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Handle to an interned connector label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub(crate) u32);

impl Symbol {
    /// Returns the raw interner slot.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// String table for connector labels.
///
/// Built while the dictionary loads and read-only afterwards; sentences share
/// it through an `Arc`.
///
/// # Example
///
/// ```
/// use linkforge_core::Interner;
///
/// let mut interner = Interner::new();
/// let s = interner.intern("S");
/// assert_eq!(interner.intern("S"), s);
/// assert_eq!(interner.resolve(s), Some("S"));
/// ```
#[derive(Default, Clone)]
pub struct Interner {
    lookup: FxHashMap<Arc<str>, Symbol>,
    strings: Vec<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `label`, returning the existing symbol if already present.
    pub fn intern(&mut self, label: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(label) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let shared: Arc<str> = Arc::from(label);
        self.strings.push(Arc::clone(&shared));
        self.lookup.insert(shared, sym);
        sym
    }

    /// Looks up a label without interning it.
    pub fn get(&self, label: &str) -> Option<Symbol> {
        self.lookup.get(label).copied()
    }

    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.0 as usize).map(|s| &**s)
    }

    pub fn contains(&self, sym: Symbol) -> bool {
        (sym.0 as usize) < self.strings.len()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        assert_ne!(a, b);
        assert_eq!(interner.intern("A"), a);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_resolve_unknown() {
        let interner = Interner::new();
        assert!(interner.resolve(Symbol(3)).is_none());
        assert!(!interner.contains(Symbol(0)));
        assert!(interner.get("X").is_none());
    }
}

//! String interner implementation using DashMap for concurrent access.
//!
//! The interner pairs a lock-free map (spelling -> index) with a reverse
//! table (index -> spelling) so that both directions are O(1). Strings are
//! leaked to obtain `'static` lifetime; the table lives for the whole
//! process and entries are never removed.

use ahash::RandomState;
use dashmap::DashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use super::Symbol;
use crate::error::{SymbolError, SymbolResult};

/// Global string table instance, initialized on first use.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

/// Thread-safe string table.
///
/// Lookups by spelling go through the DashMap without locking the reverse
/// table; only a miss takes the write lock, re-checks, and appends.
pub struct StringTable {
    /// Maps interned spelling to its table index.
    map: DashMap<&'static str, u32, RandomState>,

    /// Reverse table: index to spelling, in interning order.
    strings: RwLock<Vec<&'static str>>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: RwLock::new(Vec::with_capacity(256)),
        }
    }

    /// Intern a string, returning its symbol.
    ///
    /// If the spelling is already present the existing symbol is returned;
    /// otherwise a new entry is allocated.
    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(entry) = self.map.get(string) {
            return Symbol {
                index: *entry.value(),
            };
        }

        let mut strings = self
            .strings
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Re-check under the write lock: another thread may have raced us.
        if let Some(entry) = self.map.get(string) {
            return Symbol {
                index: *entry.value(),
            };
        }

        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = strings.len() as u32;
        strings.push(interned);
        self.map.insert(interned, index);

        Symbol { index }
    }

    /// Resolve a symbol back to its spelling.
    pub fn resolve(&self, symbol: Symbol) -> SymbolResult<&'static str> {
        let strings = self.strings.read().unwrap_or_else(PoisonError::into_inner);
        strings
            .get(symbol.index as usize)
            .copied()
            .ok_or(SymbolError::NotFound {
                index: symbol.index,
            })
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

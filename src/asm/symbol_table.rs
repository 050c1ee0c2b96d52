//! Symbol table for the Hack assembler.
//!
//! Uses a hybrid layout: a PHF map for the predefined symbols (compile-time
//! perfect hash, zero initialization cost) and an `FxHashMap` for
//! user-defined labels and variables.

use phf::phf_map;
use rustc_hash::FxHashMap;

/// Predefined symbols of the Hack platform.
static PREDEFINED_SYMBOLS: phf::Map<&'static str, u16> = phf_map! {
    // Virtual registers
    "R0" => 0,
    "R1" => 1,
    "R2" => 2,
    "R3" => 3,
    "R4" => 4,
    "R5" => 5,
    "R6" => 6,
    "R7" => 7,
    "R8" => 8,
    "R9" => 9,
    "R10" => 10,
    "R11" => 11,
    "R12" => 12,
    "R13" => 13,
    "R14" => 14,
    "R15" => 15,

    // Special pointers
    "SP" => 0,
    "LCL" => 1,
    "ARG" => 2,
    "THIS" => 3,
    "THAT" => 4,

    // I/O pointers
    "SCREEN" => 16384,
    "KBD" => 24576,
};

/// Mapping from symbolic names to 15-bit RAM/ROM addresses.
///
/// Label addresses are recorded during the assembler's first pass;
/// variables are allocated on demand during the second pass.
///
/// # Example
/// ```
/// use hack_toolchain::asm::SymbolTable;
///
/// let mut st = SymbolTable::new();
/// assert_eq!(st.get_address("SP"), Some(0));
///
/// st.add_entry("LOOP", 100);
/// assert_eq!(st.get_address("LOOP"), Some(100));
/// ```
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// User-defined symbols (labels and variables)
    user_symbols: FxHashMap<String, u16>,
}

impl SymbolTable {
    /// Creates a new symbol table.
    ///
    /// Predefined symbols live in the PHF map, so no per-instance
    /// initialization is needed. Pre-allocates space for a typical user
    /// symbol count.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_symbols: FxHashMap::with_capacity_and_hasher(32, Default::default()),
        }
    }

    /// Adds a user-defined symbol; a later entry overwrites an earlier one.
    #[inline]
    pub fn add_entry(&mut self, symbol: &str, address: u16) {
        self.user_symbols.insert(symbol.to_string(), address);
    }

    /// Checks whether a symbol exists, predefined or user-defined.
    #[inline]
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        PREDEFINED_SYMBOLS.contains_key(symbol) || self.user_symbols.contains_key(symbol)
    }

    /// Gets the address bound to a symbol.
    #[inline]
    #[must_use]
    pub fn get_address(&self, symbol: &str) -> Option<u16> {
        if let Some(&addr) = PREDEFINED_SYMBOLS.get(symbol) {
            return Some(addr);
        }
        self.user_symbols.get(symbol).copied()
    }

    /// Gets a symbol's address, allocating the next RAM slot if unbound.
    ///
    /// This is the hot path of the assembler's second pass. `next_address`
    /// is incremented only when a new variable is allocated, so issued
    /// addresses are never reused.
    ///
    /// # Example
    /// ```
    /// use hack_toolchain::asm::SymbolTable;
    ///
    /// let mut st = SymbolTable::new();
    /// let mut ram_addr = 16;
    ///
    /// assert_eq!(st.get_or_insert("i", &mut ram_addr), 16);
    /// assert_eq!(st.get_or_insert("i", &mut ram_addr), 16);
    /// assert_eq!(ram_addr, 17);
    /// ```
    #[inline]
    pub fn get_or_insert(&mut self, symbol: &str, next_address: &mut u16) -> u16 {
        use std::collections::hash_map::Entry;

        if let Some(&addr) = PREDEFINED_SYMBOLS.get(symbol) {
            return addr;
        }

        // Entry API avoids a double lookup on the miss path.
        match self.user_symbols.entry(symbol.to_string()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let addr = *next_address;
                *next_address += 1;
                *e.insert(addr)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_symbols() {
        let st = SymbolTable::new();

        assert_eq!(st.get_address("SP"), Some(0));
        assert_eq!(st.get_address("LCL"), Some(1));
        assert_eq!(st.get_address("ARG"), Some(2));
        assert_eq!(st.get_address("THIS"), Some(3));
        assert_eq!(st.get_address("THAT"), Some(4));

        assert_eq!(st.get_address("SCREEN"), Some(16384));
        assert_eq!(st.get_address("KBD"), Some(24576));

        for i in 0..=15 {
            assert_eq!(st.get_address(&format!("R{i}")), Some(i));
        }
    }

    #[test]
    fn test_add_and_get_user_symbols() {
        let mut st = SymbolTable::new();

        st.add_entry("LOOP", 100);
        assert_eq!(st.get_address("LOOP"), Some(100));
        assert!(st.contains("LOOP"));

        assert!(!st.contains("UNKNOWN"));
        assert_eq!(st.get_address("UNKNOWN"), None);
    }

    #[test]
    fn test_later_entry_overwrites() {
        let mut st = SymbolTable::new();

        st.add_entry("END", 10);
        st.add_entry("END", 20);
        assert_eq!(st.get_address("END"), Some(20));
    }

    #[test]
    fn test_get_or_insert() {
        let mut st = SymbolTable::new();
        let mut next = 16;

        assert_eq!(st.get_or_insert("var1", &mut next), 16);
        assert_eq!(next, 17);

        // Existing symbol: no new allocation
        assert_eq!(st.get_or_insert("var1", &mut next), 16);
        assert_eq!(next, 17);

        assert_eq!(st.get_or_insert("var2", &mut next), 17);
        assert_eq!(next, 18);
    }

    #[test]
    fn test_get_or_insert_predefined_does_not_allocate() {
        let mut st = SymbolTable::new();
        let mut next = 16;

        assert_eq!(st.get_or_insert("SP", &mut next), 0);
        assert_eq!(st.get_or_insert("KBD", &mut next), 24576);
        assert_eq!(next, 16);
        assert!(st.user_symbols.is_empty());
    }
}

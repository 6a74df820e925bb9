//! Entity identifier generation.
//!
//! Every entity kind mints ids as `prefix + counter`, where the counter is
//! seeded from the current table size. Because records can be deleted, the
//! seed alone is not collision-free; generation skips forward past any key
//! that already exists, so uniqueness within a kind holds unconditionally.

use std::collections::BTreeMap;

/// Zero-padded id, e.g. `S001`, `M014`, `ZAI-007`.
pub fn padded_id<V>(table: &BTreeMap<String, V>, prefix: &str, width: usize) -> String {
    let mut n = table.len() + 1;
    loop {
        let id = format!("{prefix}{n:0width$}");
        if !table.contains_key(&id) {
            return id;
        }
        n += 1;
    }
}

/// Unpadded id, e.g. `note-3`, `user-12`.
pub fn serial_id<V>(table: &BTreeMap<String, V>, prefix: &str) -> String {
    let mut n = table.len() + 1;
    loop {
        let id = format!("{prefix}{n}");
        if !table.contains_key(&id) {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_id_counts_from_table_size() {
        let mut table = BTreeMap::new();
        assert_eq!(padded_id(&table, "S", 3), "S001");
        table.insert("S001".to_string(), ());
        assert_eq!(padded_id(&table, "S", 3), "S002");
    }

    #[test]
    fn test_padded_id_skips_existing_keys() {
        let mut table = BTreeMap::new();
        table.insert("ZAI-001".to_string(), ());
        table.insert("ZAI-002".to_string(), ());
        // A delete freed "ZAI-001"'s slot but the next seed (len + 1 = 2)
        // collides with "ZAI-002"; generation must walk past it.
        table.remove("ZAI-001");
        assert_eq!(padded_id(&table, "ZAI-", 3), "ZAI-003");
        table.insert("ZAI-003".to_string(), ());
        assert_eq!(padded_id(&table, "ZAI-", 3), "ZAI-004");
    }

    #[test]
    fn test_serial_id_skips_existing_keys() {
        let mut table = BTreeMap::new();
        table.insert("note-1".to_string(), ());
        table.insert("note-2".to_string(), ());
        table.remove("note-1");
        // len + 1 = 2 collides with the surviving "note-2".
        assert_eq!(serial_id(&table, "note-"), "note-3");
    }
}

//! A keyed table with a monotonic id sequence.

use std::collections::BTreeMap;

/// Rows of one entity kind, keyed by their numeric id.
///
/// Ids are assigned from a sequence starting at 1 and are never reused,
/// even after a row is removed. Iteration is always in id order, so reads
/// are deterministic.
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert a row built around the next id in the sequence and return it.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let product = table.insert_with(|id| Product::from_draft(ProductId::new(id), draft, slug));
    /// ```
    pub fn insert_with<F>(&mut self, build: F) -> T
    where
        T: Clone,
        F: FnOnce(i64) -> T,
    {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Rows in id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove and return every row the predicate matches, in id order.
    /// The backbone of cascade deletion.
    pub fn extract_where<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let ids: Vec<i64> = self
            .rows
            .iter()
            .filter(|(_, row)| pred(row))
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.rows.remove(&id))
            .collect()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut table: Table<(i64, &str)> = Table::new();
        let first = table.insert_with(|id| (id, "a"));
        let second = table.insert_with(|id| (id, "b"));
        assert_eq!(first.0, 1);
        assert_eq!(second.0, 2);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut table: Table<i64> = Table::new();
        table.insert_with(|id| id);
        table.insert_with(|id| id);
        assert_eq!(table.remove(2), Some(2));
        let next = table.insert_with(|id| id);
        assert_eq!(next, 3);
    }

    #[test]
    fn test_values_in_id_order() {
        let mut table: Table<i64> = Table::new();
        for _ in 0..5 {
            table.insert_with(|id| id * 10);
        }
        let collected: Vec<i64> = table.values().copied().collect();
        assert_eq!(collected, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_extract_where() {
        let mut table: Table<i64> = Table::new();
        for _ in 0..6 {
            table.insert_with(|id| id);
        }
        let even = table.extract_where(|row| row % 2 == 0);
        assert_eq!(even, vec![2, 4, 6]);
        assert_eq!(table.len(), 3);
        assert!(table.contains(1));
        assert!(!table.contains(2));
    }
}

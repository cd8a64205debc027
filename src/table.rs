//! Tabla de estados de tecla basada en `HashMap`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::traits::state::InputStateExt;

/// Implementación por defecto de [`InputStateExt`].
///
/// Guarda un `bool` por identificador de tecla (`true` = abajo). La ausencia de una
/// entrada equivale a `false`.
#[derive(Debug, Clone)]
pub struct KeyStateTable<K> {
    keys: HashMap<K, bool>,
}

impl<K> KeyStateTable<K>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Lookup con valor por defecto explícito: una tecla desconocida está arriba.
    #[inline]
    fn get_or_default(&self, key: &K) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}

impl<K> Default for KeyStateTable<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InputStateExt<K> for KeyStateTable<K>
where
    K: Copy + Eq + Hash,
{
    fn is_down(&self, key: &K) -> bool {
        self.get_or_default(key)
    }

    fn press(&mut self, key: K) -> bool {
        if self.get_or_default(&key) {
            return false;
        }
        self.keys.insert(key, true);
        true
    }

    fn release(&mut self, key: K) -> bool {
        self.keys.insert(key, false).unwrap_or(false)
    }

    fn any_down(&self) -> bool {
        self.keys.values().any(|down| *down)
    }

    fn keys_down(&self) -> Vec<K> {
        self.keys
            .iter()
            .filter(|(_, down)| **down)
            .map(|(key, _)| *key)
            .collect()
    }

    fn tracked_keys(&self) -> usize {
        self.keys.len()
    }

    fn release_all(&mut self) {
        self.keys.values_mut().for_each(|down| *down = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_up() {
        let table = KeyStateTable::<u32>::new();
        assert!(!table.is_down(&42));
        assert_eq!(table.tracked_keys(), 0);
    }

    #[test]
    fn press_reports_only_the_edge() {
        let mut table = KeyStateTable::new();
        assert!(table.press(7u32));
        assert!(!table.press(7));
        assert!(!table.press(7));
        assert!(table.is_down(&7));
    }

    #[test]
    fn release_is_idempotent_and_materializes_entry() {
        let mut table = KeyStateTable::new();
        assert!(!table.release(3u32));
        assert!(!table.is_down(&3));
        assert_eq!(table.tracked_keys(), 1);

        table.press(3);
        assert!(table.release(3));
        assert!(!table.release(3));
    }

    #[test]
    fn release_all_keeps_entries() {
        let mut table = KeyStateTable::new();
        table.press('a');
        table.press('b');
        table.release('c');
        assert!(table.any_down());

        table.release_all();
        assert!(!table.any_down());
        assert!(table.keys_down().is_empty());
        assert_eq!(table.tracked_keys(), 3);
        assert!(table.press('a'));
    }

    #[test]
    fn keys_down_lists_held_keys() {
        let mut table = KeyStateTable::new();
        table.press(1u8);
        table.press(2);
        table.press(3);
        table.release(2);

        let mut held = table.keys_down();
        held.sort_unstable();
        assert_eq!(held, vec![1, 3]);
    }
}

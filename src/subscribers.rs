//! Lista ordenada de suscriptores al flanco de bajada.

use std::fmt;

/// Identificador opaco de una suscripción.
///
/// Único dentro de un tracker y nunca reutilizado, aunque la suscripción se elimine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registro de handlers en orden de suscripción.
///
/// Genérico sobre el tipo de handler `H`: el tracker de un solo hilo guarda
/// `Box<dyn FnMut>` y el compartido guarda `Arc<dyn Fn + Send + Sync>`.
pub(crate) struct Subscribers<H> {
    next_id: u64,
    entries: Vec<(SubscriptionId, H)>,
}

impl<H> Subscribers<H> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, handler: H) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    /// Elimina la suscripción conservando el orden de las restantes.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(SubscriptionId, H)> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut (SubscriptionId, H)> {
        self.entries.iter_mut()
    }
}

impl<H> Default for Subscribers<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Subscribers<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut subs = Subscribers::new();
        let a = subs.subscribe("a");
        let b = subs.subscribe("b");
        assert_ne!(a, b);

        assert!(subs.unsubscribe(a));
        let c = subs.subscribe("c");
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn unsubscribe_preserves_order() {
        let mut subs = Subscribers::new();
        subs.subscribe(1);
        let two = subs.subscribe(2);
        subs.subscribe(3);

        assert!(subs.unsubscribe(two));
        assert!(!subs.unsubscribe(two));

        let order: Vec<i32> = subs.iter().map(|(_, h)| *h).collect();
        assert_eq!(order, vec![1, 3]);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn display_shows_number() {
        let mut subs = Subscribers::new();
        let id = subs.subscribe(());
        assert_eq!(id.to_string(), "#0");
    }
}

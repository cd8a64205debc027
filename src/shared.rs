//! Tracker de flancos de bajada para hosts multihilo.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::{EdgeError, HandlerError};
use crate::subscribers::{SubscriptionId, Subscribers};
use crate::sync::{BACKEND, Lock};
use crate::table::KeyStateTable;
use crate::traits::sink::RawKeySink;
use crate::traits::state::InputStateExt;

/// Callback compartible entre hilos invocado en cada flanco de bajada.
pub type SharedKeyDownHandler<S, K> =
    Arc<dyn Fn(&S, &K) -> Result<(), HandlerError> + Send + Sync>;

struct State<S, K> {
    table: KeyStateTable<K>,
    subscribers: Subscribers<SharedKeyDownHandler<S, K>>,
}

/// # `SharedKeyEdgeTracker`
///
/// Versión clonable y thread-safe de [`KeyEdgeTracker`](crate::KeyEdgeTracker), para
/// hosts donde los eventos de teclado pueden llegar desde más de un hilo.
///
/// ## Sincronización
///
/// La tabla de estados y la lista de suscriptores viven detrás de **un único mutex**
/// (`std::sync::Mutex` o `parking_lot::Mutex`, según la feature). El lock se toma solo
/// para consultar/actualizar la tabla y copiar la lista de suscriptores; los callbacks
/// se ejecutan **después** de liberarlo. Así un callback puede reenviar eventos al
/// mismo tracker sin bloquearse.
///
/// Un suscriptor registrado mientras se entrega un flanco no recibe ese flanco.
///
/// ## Ejemplo
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::thread;
/// use key_edge_core::SharedKeyEdgeTracker;
///
/// let tracker = SharedKeyEdgeTracker::<(), u32>::new();
/// let edges = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&edges);
/// tracker.subscribe(move |_, _| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// });
///
/// thread::scope(|s| {
///     for _ in 0..4 {
///         let tracker = tracker.clone();
///         s.spawn(move || {
///             for _ in 0..100 {
///                 tracker.on_raw_key_down(&(), 32).unwrap();
///             }
///         });
///     }
/// });
///
/// assert_eq!(edges.load(Ordering::SeqCst), 1);
/// ```
pub struct SharedKeyEdgeTracker<S, K> {
    state: Arc<Lock<State<S, K>>>,
}

impl<S, K> Clone for SharedKeyEdgeTracker<S, K> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S, K> SharedKeyEdgeTracker<S, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        debug!(lock = BACKEND, "creando tracker compartido");
        Self {
            state: Arc::new(Lock::new(State {
                table: KeyStateTable::new(),
                subscribers: Subscribers::new(),
            })),
        }
    }

    /// Nombre del mutex con el que se compiló el crate (`"std"` o `"parking_lot"`).
    pub fn lock_backend() -> &'static str {
        BACKEND
    }

    /// Registra un callback para los flancos de bajada. Se invocan en orden de registro.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&S, &K) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let id = self.state.lock().subscribers.subscribe(Arc::new(handler));
        debug!(subscription = %id, "suscriptor registrado");
        id
    }

    /// Elimina una suscripción. Retorna `false` si no existía.
    ///
    /// Un flanco que ya se está entregando en otro hilo puede seguir invocando al
    /// callback eliminado.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.state.lock().subscribers.unsubscribe(id);
        debug!(subscription = %id, removed, "suscriptor eliminado");
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    /// Procesa un key-down crudo. Misma semántica que
    /// [`KeyEdgeTracker::on_raw_key_down`](crate::KeyEdgeTracker::on_raw_key_down).
    ///
    /// # Errores
    ///
    /// Retorna [`EdgeError::Subscriber`] con el primer suscriptor que falle; los
    /// siguientes no se invocan y la tecla queda marcada como abajo.
    pub fn on_raw_key_down(&self, sender: &S, key: K) -> Result<bool, EdgeError> {
        let handlers: Vec<(SubscriptionId, SharedKeyDownHandler<S, K>)> = {
            let mut state = self.state.lock();
            if !state.table.press(key) {
                trace!(?key, "repetición de key-down ignorada");
                return Ok(false);
            }
            state
                .subscribers
                .iter()
                .map(|(id, handler)| (*id, Arc::clone(handler)))
                .collect()
        };

        trace!(?key, subscribers = handlers.len(), "flanco de bajada");
        for (id, handler) in handlers {
            if let Err(source) = handler(sender, &key) {
                warn!(subscription = %id, ?key, error = %source, "el suscriptor falló");
                return Err(EdgeError::Subscriber { id, source });
            }
        }
        Ok(true)
    }

    /// Procesa un key-up crudo sin notificar. Retorna `true` si la tecla estaba abajo.
    pub fn on_raw_key_up(&self, _sender: &S, key: K) -> bool {
        let was_down = self.state.lock().table.release(key);
        trace!(?key, was_down, "key-up");
        was_down
    }

    pub fn is_down(&self, key: &K) -> bool {
        self.state.lock().table.is_down(key)
    }

    pub fn keys_down(&self) -> Vec<K> {
        self.state.lock().table.keys_down()
    }

    pub fn tracked_keys(&self) -> usize {
        self.state.lock().table.tracked_keys()
    }

    /// Marca todas las teclas como arriba sin notificar (por ejemplo, al perder el foco).
    pub fn release_all(&self) {
        let mut state = self.state.lock();
        debug!(tracked = state.table.tracked_keys(), "liberando todas las teclas");
        state.table.release_all();
    }
}

impl<S, K> Default for SharedKeyEdgeTracker<S, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K> RawKeySink<S, K> for SharedKeyEdgeTracker<S, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    type Error = EdgeError;

    fn on_raw_key_down(&mut self, sender: &S, key: K) -> Result<bool, EdgeError> {
        SharedKeyEdgeTracker::on_raw_key_down(self, sender, key)
    }

    fn on_raw_key_up(&mut self, sender: &S, key: K) -> bool {
        SharedKeyEdgeTracker::on_raw_key_up(self, sender, key)
    }
}

impl<S, K> fmt::Debug for SharedKeyEdgeTracker<S, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SharedKeyEdgeTracker")
            .field("table", &state.table)
            .field("subscribers", &state.subscribers)
            .field("lock", &BACKEND)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn callback_can_feed_events_back_without_deadlock() {
        let tracker = SharedKeyEdgeTracker::<(), u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = tracker.clone();
        let log = Arc::clone(&seen);
        let id = tracker.subscribe(move |_, key| {
            log.lock().unwrap().push(*key);
            if *key == 1 {
                // Tecla 1 simula un atajo que además pulsa la tecla 2.
                inner.on_raw_key_down(&(), 2)?;
                assert!(inner.is_down(&1));
            }
            Ok(())
        });

        assert!(tracker.on_raw_key_down(&(), 1).unwrap());
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);

        // Rompe el ciclo Arc entre el tracker y el closure.
        assert!(tracker.unsubscribe(id));
    }

    #[test]
    fn subscriber_added_during_delivery_misses_current_edge() {
        let tracker = SharedKeyEdgeTracker::<(), u32>::new();
        let late_hits = Arc::new(Mutex::new(0));

        let inner = tracker.clone();
        let hits = Arc::clone(&late_hits);
        let id = tracker.subscribe(move |_, _| {
            let hits = Arc::clone(&hits);
            inner.subscribe(move |_, _| {
                *hits.lock().unwrap() += 1;
                Ok(())
            });
            Ok(())
        });

        tracker.on_raw_key_down(&(), 7).unwrap();
        assert_eq!(*late_hits.lock().unwrap(), 0);
        assert_eq!(tracker.subscriber_count(), 2);
        assert!(tracker.unsubscribe(id));
    }

    #[test]
    fn failing_subscriber_surfaces_error() {
        let tracker = SharedKeyEdgeTracker::<(), u32>::new();
        let id = tracker.subscribe(|_, _| Err("fallo".into()));

        let err = tracker.on_raw_key_down(&(), 4).unwrap_err();
        assert_eq!(err.subscription(), id);
        assert!(tracker.is_down(&4));
        assert!(!tracker.on_raw_key_down(&(), 4).unwrap());
    }

    #[test]
    fn lock_backend_matches_features() {
        let expected = if cfg!(feature = "parking_lot") { "parking_lot" } else { "std" };
        assert_eq!(SharedKeyEdgeTracker::<(), u8>::lock_backend(), expected);
    }
}

//! Tracker de flancos de bajada para un solo hilo.
//!
//! Es el componente que el bucle de eventos del toolkit alimenta directamente:
//! recibe cada key-down crudo (incluidas las repeticiones de hardware) y cada
//! key-up, y notifica a sus suscriptores **una sola vez** por pulsación.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::error::{EdgeError, HandlerError};
use crate::subscribers::{SubscriptionId, Subscribers};
use crate::table::KeyStateTable;
use crate::traits::sink::RawKeySink;
use crate::traits::state::InputStateExt;

/// Callback invocado en cada flanco de bajada con `(sender, key)`.
pub type KeyDownHandler<S, K> = Box<dyn FnMut(&S, &K) -> Result<(), HandlerError>>;

/// # `KeyEdgeTracker`
///
/// Convierte la ráfaga de key-down que produce el toolkit mientras una tecla se
/// mantiene presionada en un único evento lógico de "tecla presionada".
///
/// ## Máquina de estados por tecla
///
/// ```text
///             on_raw_key_down (notifica)
///      ┌────┐ ─────────────────────────► ┌──────┐
///      │ Up │                            │ Down │ ◄─┐ on_raw_key_down
///      └────┘ ◄───────────────────────── └──────┘ ──┘ (repetición, silencio)
///       ▲  │        on_raw_key_up
///       └──┘ on_raw_key_up (silencio)
/// ```
///
/// El estado inicial `Up` es implícito: la entrada de la tabla solo se crea en la
/// primera observación.
///
/// ## Parámetros genéricos
///
/// - `S`: Token de contexto que se reenvía sin cambios a los suscriptores. Un
///   sender ausente se modela con `Option<T>` o `()`.
/// - `K`: Identificador de tecla (incluye los modificadores si el toolkit los combina).
/// - `T`: Tabla de estados, por defecto [`KeyStateTable`].
///
/// ## Ejemplo
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use key_edge_core::KeyEdgeTracker;
///
/// let presses = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&presses);
///
/// let mut tracker = KeyEdgeTracker::<&str, char>::new();
/// tracker.subscribe(move |sender, key| {
///     sink.borrow_mut().push((*sender, *key));
///     Ok(())
/// });
///
/// // El toolkit repite el key-down mientras la tecla está presionada.
/// tracker.on_raw_key_down(&"canvas", 'w').unwrap();
/// tracker.on_raw_key_down(&"canvas", 'w').unwrap();
/// tracker.on_raw_key_down(&"canvas", 'w').unwrap();
/// tracker.on_raw_key_up(&"canvas", 'w');
///
/// assert_eq!(*presses.borrow(), vec![("canvas", 'w')]);
/// ```
pub struct KeyEdgeTracker<S, K, T = KeyStateTable<K>> {
    table: T,
    subscribers: Subscribers<KeyDownHandler<S, K>>,
}

impl<S, K> KeyEdgeTracker<S, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Crea un tracker vacío con la tabla por defecto.
    pub fn new() -> Self {
        Self::with_table(KeyStateTable::new())
    }
}

impl<S, K> Default for KeyEdgeTracker<S, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K, T> KeyEdgeTracker<S, K, T>
where
    K: Copy + Eq + Hash + fmt::Debug,
    T: InputStateExt<K>,
{
    /// Crea un tracker sobre una tabla de estados propia.
    pub fn with_table(table: T) -> Self {
        Self {
            table,
            subscribers: Subscribers::new(),
        }
    }

    /// Registra un callback para los flancos de bajada.
    ///
    /// Los callbacks se invocan en orden de registro. El mismo closure puede
    /// registrarse varias veces; cada registro recibe su propio [`SubscriptionId`].
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&S, &K) -> Result<(), HandlerError> + 'static,
    {
        let id = self.subscribers.subscribe(Box::new(handler));
        debug!(subscription = %id, "suscriptor registrado");
        id
    }

    /// Elimina una suscripción. Retorna `false` si no existía.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.unsubscribe(id);
        debug!(subscription = %id, removed, "suscriptor eliminado");
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Procesa un key-down crudo del toolkit.
    ///
    /// Si la tecla estaba arriba la marca como abajo y notifica a cada suscriptor
    /// con `(sender, key)`. Si ya estaba abajo es una repetición de hardware y no
    /// hace nada.
    ///
    /// Retorna `Ok(true)` cuando se registró un flanco, haya o no suscriptores.
    ///
    /// # Errores
    ///
    /// Si un suscriptor falla, los siguientes no se invocan y se retorna
    /// [`EdgeError::Subscriber`]. La tecla queda marcada como abajo, así que las
    /// repeticiones posteriores siguen ignorándose.
    pub fn on_raw_key_down(&mut self, sender: &S, key: K) -> Result<bool, EdgeError> {
        if !self.table.press(key) {
            trace!(?key, "repetición de key-down ignorada");
            return Ok(false);
        }

        trace!(?key, subscribers = self.subscribers.len(), "flanco de bajada");
        for (id, handler) in self.subscribers.iter_mut() {
            if let Err(source) = handler(sender, &key) {
                warn!(subscription = %id, ?key, error = %source, "el suscriptor falló");
                return Err(EdgeError::Subscriber { id: *id, source });
            }
        }
        Ok(true)
    }

    /// Procesa un key-up crudo: marca la tecla como arriba sin notificar.
    ///
    /// Retorna `true` si la tecla estaba abajo.
    pub fn on_raw_key_up(&mut self, _sender: &S, key: K) -> bool {
        let was_down = self.table.release(key);
        trace!(?key, was_down, "key-up");
        was_down
    }

    /// Retorna `true` si la tecla está abajo. Una tecla nunca vista está arriba.
    pub fn is_down(&self, key: &K) -> bool {
        self.table.is_down(key)
    }

    pub fn keys_down(&self) -> Vec<K> {
        self.table.keys_down()
    }

    /// Número de identificadores distintos observados.
    pub fn tracked_keys(&self) -> usize {
        self.table.tracked_keys()
    }

    /// Marca todas las teclas como arriba sin notificar.
    ///
    /// Útil cuando la ventana pierde el foco: el toolkit no entregará los key-up
    /// de las teclas que se soltaron fuera de ella.
    pub fn release_all(&mut self) {
        debug!(tracked = self.table.tracked_keys(), "liberando todas las teclas");
        self.table.release_all();
    }

    /// Acceso de solo lectura a la tabla de estados.
    pub fn table(&self) -> &T {
        &self.table
    }
}

impl<S, K, T> RawKeySink<S, K> for KeyEdgeTracker<S, K, T>
where
    K: Copy + Eq + Hash + fmt::Debug,
    T: InputStateExt<K>,
{
    type Error = EdgeError;

    fn on_raw_key_down(&mut self, sender: &S, key: K) -> Result<bool, EdgeError> {
        KeyEdgeTracker::on_raw_key_down(self, sender, key)
    }

    fn on_raw_key_up(&mut self, sender: &S, key: K) -> bool {
        KeyEdgeTracker::on_raw_key_up(self, sender, key)
    }
}

impl<S, K, T> fmt::Debug for KeyEdgeTracker<S, K, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEdgeTracker")
            .field("table", &self.table)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

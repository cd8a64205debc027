use crate::traits::keys::{KeyExt, KeyStateExt, RawKeyState};

/// # Trait `RawKeySink`
///
/// Define el **punto de entrada** de los eventos crudos de teclado.
///
/// El toolkit de ventanas llama a `on_raw_key_down` en cada repetición de hardware
/// mientras una tecla se mantiene, y a `on_raw_key_up` una sola vez al soltarla.
/// Tanto [`KeyEdgeTracker`](crate::KeyEdgeTracker) como
/// [`SharedKeyEdgeTracker`](crate::SharedKeyEdgeTracker) implementan este trait, así
/// que el código de despacho del host se escribe una sola vez.
///
/// ## Diagrama conceptual
///
/// ```text
/// ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
/// │ Toolkit      │ → │ KeyExt +     │ → │ RawKeySink   │ → │ Suscriptores │
/// │ (WinForms,   │   │ KeyStateExt  │   │ (tabla de    │   │ (solo flanco │
/// │  AWT, winit) │   │              │   │  estados)    │   │  de bajada)  │
/// └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
/// ```
///
/// ## Parámetros genéricos
///
/// - `S`: Token de contexto (*sender*) que se reenvía sin modificar a los suscriptores.
/// - `K`: Identificador de tecla.
///
/// ## Ejemplo
///
/// ```rust
/// use key_edge_core::{KeyEdgeTracker, RawKeySink};
///
/// fn pump<T: RawKeySink<(), u32>>(sink: &mut T, events: &[(u32, bool)]) -> Result<usize, T::Error> {
///     let mut edges = 0;
///     for &(key, down) in events {
///         if sink.dispatch(&(), key, down)? {
///             edges += 1;
///         }
///     }
///     Ok(edges)
/// }
///
/// let mut tracker = KeyEdgeTracker::new();
/// let events = [(65, true), (65, true), (65, false), (65, true)];
/// assert_eq!(pump(&mut tracker, &events).unwrap(), 2);
/// ```
pub trait RawKeySink<S, K>
where
    K: Copy,
{
    /// Tipo de error retornado cuando un suscriptor falla.
    type Error;

    /// Procesa un key-down crudo.
    ///
    /// Retorna `Ok(true)` si el evento produjo un flanco de bajada y `Ok(false)`
    /// si era una repetición.
    ///
    /// # Errores
    ///
    /// Retorna el error del primer suscriptor que falle. El flanco ya quedó
    /// registrado en la tabla.
    fn on_raw_key_down(&mut self, sender: &S, key: K) -> Result<bool, Self::Error>;

    /// Procesa un key-up crudo. Nunca notifica.
    ///
    /// Retorna `true` si la tecla estaba abajo.
    fn on_raw_key_up(&mut self, sender: &S, key: K) -> bool;

    /// Traduce un evento nativo del toolkit y lo enruta a
    /// [`on_raw_key_down`](Self::on_raw_key_down) o [`on_raw_key_up`](Self::on_raw_key_up).
    ///
    /// Para un key-up retorna `Ok(false)`: solo los flancos de bajada cuentan.
    fn dispatch<B, I>(&mut self, sender: &S, key: B, state: I) -> Result<bool, Self::Error>
    where
        B: KeyExt<K>,
        I: KeyStateExt,
    {
        let key = B::from_backend_key(key);
        match I::from_external_state(state) {
            RawKeyState::Down => self.on_raw_key_down(sender, key),
            RawKeyState::Up => {
                self.on_raw_key_up(sender, key);
                Ok(false)
            }
        }
    }
}

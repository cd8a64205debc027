//! Traits de conversión entre los tipos nativos del toolkit de ventanas y los
//! tipos que usa el tracker.
//!
//! El toolkit entrega cada evento crudo con su propio tipo de tecla (un `u32`,
//! un enum de `winit`, un `KeyData` con modificadores ya combinados...) y su
//! propio tipo de estado. Estos traits los traducen a:
//!
//! - el **identificador de tecla** `N` con el que se indexa la tabla de estados,
//! - un [`RawKeyState`] normalizado (`Down` / `Up`).
//!
//! # Convenciones de tipos genéricos
//!
//! - **`KeyExt<N>`**: `Self` es el tipo nativo del toolkit, `N` es el
//!   **N**ormalized (identificador de tecla del tracker).
//! - **`KeyStateExt`**: `Self` es el estado nativo; la salida siempre es
//!   [`RawKeyState`].

/// Estado de un evento crudo de teclado tal como lo reporta el toolkit.
///
/// No distingue entre la primera pulsación y las repeticiones de hardware:
/// ambas llegan como `Down`. Esa distinción es justamente el trabajo del
/// tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKeyState {
    /// Key-down crudo (primera pulsación o repetición).
    Down,
    /// Key-up crudo.
    Up,
}

/// El trait [`KeyExt`] define la interfaz para **convertir una tecla nativa del toolkit**
/// en el identificador de tecla que usa el tracker.
///
/// El identificador debe incluir todo lo que distingue a una tecla para el host:
/// si el toolkit combina los modificadores en el código de tecla (por ejemplo
/// `Keys.Control | Keys.C`), esa combinación es la que se rastrea.
///
/// Existe una implementación identidad para cualquier tipo `Copy`, así que un
/// toolkit que ya entrega el identificador final no necesita implementar nada.
///
/// # Ejemplo: toolkit con códigos de tecla numéricos
/// ```rust
/// use key_edge_core::KeyExt;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// pub enum MyKey { A, B, Unknown }
///
/// pub struct NativeKey(u32);
///
/// impl KeyExt<MyKey> for NativeKey {
///     fn from_backend_key(key: NativeKey) -> MyKey {
///         match key.0 {
///             0x41 => MyKey::A,
///             0x42 => MyKey::B,
///             _ => MyKey::Unknown,
///         }
///     }
/// }
///
/// let key: MyKey = NativeKey::from_backend_key(NativeKey(0x41));
/// assert_eq!(key, MyKey::A);
/// ```
///
/// # Reglas de implementación
/// - La conversión debe ser **determinista**: la misma tecla nativa siempre produce
///   el mismo identificador, si no el tracker no puede emparejar down y up.
/// - No debe realizar asignaciones dinámicas ni conversiones costosas.
pub trait KeyExt<N>: Sized
where
    N: Copy,
{
    /// Convierte una tecla del toolkit (`Self`) a su identificador normalizado (`N`).
    fn from_backend_key(key: Self) -> N;
}

impl<T: Copy> KeyExt<T> for T {
    #[inline]
    fn from_backend_key(key: T) -> T {
        key
    }
}

/// El trait [`KeyStateExt`] traduce el **estado nativo** de un evento crudo
/// a un [`RawKeyState`].
///
/// # Ejemplo
/// ```rust
/// use key_edge_core::{KeyStateExt, RawKeyState};
///
/// pub struct NativeAction(u8);
///
/// impl KeyStateExt for NativeAction {
///     fn from_external_state(state: NativeAction) -> RawKeyState {
///         // 1 = press, 2 = autorepeat, 0 = release
///         match state.0 {
///             0 => RawKeyState::Up,
///             _ => RawKeyState::Down,
///         }
///     }
/// }
///
/// assert_eq!(NativeAction::from_external_state(NativeAction(2)), RawKeyState::Down);
/// ```
pub trait KeyStateExt: Sized {
    /// Convierte un estado nativo del toolkit a [`RawKeyState`].
    fn from_external_state(state: Self) -> RawKeyState;
}

impl KeyStateExt for RawKeyState {
    #[inline]
    fn from_external_state(state: RawKeyState) -> RawKeyState {
        state
    }
}

/// `true` = tecla abajo, `false` = tecla arriba.
impl KeyStateExt for bool {
    #[inline]
    fn from_external_state(state: bool) -> RawKeyState {
        if state { RawKeyState::Down } else { RawKeyState::Up }
    }
}

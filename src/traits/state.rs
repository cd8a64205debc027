use std::hash::Hash;

/// # Trait `InputStateExt`
///
/// Define la interfaz de la **tabla de estados de tecla** que consulta el tracker.
///
/// Cada tecla tiene un único estado lógico, `down` o `up`. Una tecla que nunca se
/// observó se considera `up`; las entradas se crean de forma perezosa en la primera
/// observación y no se eliminan nunca, así que la tabla crece como máximo hasta el
/// número de identificadores distintos que envió el toolkit.
///
/// La implementación por defecto es [`KeyStateTable`](crate::KeyStateTable). Implementar
/// este trait permite, por ejemplo, usar un mapa ordenado o un arreglo fijo indexado
/// por scancode en sistemas sin asignación dinámica.
///
/// ## Parámetros genéricos
/// - `K`: Identificador de tecla (tecla física/virtual más modificadores).
///
/// ## Ejemplo de uso
/// ```rust
/// use key_edge_core::{InputStateExt, KeyStateTable};
///
/// let mut table = KeyStateTable::new();
/// assert!(table.press('a'));   // flanco: up -> down
/// assert!(!table.press('a'));  // repetición de hardware
/// assert!(table.is_down(&'a'));
/// table.release('a');
/// assert!(!table.is_down(&'a'));
/// ```
pub trait InputStateExt<K>
where
    K: Copy + Eq + Hash,
{
    /// Retorna `true` si la tecla está actualmente abajo.
    ///
    /// Una tecla nunca observada retorna `false`.
    fn is_down(&self, key: &K) -> bool;

    /// Marca la tecla como abajo.
    ///
    /// Retorna `true` solo si la tecla estaba arriba, es decir, si esta llamada
    /// produjo un flanco de bajada. Una repetición no modifica la tabla y retorna `false`.
    fn press(&mut self, key: K) -> bool;

    /// Marca la tecla como arriba sin importar su estado previo.
    ///
    /// Retorna `true` si la tecla estaba abajo.
    fn release(&mut self, key: K) -> bool;

    /// Retorna `true` si **cualquier tecla** está abajo.
    fn any_down(&self) -> bool;

    /// Retorna todas las teclas actualmente abajo, sin orden garantizado.
    fn keys_down(&self) -> Vec<K>;

    /// Número de identificadores distintos observados hasta ahora.
    fn tracked_keys(&self) -> usize;

    /// Marca todas las teclas como arriba sin eliminar entradas.
    ///
    /// Pensado para cuando la ventana pierde el foco y el toolkit nunca entregará
    /// los key-up pendientes.
    fn release_all(&mut self);
}

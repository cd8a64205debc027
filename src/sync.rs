//! Mutex usado por [`SharedKeyEdgeTracker`](crate::SharedKeyEdgeTracker).
//!
//! Con la feature `parking_lot` se usa `parking_lot::Mutex`; si no, el de `std`
//! (feature `std_lock`, activa por defecto).

#[cfg(feature = "parking_lot")]
pub(crate) const BACKEND: &str = "parking_lot";

#[cfg(not(feature = "parking_lot"))]
pub(crate) const BACKEND: &str = "std";

#[cfg(feature = "parking_lot")]
pub(crate) struct Lock<T>(parking_lot::Mutex<T>);

#[cfg(feature = "parking_lot")]
impl<T> Lock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(parking_lot::Mutex::new(value))
    }

    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, T> {
        self.0.lock()
    }
}

#[cfg(not(feature = "parking_lot"))]
pub(crate) struct Lock<T>(std::sync::Mutex<T>);

#[cfg(not(feature = "parking_lot"))]
impl<T> Lock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    /// Un mutex envenenado se recupera: la tabla solo guarda `bool` por tecla.
    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

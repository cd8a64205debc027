use thiserror::Error;

use crate::subscribers::SubscriptionId;

/// Error que un suscriptor puede devolver desde su callback.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errores del tracker.
///
/// Las operaciones de entrada no fallan por sí mismas; el único origen de error
/// es un suscriptor que devuelve `Err` al recibir un flanco de bajada.
#[derive(Debug, Error)]
pub enum EdgeError {
    /// Un suscriptor falló. Los suscriptores posteriores no recibieron el flanco,
    /// pero la tecla ya quedó marcada como abajo.
    #[error("el suscriptor {id} falló al procesar el flanco de bajada")]
    Subscriber {
        id: SubscriptionId,
        #[source]
        source: HandlerError,
    },
}

impl EdgeError {
    /// Suscripción cuyo callback produjo el error.
    pub fn subscription(&self) -> SubscriptionId {
        match self {
            EdgeError::Subscriber { id, .. } => *id,
        }
    }
}

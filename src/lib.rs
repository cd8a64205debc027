//! # Crate `key_edge_core`
//!
//! **Detección de flancos de pulsación** para sistemas de input de teclado.
//!
//! Los toolkits de ventanas (WinForms, AWT, winit, ...) disparan el evento key-down
//! **repetidamente** mientras una tecla se mantiene presionada. Este crate colapsa esas
//! repeticiones en un único evento lógico de "tecla presionada" (el *flanco de bajada*)
//! y reinicia el estado de la tecla en el key-up.
//!
//! ---
//!
//! ## ¿Para quién es este crate?
//!
//! ### 🎨 **Para librerías de dibujo y GUI**
//!
//! Si tu librería recibe eventos crudos del toolkit y quiere exponer a sus usuarios un
//! `on_key_down` que se dispare **una vez por pulsación**, conecta los callbacks del
//! toolkit a [`KeyEdgeTracker`] y reenvía sus notificaciones.
//!
//! ### 🧵 **Para hosts multihilo**
//!
//! Si los eventos pueden llegar desde varios hilos, usa [`SharedKeyEdgeTracker`]: la
//! tabla y los suscriptores quedan detrás de un único mutex que **nunca** se mantiene
//! tomado mientras corren los callbacks.
//!
//! ---
//!
//! ## Máquina de estados
//!
//! Cada identificador de tecla tiene dos estados, `Up` y `Down`:
//!
//! | Estado | Evento            | Nuevo estado | ¿Notifica? |
//! |--------|-------------------|--------------|------------|
//! | `Up`   | `on_raw_key_down` | `Down`       | ✅ sí      |
//! | `Down` | `on_raw_key_down` | `Down`       | ❌ no      |
//! | `Down` | `on_raw_key_up`   | `Up`         | ❌ no      |
//! | `Up`   | `on_raw_key_up`   | `Up`         | ❌ no      |
//!
//! Una tecla nunca observada está en `Up`. El key-up nunca notifica: este crate solo
//! expone el flanco de bajada. Quien necesite "tecla soltada" puede consultar
//! [`KeyEdgeTracker::is_down`].
//!
//! ---
//!
//! ## Ejemplo: integración con el bucle de eventos
//!
//! ```rust
//! use key_edge_core::{KeyEdgeTracker, RawKeyState, RawKeySink};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Key { Space, Escape }
//!
//! let mut tracker = KeyEdgeTracker::<Option<u32>, Key>::new();
//! tracker.subscribe(|window, key| {
//!     println!("ventana {window:?}: {key:?} presionada");
//!     Ok(())
//! });
//!
//! // Lo que entregaría el toolkit mientras se mantiene Space.
//! let raw = [
//!     (Key::Space, RawKeyState::Down),
//!     (Key::Space, RawKeyState::Down),
//!     (Key::Space, RawKeyState::Down),
//!     (Key::Space, RawKeyState::Up),
//!     (Key::Escape, RawKeyState::Down),
//! ];
//!
//! let mut edges = 0;
//! for (key, state) in raw {
//!     if tracker.dispatch(&Some(1), key, state).unwrap() {
//!         edges += 1;
//!     }
//! }
//! assert_eq!(edges, 2);
//! ```
//!
//! ---
//!
//! ## Errores
//!
//! Un suscriptor puede devolver un [`HandlerError`]. El error se propaga al llamador de
//! `on_raw_key_down` como [`EdgeError::Subscriber`]; los suscriptores siguientes no
//! reciben ese flanco y la tecla queda marcada como abajo de todos modos.
//!
//! ---
//!
//! ## Logging
//!
//! El crate emite eventos con [`tracing`] (`trace` por cada evento crudo, `debug` al
//! (des)suscribir, `warn` cuando un suscriptor falla). No instala ningún subscriber:
//! eso le corresponde a la aplicación.
//!
//! ---
//!
//! ## Features
//!
//! - `std_lock` *(default)*: [`SharedKeyEdgeTracker`] usa `std::sync::Mutex`.
//! - `parking_lot`: usa `parking_lot::Mutex` en su lugar.
//!
//! ---
//!
//! ## Convenciones de tipos genéricos
//!
//! - `S` = **S**ender: token de contexto opaco que se reenvía sin cambios.
//! - `K` = **K**ey: identificador de tecla, `Copy + Eq + Hash + Debug`.
//! - `T` = **T**able: tabla de estados que implementa [`InputStateExt`].
//!
//! ---
//!
//! ## Módulos
//!
//! - [`traits`]: Conversión de tipos nativos, tabla de estados y punto de entrada
//! - [`table`]: Tabla de estados por defecto
//! - [`tracker`]: Tracker para un solo hilo
//! - [`shared`]: Tracker thread-safe
//! - [`error`]: Tipos de error

pub mod error;
pub mod shared;
mod subscribers;
mod sync;
pub mod table;
pub mod tracker;
pub mod traits;

pub use error::{EdgeError, HandlerError};
pub use shared::{SharedKeyDownHandler, SharedKeyEdgeTracker};
pub use subscribers::SubscriptionId;
pub use table::KeyStateTable;
pub use tracker::{KeyDownHandler, KeyEdgeTracker};
pub use traits::keys::{KeyExt, KeyStateExt, RawKeyState};
pub use traits::sink::RawKeySink;
pub use traits::state::InputStateExt;

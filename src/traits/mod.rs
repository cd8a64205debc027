//! Traits del protocolo de entrada: conversión de tipos nativos del toolkit,
//! tabla de estados de tecla y punto de entrada de eventos crudos.

pub mod keys;
pub mod sink;
pub mod state;

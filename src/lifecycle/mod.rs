//! Gestor del ciclo de vida de misiones
//!
//! Este módulo es el único punto de aplicación de las reglas de transición
//! de estado: tabla explícita de transiciones, capacidades por actor y
//! registro del historial. Todos los llamadores (consola admin, consola
//! chauffeur, cancelación cliente) pasan por aquí.

pub mod capabilities;
pub mod settlement;
pub mod transitions;

pub use capabilities::{Actor, Capabilities};
pub use settlement::SettlementError;
pub use transitions::{apply, validate_transition, TransitionError};

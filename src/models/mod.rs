//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod account;
pub mod branch;
pub mod client;
pub mod dashboard;
pub mod employee;
pub mod order;
pub mod truck;

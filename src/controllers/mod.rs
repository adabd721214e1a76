//! Controladores: casos de uso sobre los repositorios
//!
//! Cada operación recibe el `Caller` explícitamente y verifica sus
//! permisos antes de tocar datos.

pub mod auth_controller;
pub mod branch_controller;
pub mod client_controller;
pub mod employee_controller;
pub mod order_controller;
pub mod truck_controller;

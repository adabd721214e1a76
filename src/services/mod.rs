//! Reglas de negocio puras: transiciones de pedidos, proyección por rol y
//! agregación del dashboard.

pub mod dashboard;
pub mod order_lifecycle;
pub mod projection;

//! Modelo de Order
//!
//! Pedido de transporte de un cliente. El ciclo de vida es
//! `requested -> quoted -> confirmed -> en_route -> completed`, con
//! `cancelled` alcanzable desde cualquier estado no terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::truck::TruckStatus;

/// Estado del pedido - mapea al ENUM order_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Requested,
    Quoted,
    Confirmed,
    EnRoute,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Requested,
        OrderStatus::Quoted,
        OrderStatus::Confirmed,
        OrderStatus::EnRoute,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Requested => "Solicitado",
            OrderStatus::Quoted => "Cotizado",
            OrderStatus::Confirmed => "Confirmado",
            OrderStatus::EnRoute => "En Ruta",
            OrderStatus::Completed => "Completado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Estados en los que el camión asignado está despachado
    pub fn is_dispatching(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::EnRoute)
    }

    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Requested => 0,
            OrderStatus::Quoted => 1,
            OrderStatus::Confirmed => 2,
            OrderStatus::EnRoute => 3,
            OrderStatus::Completed => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    /// Mismo estado, avance (con saltos) o cancelación desde un estado no
    /// terminal. Nunca hacia atrás ni fuera de un estado terminal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        next == OrderStatus::Cancelled || next.rank() > self.rank()
    }
}

/// Pedido - mapea exactamente a la tabla orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub origin_branch_id: i64,
    pub destination: String,
    pub cargo_type: String,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub details: Option<String>,
    pub desired_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub estimated_cost: Option<Decimal>,
    pub quoted_price: Option<Decimal>,
    pub truck_id: Option<i64>,
    pub version: i32,
}

/// Pedido con los nombres de sus relaciones, listo para proyectar
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRecord {
    #[sqlx(flatten)]
    pub order: Order,
    pub client_username: String,
    pub origin_branch_name: String,
    pub truck_plate: Option<String>,
    pub truck_status: Option<TruckStatus>,
}

/// Valores de un pedido nuevo; estado, fecha de creación y versión los
/// pone la base de datos
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: i64,
    pub origin_branch_id: i64,
    pub destination: String,
    pub cargo_type: String,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub details: Option<String>,
    pub desired_date: NaiveDate,
}

/// Campos administrativos ya resueltos que se escriben en una actualización
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub estimated_cost: Option<Decimal>,
    pub quoted_price: Option<Decimal>,
    pub truck_id: Option<i64>,
}

impl From<&Order> for OrderUpdate {
    fn from(order: &Order) -> Self {
        Self {
            status: order.status,
            estimated_cost: order.estimated_cost,
            quoted_price: order.quoted_price,
            truck_id: order.truck_id,
        }
    }
}

/// Filtros para listar pedidos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub client_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn for_client(client_id: i64) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.client_id.map_or(true, |id| order.client_id == id)
            && self.branch_id.map_or(true, |id| order.origin_branch_id == id)
            && self.status.map_or(true, |status| order.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_default_status_is_requested() {
        assert_eq!(OrderStatus::default(), Requested);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Requested.can_transition_to(Quoted));
        assert!(Quoted.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(EnRoute));
        assert!(EnRoute.can_transition_to(Completed));
        assert!(Requested.can_transition_to(Confirmed));
    }

    #[test]
    fn test_cancel_from_any_open_state() {
        for status in [Requested, Quoted, Confirmed, EnRoute] {
            assert!(status.can_transition_to(Cancelled), "{:?}", status);
        }
    }

    #[test]
    fn test_backward_and_terminal_exits_rejected() {
        assert!(!EnRoute.can_transition_to(Quoted));
        assert!(!Confirmed.can_transition_to(Requested));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Requested));
        assert!(!Completed.can_transition_to(EnRoute));
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in OrderStatus::ALL {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(EnRoute.label(), "En Ruta");
        assert_eq!(serde_json::to_value(EnRoute).unwrap(), "en_route");
    }
}

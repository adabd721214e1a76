use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::order::{NewOrder, OrderRecord, OrderStatus};
use crate::models::truck::Truck;
use crate::utils::validation::{validate_measure, validate_money, validate_not_blank};

// Pedido creado por un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub origin_branch_id: i64,
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub destination: String,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub cargo_type: String,
    #[validate(custom = "validate_measure")]
    pub weight_kg: Decimal,
    #[validate(custom = "validate_measure")]
    pub volume_m3: Decimal,
    pub details: Option<String>,
    pub desired_date: NaiveDate,
}

impl CreateOrderRequest {
    pub fn into_new_order(self, client_id: i64) -> NewOrder {
        NewOrder {
            client_id,
            origin_branch_id: self.origin_branch_id,
            destination: self.destination.trim().to_string(),
            cargo_type: self.cargo_type.trim().to_string(),
            weight_kg: self.weight_kg,
            volume_m3: self.volume_m3,
            details: self.details.filter(|d| !d.trim().is_empty()),
            desired_date: self.desired_date,
        }
    }
}

/// Actualización administrativa parcial.
///
/// `None` significa "no enviado"; `Some(None)` es un `null` explícito que
/// limpia el valor (por ejemplo, desasignar el camión).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "present")]
    pub estimated_cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub quoted_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub truck_id: Option<Option<i64>>,
    pub version: Option<i32>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Validate for UpdateOrderRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(Some(cost)) = &self.estimated_cost {
            if let Err(e) = validate_money(cost) {
                errors.add("estimated_cost", e);
            }
        }
        if let Some(Some(price)) = &self.quoted_price {
            if let Err(e) = validate_money(price) {
                errors.add("quoted_price", e);
            }
        }
        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Vista completa de un pedido; los roles reciben subconjuntos de sus
/// campos (ver `services::projection`)
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub client_id: i64,
    pub client_username: String,
    pub origin_branch_id: i64,
    pub origin_branch_name: String,
    pub destination: String,
    pub cargo_type: String,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub details: Option<String>,
    pub desired_date: NaiveDate,
    pub status: OrderStatus,
    pub status_display: String,
    pub estimated_cost: Option<Decimal>,
    pub quoted_price: Option<Decimal>,
    pub truck_id: Option<i64>,
    pub truck_display: Option<String>,
    pub created_at: DateTime<Utc>,
    pub version: i32,
}

impl From<OrderRecord> for OrderView {
    fn from(record: OrderRecord) -> Self {
        let order = record.order;
        let truck_display = match (&record.truck_plate, record.truck_status) {
            (Some(plate), Some(status)) => Some(Truck::display(plate, status)),
            _ => None,
        };
        Self {
            id: order.id,
            client_id: order.client_id,
            client_username: record.client_username,
            origin_branch_id: order.origin_branch_id,
            origin_branch_name: record.origin_branch_name,
            destination: order.destination,
            cargo_type: order.cargo_type,
            weight_kg: order.weight_kg,
            volume_m3: order.volume_m3,
            details: order.details,
            desired_date: order.desired_date,
            status: order.status,
            status_display: order.status.label().to_string(),
            estimated_cost: order.estimated_cost,
            quoted_price: order.quoted_price,
            truck_id: order.truck_id,
            truck_display,
            created_at: order.created_at,
            version: order.version,
        }
    }
}

//! Proyección de pedidos por rol
//!
//! Tabla de estrategias `(operación, rol) -> campos`. Las lecturas conservan
//! solo los campos de la máscara; las escrituras rechazan cualquier campo
//! fuera de ella. Una combinación sin entrada está prohibida.

use serde_json::{Map, Value};

use crate::dto::order_dto::OrderView;
use crate::utils::errors::{field_errors, forbidden_error, internal_error, AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
}

impl Operation {
    fn verb(&self) -> &'static str {
        match self {
            Operation::Read => "ver",
            Operation::Create => "crear",
            Operation::Update => "modificar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    ClientId,
    ClientUsername,
    OriginBranchId,
    OriginBranchName,
    Destination,
    CargoType,
    WeightKg,
    VolumeM3,
    Details,
    DesiredDate,
    Status,
    StatusDisplay,
    EstimatedCost,
    QuotedPrice,
    TruckId,
    TruckDisplay,
    CreatedAt,
    Version,
}

impl OrderField {
    pub fn key(&self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::ClientId => "client_id",
            OrderField::ClientUsername => "client_username",
            OrderField::OriginBranchId => "origin_branch_id",
            OrderField::OriginBranchName => "origin_branch_name",
            OrderField::Destination => "destination",
            OrderField::CargoType => "cargo_type",
            OrderField::WeightKg => "weight_kg",
            OrderField::VolumeM3 => "volume_m3",
            OrderField::Details => "details",
            OrderField::DesiredDate => "desired_date",
            OrderField::Status => "status",
            OrderField::StatusDisplay => "status_display",
            OrderField::EstimatedCost => "estimated_cost",
            OrderField::QuotedPrice => "quoted_price",
            OrderField::TruckId => "truck_id",
            OrderField::TruckDisplay => "truck_display",
            OrderField::CreatedAt => "created_at",
            OrderField::Version => "version",
        }
    }

    pub const ALL: [OrderField; 19] = [
        OrderField::Id,
        OrderField::ClientId,
        OrderField::ClientUsername,
        OrderField::OriginBranchId,
        OrderField::OriginBranchName,
        OrderField::Destination,
        OrderField::CargoType,
        OrderField::WeightKg,
        OrderField::VolumeM3,
        OrderField::Details,
        OrderField::DesiredDate,
        OrderField::Status,
        OrderField::StatusDisplay,
        OrderField::EstimatedCost,
        OrderField::QuotedPrice,
        OrderField::TruckId,
        OrderField::TruckDisplay,
        OrderField::CreatedAt,
        OrderField::Version,
    ];

    fn from_key(key: &str) -> Option<OrderField> {
        OrderField::ALL.iter().copied().find(|field| field.key() == key)
    }
}

const CLIENT_READ: &[OrderField] = &[
    OrderField::Id,
    OrderField::OriginBranchId,
    OrderField::OriginBranchName,
    OrderField::Destination,
    OrderField::CargoType,
    OrderField::WeightKg,
    OrderField::VolumeM3,
    OrderField::Details,
    OrderField::DesiredDate,
    OrderField::Status,
    OrderField::StatusDisplay,
    OrderField::QuotedPrice,
    OrderField::CreatedAt,
];

const CLIENT_CREATE: &[OrderField] = &[
    OrderField::OriginBranchId,
    OrderField::Destination,
    OrderField::CargoType,
    OrderField::WeightKg,
    OrderField::VolumeM3,
    OrderField::Details,
    OrderField::DesiredDate,
];

const ADMIN_READ: &[OrderField] = &OrderField::ALL;

const ADMIN_UPDATE: &[OrderField] = &[
    OrderField::Status,
    OrderField::EstimatedCost,
    OrderField::QuotedPrice,
    OrderField::TruckId,
    OrderField::Version,
];

/// Campos visibles o escribibles para una operación y rol
pub fn order_mask(operation: Operation, role: Role) -> Option<&'static [OrderField]> {
    match (operation, role) {
        (Operation::Read, Role::Client) => Some(CLIENT_READ),
        (Operation::Create, Role::Client) => Some(CLIENT_CREATE),
        (Operation::Read, Role::Admin) => Some(ADMIN_READ),
        (Operation::Update, Role::Admin) => Some(ADMIN_UPDATE),
        _ => None,
    }
}

fn mask_or_forbidden(operation: Operation, role: Role) -> AppResult<&'static [OrderField]> {
    order_mask(operation, role).ok_or_else(|| {
        forbidden_error(
            &format!("{} pedidos", operation.verb()),
            "operación no disponible para este rol",
        )
    })
}

/// Serializar un pedido con solo los campos que el rol puede leer
pub fn project_order(view: &OrderView, role: Role) -> AppResult<Value> {
    let mask = mask_or_forbidden(Operation::Read, role)?;
    let full = match serde_json::to_value(view) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => return Err(internal_error("no se pudo serializar el pedido")),
    };

    let projected: Map<String, Value> = full
        .into_iter()
        .filter(|(key, _)| OrderField::from_key(key).map_or(false, |f| mask.contains(&f)))
        .collect();
    Ok(Value::Object(projected))
}

/// Rechazar los campos del payload que el rol no puede escribir
pub fn check_writable(operation: Operation, role: Role, payload: &Value) -> AppResult<()> {
    let mask = mask_or_forbidden(operation, role)?;
    let object = payload
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Se esperaba un objeto JSON".to_string()))?;

    let rejected: Vec<(&'static str, String)> = object
        .keys()
        .filter_map(|key| match OrderField::from_key(key) {
            Some(field) if mask.contains(&field) => None,
            Some(field) => Some((field.key(), "Este campo no es editable".to_string())),
            None => Some(("non_field_errors", format!("Campo desconocido: {}", key))),
        })
        .collect();

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(field_errors(&rejected)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn view() -> OrderView {
        OrderView {
            id: 10,
            client_id: 2,
            client_username: "cliente".to_string(),
            origin_branch_id: 1,
            origin_branch_name: "Osorno".to_string(),
            destination: "Valdivia".to_string(),
            cargo_type: "Salmón".to_string(),
            weight_kg: Decimal::new(250000, 2),
            volume_m3: Decimal::new(1200, 2),
            details: None,
            desired_date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            status: OrderStatus::Quoted,
            status_display: "Cotizado".to_string(),
            estimated_cost: Some(Decimal::new(80000, 0)),
            quoted_price: Some(Decimal::new(120000, 0)),
            truck_id: Some(4),
            truck_display: Some("Matrícula: BCDF12 (Disponible)".to_string()),
            created_at: Utc::now(),
            version: 3,
        }
    }

    #[test]
    fn test_client_read_hides_internal_fields() {
        let value = project_order(&view(), Role::Client).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), CLIENT_READ.len());
        assert!(object.contains_key("quoted_price"));
        assert!(!object.contains_key("estimated_cost"));
        assert!(!object.contains_key("truck_id"));
        assert!(!object.contains_key("client_username"));
    }

    #[test]
    fn test_admin_read_sees_everything() {
        let value = project_order(&view(), Role::Admin).unwrap();
        assert_eq!(value.as_object().unwrap().len(), OrderField::ALL.len());
        assert_eq!(value["version"], 3);
    }

    #[test]
    fn test_missing_table_entries_are_forbidden() {
        assert!(order_mask(Operation::Update, Role::Client).is_none());
        assert!(order_mask(Operation::Create, Role::Admin).is_none());
        let err = check_writable(Operation::Update, Role::Client, &json!({})).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_client_cannot_fabricate_status_or_timestamp() {
        let payload = json!({
            "origin_branch_id": 1,
            "destination": "Valdivia",
            "status": "completed",
            "created_at": "2020-01-01T00:00:00Z"
        });
        let err = check_writable(Operation::Create, Role::Client, &payload).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("status"));
                assert!(fields.contains_key("created_at"));
                assert!(!fields.contains_key("destination"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_admin_cannot_reassign_client() {
        let payload = json!({ "status": "quoted", "client_id": 99 });
        assert!(check_writable(Operation::Update, Role::Admin, &payload).is_err());
        assert!(check_writable(Operation::Update, Role::Admin, &json!({ "status": "quoted" })).is_ok());
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::truck::{TruckCapacity, TruckData, TruckRecord, TruckStatus};
use crate::utils::validation::{normalize_plate, validate_plate};

// Request para crear o reemplazar un camión
#[derive(Debug, Deserialize, Validate)]
pub struct TruckRequest {
    #[validate(custom = "validate_plate")]
    pub plate: String,
    pub capacity: TruckCapacity,
    #[serde(default)]
    pub status: TruckStatus,
    pub branch_id: i64,
    pub driver_id: Option<i64>,
}

impl From<TruckRequest> for TruckData {
    fn from(request: TruckRequest) -> Self {
        Self {
            plate: normalize_plate(&request.plate),
            capacity: request.capacity,
            status: request.status,
            branch_id: request.branch_id,
            driver_id: request.driver_id,
        }
    }
}

// Response de camión para administración
#[derive(Debug, Serialize, Deserialize)]
pub struct TruckResponse {
    pub id: i64,
    pub plate: String,
    pub capacity: TruckCapacity,
    pub capacity_display: String,
    pub status: TruckStatus,
    pub status_display: String,
    pub branch_id: i64,
    pub branch_name: String,
    pub driver_id: Option<i64>,
    pub driver_username: Option<String>,
}

impl From<TruckRecord> for TruckResponse {
    fn from(record: TruckRecord) -> Self {
        let truck = record.truck;
        Self {
            id: truck.id,
            capacity_display: truck.capacity.label().to_string(),
            status_display: truck.status.label().to_string(),
            plate: truck.plate,
            capacity: truck.capacity,
            status: truck.status,
            branch_id: truck.branch_id,
            branch_name: record.branch_name,
            driver_id: truck.driver_id,
            driver_username: record.driver_username,
        }
    }
}

// Opción de camión para selectores: "BCDF12 (jperez)"
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TruckOption {
    pub id: i64,
    pub display_name: String,
}

impl From<TruckRecord> for TruckOption {
    fn from(record: TruckRecord) -> Self {
        let driver = record.driver_username.as_deref().unwrap_or("Sin Conductor");
        Self {
            id: record.truck.id,
            display_name: format!("{} ({})", record.truck.plate, driver),
        }
    }
}

// Query del selector de camiones
#[derive(Debug, Default, Deserialize)]
pub struct TruckLookupQuery {
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::truck::Truck;

    fn record(driver: Option<&str>) -> TruckRecord {
        TruckRecord {
            truck: Truck {
                id: 3,
                plate: "BCDF12".to_string(),
                capacity: TruckCapacity::Large,
                status: TruckStatus::Available,
                branch_id: 1,
                driver_id: driver.map(|_| 9),
            },
            branch_name: "Osorno".to_string(),
            driver_username: driver.map(str::to_string),
        }
    }

    #[test]
    fn test_truck_option_display_name() {
        assert_eq!(TruckOption::from(record(Some("jperez"))).display_name, "BCDF12 (jperez)");
        assert_eq!(TruckOption::from(record(None)).display_name, "BCDF12 (Sin Conductor)");
    }

    #[test]
    fn test_truck_request_normalizes_plate() {
        let request = TruckRequest {
            plate: "bc-df 12".to_string(),
            capacity: TruckCapacity::Medium,
            status: TruckStatus::Available,
            branch_id: 1,
            driver_id: None,
        };
        assert!(request.validate().is_ok());
        assert_eq!(TruckData::from(request).plate, "BCDF12");
    }

    #[test]
    fn test_response_carries_labels() {
        let response = TruckResponse::from(record(None));
        assert_eq!(response.capacity_display, "Gran Capacidad");
        assert_eq!(response.status_display, "Disponible");
    }
}

//! Modelo de Truck
//!
//! Camión de la flota: matrícula única, clase de capacidad, estado,
//! sucursal base y conductor asignado opcional.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Clase de capacidad - mapea al ENUM truck_capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type)]
#[sqlx(type_name = "truck_capacity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TruckCapacity {
    Medium,
    Large,
}

impl TruckCapacity {
    pub fn label(&self) -> &'static str {
        match self {
            TruckCapacity::Medium => "Mediana Capacidad",
            TruckCapacity::Large => "Gran Capacidad",
        }
    }
}

/// Estado del camión - mapea al ENUM truck_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "truck_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TruckStatus {
    #[default]
    Available,
    EnRoute,
    Maintenance,
    Repair,
}

impl TruckStatus {
    pub const ALL: [TruckStatus; 4] = [
        TruckStatus::Available,
        TruckStatus::EnRoute,
        TruckStatus::Maintenance,
        TruckStatus::Repair,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TruckStatus::Available => "Disponible",
            TruckStatus::EnRoute => "En Ruta",
            TruckStatus::Maintenance => "En Mantención",
            TruckStatus::Repair => "En Reparación",
        }
    }

    /// Un camión en taller no puede tomar pedidos
    pub fn is_out_of_service(&self) -> bool {
        matches!(self, TruckStatus::Maintenance | TruckStatus::Repair)
    }
}

/// Camión - mapea exactamente a la tabla trucks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Truck {
    pub id: i64,
    pub plate: String,
    pub capacity: TruckCapacity,
    pub status: TruckStatus,
    pub branch_id: i64,
    pub driver_id: Option<i64>,
}

impl Truck {
    /// "Matrícula: BCDF12 (Disponible)"
    pub fn display(plate: &str, status: TruckStatus) -> String {
        format!("Matrícula: {} ({})", plate, status.label())
    }
}

/// Camión con nombre de sucursal y usuario del conductor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TruckRecord {
    #[sqlx(flatten)]
    pub truck: Truck,
    pub branch_name: String,
    pub driver_username: Option<String>,
}

/// Valores del camión para insertar o reemplazar
#[derive(Debug, Clone)]
pub struct TruckData {
    pub plate: String,
    pub capacity: TruckCapacity,
    pub status: TruckStatus,
    pub branch_id: i64,
    pub driver_id: Option<i64>,
}

/// Filtros para listar camiones
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruckFilter {
    pub branch_id: Option<i64>,
    pub status: Option<TruckStatus>,
}

impl TruckFilter {
    pub fn matches(&self, truck: &Truck) -> bool {
        self.branch_id.map_or(true, |id| truck.branch_id == id)
            && self.status.map_or(true, |status| truck.status == status)
    }
}

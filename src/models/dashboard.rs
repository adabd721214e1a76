//! Modelos del dashboard por sucursal

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{employee::EmployeeStatus, order::OrderStatus, truck::TruckStatus};

/// Conteos agrupados por estado, tal como salen de la base de datos.
/// Los estados sin filas simplemente no aparecen.
#[derive(Debug, Clone, Default)]
pub struct DashboardCounts {
    pub orders: Vec<(OrderStatus, i64)>,
    pub trucks: Vec<(TruckStatus, i64)>,
    pub drivers: Vec<(EmployeeStatus, i64)>,
}

/// Indicadores principales
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardKpis {
    pub available_trucks: i64,
    pub available_drivers: i64,
    pub en_route_orders: i64,
    pub requested_orders: i64,
    pub total_trucks: i64,
    pub total_drivers: i64,
}

/// Punto de un gráfico: estado, etiqueta y valor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry<S> {
    pub status: S,
    pub name: &'static str,
    pub value: i64,
}

/// Vista completa del dashboard de una sucursal
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub branch_id: i64,
    pub branch_name: String,
    pub orders_by_status: BTreeMap<OrderStatus, i64>,
    pub trucks_by_status: BTreeMap<TruckStatus, i64>,
    pub drivers_by_status: BTreeMap<EmployeeStatus, i64>,
    pub kpis: DashboardKpis,
    pub order_chart: Vec<ChartEntry<OrderStatus>>,
    pub fleet_chart: Vec<ChartEntry<TruckStatus>>,
}

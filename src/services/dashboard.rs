//! Agregación del dashboard por sucursal
//!
//! Construye el `DashboardSnapshot` a partir de los conteos agrupados que
//! entrega el repositorio. Todos los estados aparecen en los mapas, con
//! cero cuando no hay filas.

use std::collections::BTreeMap;

use crate::models::branch::Branch;
use crate::models::dashboard::{ChartEntry, DashboardCounts, DashboardKpis, DashboardSnapshot};
use crate::models::employee::EmployeeStatus;
use crate::models::order::OrderStatus;
use crate::models::truck::TruckStatus;

fn zero_filled<S: Ord + Copy>(all: &[S], counts: &[(S, i64)]) -> BTreeMap<S, i64> {
    let mut map: BTreeMap<S, i64> = all.iter().map(|status| (*status, 0)).collect();
    for (status, count) in counts {
        *map.entry(*status).or_insert(0) += count;
    }
    map
}

pub fn build_snapshot(branch: &Branch, counts: &DashboardCounts) -> DashboardSnapshot {
    let orders_by_status = zero_filled(&OrderStatus::ALL, &counts.orders);
    let trucks_by_status = zero_filled(&TruckStatus::ALL, &counts.trucks);
    let drivers_by_status = zero_filled(&EmployeeStatus::ALL, &counts.drivers);

    let kpis = DashboardKpis {
        available_trucks: trucks_by_status[&TruckStatus::Available],
        available_drivers: drivers_by_status[&EmployeeStatus::Available],
        en_route_orders: orders_by_status[&OrderStatus::EnRoute],
        requested_orders: orders_by_status[&OrderStatus::Requested],
        total_trucks: trucks_by_status.values().sum(),
        total_drivers: drivers_by_status.values().sum(),
    };

    let order_chart = orders_by_status
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(status, count)| ChartEntry {
            status: *status,
            name: status.label(),
            value: *count,
        })
        .collect();

    let fleet_chart = trucks_by_status
        .iter()
        .map(|(status, count)| ChartEntry {
            status: *status,
            name: status.label(),
            value: *count,
        })
        .collect();

    DashboardSnapshot {
        branch_id: branch.id,
        branch_name: branch.name.clone(),
        orders_by_status,
        trucks_by_status,
        drivers_by_status,
        kpis,
        order_chart,
        fleet_chart,
    }
}

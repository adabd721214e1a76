//! Reglas de transición de pedidos y sus efectos sobre la flota
//!
//! Este módulo es puro: a partir del pedido actual, los valores pedidos por
//! el administrador y los camiones involucrados calcula qué cambios de
//! estado de camiones y conductores hay que aplicar. El repositorio de
//! pedidos los ejecuta en la misma transacción que la actualización.

use crate::config::environment::EnvironmentConfig;
use crate::models::order::{Order, OrderUpdate};
use crate::models::truck::Truck;
use crate::utils::errors::{validation_error, AppResult};

/// Cambio de estado de un camión y su conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetEffect {
    /// Camión y conductor pasan a `en_route`
    Dispatch { truck_id: i64, driver_id: Option<i64> },
    /// Camión y conductor vuelven a `available`, solo si están en ruta
    Release { truck_id: i64, driver_id: Option<i64> },
}

/// Opciones de negocio que afectan las transiciones
#[derive(Debug, Clone, Copy)]
pub struct LifecyclePolicy {
    pub release_fleet_on_close: bool,
    pub allow_cross_branch_assignment: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            release_fleet_on_close: true,
            allow_cross_branch_assignment: false,
        }
    }
}

impl From<&EnvironmentConfig> for LifecyclePolicy {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            release_fleet_on_close: config.release_fleet_on_close,
            allow_cross_branch_assignment: config.allow_cross_branch_assignment,
        }
    }
}

/// Validar una actualización administrativa y calcular sus efectos.
///
/// `current_truck` es el camión asignado hoy (si hay) y `target_truck` el
/// camión que quedará asignado; el llamador los resuelve y responde
/// not-found si `target.truck_id` no existe.
pub fn plan_update(
    order: &Order,
    target: &OrderUpdate,
    current_truck: Option<&Truck>,
    target_truck: Option<&Truck>,
    policy: &LifecyclePolicy,
) -> AppResult<Vec<FleetEffect>> {
    if !order.status.can_transition_to(target.status) {
        return Err(validation_error(
            "status",
            format!(
                "Transición no permitida: {} -> {}",
                order.status.label(),
                target.status.label()
            ),
        ));
    }

    let truck_changed = target.truck_id != order.truck_id;
    let was_dispatched = order.status.is_dispatching() && order.truck_id.is_some();
    let dispatching = target.status.is_dispatching();

    if let Some(truck) = target_truck {
        if truck_changed || (dispatching && !was_dispatched) {
            check_eligible(order, truck, policy)?;
        }
    }

    let mut effects = Vec::new();

    if was_dispatched && policy.release_fleet_on_close && (truck_changed || target.status.is_terminal()) {
        if let Some(truck_id) = order.truck_id {
            effects.push(FleetEffect::Release {
                truck_id,
                driver_id: current_truck.and_then(|t| t.driver_id),
            });
        }
    }

    if dispatching && (!was_dispatched || truck_changed) {
        if let Some(truck) = target_truck {
            effects.push(FleetEffect::Dispatch {
                truck_id: truck.id,
                driver_id: truck.driver_id,
            });
        }
    }

    Ok(effects)
}

fn check_eligible(order: &Order, truck: &Truck, policy: &LifecyclePolicy) -> AppResult<()> {
    if truck.status.is_out_of_service() {
        return Err(validation_error(
            "truck_id",
            format!("El camión {} está {}", truck.plate, truck.status.label()),
        ));
    }
    if !policy.allow_cross_branch_assignment && truck.branch_id != order.origin_branch_id {
        return Err(validation_error(
            "truck_id",
            "El camión debe pertenecer a la sucursal de origen del pedido",
        ));
    }
    Ok(())
}

//! Service order status rules
//!
//! Transitions are permissive: any status may move to any other status,
//! except that terminal statuses are final and delivery requires finished work.

use crate::contract::{OrderStatus, ServiceDeskError};

/// Statuses from which an order may be handed back to the client
const DELIVERABLE_FROM: [OrderStatus; 2] = [OrderStatus::Completed, OrderStatus::Ready];

/// Check whether `from -> to` is an accepted transition
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), ServiceDeskError> {
    if from == to {
        return Err(ServiceDeskError::validation(format!(
            "order is already {}",
            to
        )));
    }

    if from.is_terminal() {
        return Err(invalid(from, to));
    }

    if to == OrderStatus::Delivered && !DELIVERABLE_FROM.contains(&from) {
        return Err(invalid(from, to));
    }

    Ok(())
}

/// Orders in these statuses no longer accept new parts or cost changes
pub fn is_locked_for_billing(status: OrderStatus) -> bool {
    status.is_terminal()
}

fn invalid(from: OrderStatus, to: OrderStatus) -> ServiceDeskError {
    ServiceDeskError::InvalidTransition {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    }
}

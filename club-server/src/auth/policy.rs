//! Access policy gate
//!
//! Table-driven mapping from operation to the role allowed to perform it,
//! consulted by every mutating handler before the store is touched. A
//! denial is `Forbidden`, which callers keep distinct from
//! NotFound/InvalidState: "you may never do this" versus "this target is
//! in the wrong state".

use shared::models::UserRole;

use crate::auth::CurrentUser;
use crate::utils::AppError;

/// Every gated operation the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Client-side
    ListAvailableOrMine,
    RentStation,
    CreateOrder,
    ListOwnOrders,

    // Staff-side
    CreateStation,
    UpdateStationConfig,
    RetireStation,
    ListPendingOrders,
    UpdateOrderStatus,
    ManageMenu,
    ManageStaff,
}

/// Operation → role required to perform it
const POLICY: &[(Operation, UserRole)] = &[
    (Operation::ListAvailableOrMine, UserRole::Client),
    (Operation::RentStation, UserRole::Client),
    (Operation::CreateOrder, UserRole::Client),
    (Operation::ListOwnOrders, UserRole::Client),
    (Operation::CreateStation, UserRole::Staff),
    (Operation::UpdateStationConfig, UserRole::Staff),
    (Operation::RetireStation, UserRole::Staff),
    (Operation::ListPendingOrders, UserRole::Staff),
    (Operation::UpdateOrderStatus, UserRole::Staff),
    (Operation::ManageMenu, UserRole::Staff),
    (Operation::ManageStaff, UserRole::Staff),
];

/// Whether `role` may perform `operation`
pub fn allow(role: UserRole, operation: Operation) -> bool {
    POLICY
        .iter()
        .any(|(op, required)| *op == operation && *required == role)
}

/// Gate an operation, turning a policy miss into `Forbidden`
pub fn require(user: &CurrentUser, operation: Operation) -> Result<(), AppError> {
    if allow(user.role, operation) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = user.id,
            login = %user.login,
            role = user.role.as_str(),
            operation = ?operation,
            "Operation denied by policy"
        );
        Err(AppError::forbidden(format!(
            "Operation not permitted for role '{}'",
            user.role.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: 1,
            login: "test".to_string(),
            role,
        }
    }

    #[test]
    fn clients_manage_their_own_side_only() {
        for op in [
            Operation::ListAvailableOrMine,
            Operation::RentStation,
            Operation::CreateOrder,
            Operation::ListOwnOrders,
        ] {
            assert!(allow(UserRole::Client, op), "client should be allowed {op:?}");
            assert!(!allow(UserRole::Staff, op), "staff should be denied {op:?}");
        }
    }

    #[test]
    fn staff_operations_are_denied_to_clients() {
        for op in [
            Operation::CreateStation,
            Operation::UpdateStationConfig,
            Operation::RetireStation,
            Operation::ListPendingOrders,
            Operation::UpdateOrderStatus,
            Operation::ManageMenu,
            Operation::ManageStaff,
        ] {
            assert!(allow(UserRole::Staff, op), "staff should be allowed {op:?}");
            assert!(!allow(UserRole::Client, op), "client should be denied {op:?}");
        }
    }

    #[test]
    fn denial_is_forbidden_not_another_error() {
        let err = require(&user(UserRole::Client), Operation::CreateStation).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}

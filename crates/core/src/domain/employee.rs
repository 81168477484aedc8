use serde::{Deserialize, Serialize};

use crate::ids::EmployeeId;

/// Fields supplied by the caller when registering an employee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    /// Empty or absent means the employee reports to nobody.
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: EmployeeId,
    pub name: String,
    pub email: String,
    pub manager_id: Option<EmployeeId>,
}

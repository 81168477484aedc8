use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::employee::{Employee, EmployeeCreate};
use crate::errors::{require_non_empty, DomainError, RecordKind};
use crate::ids::{EmployeeId, IdAllocator};
use crate::store::Store;

#[derive(Debug, Default)]
struct DirectoryState {
    records: Vec<Employee>,
    index: HashMap<EmployeeId, usize>,
}

/// Authoritative set of employee records, kept in insertion order.
#[derive(Debug)]
pub struct EmployeeDirectory {
    ids: Arc<IdAllocator>,
    state: Store<DirectoryState>,
}

impl EmployeeDirectory {
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self { ids, state: Store::default() }
    }

    /// Registers a new employee and returns the stored record.
    ///
    /// Names are not unique. A non-empty `manager_id` must name an employee
    /// that is already in the directory.
    pub fn add(&self, request: EmployeeCreate) -> Result<Employee, DomainError> {
        let name = require_non_empty("name", &request.name)?;
        let email = require_non_empty("email", &request.email)?;
        let manager_id = request
            .manager_id
            .map(|id| EmployeeId(id.0.trim().to_string()))
            .filter(|id| !id.0.is_empty());

        let mut state = self.state.write();
        if let Some(manager_id) = &manager_id {
            if !state.index.contains_key(manager_id) {
                return Err(DomainError::UnknownManager(manager_id.0.clone()));
            }
        }

        let employee = Employee { emp_id: self.ids.next_employee_id(), name, email, manager_id };
        let position = state.records.len();
        state.index.insert(employee.emp_id.clone(), position);
        state.records.push(employee.clone());
        drop(state);

        info!(
            event_name = "hr.employee.added",
            emp_id = %employee.emp_id,
            manager_id = employee.manager_id.as_ref().map_or("", |id| id.as_str()),
            "employee added to directory"
        );
        Ok(employee)
    }

    pub fn get_by_id(&self, emp_id: &EmployeeId) -> Result<Employee, DomainError> {
        let state = self.state.read();
        state
            .index
            .get(emp_id)
            .and_then(|position| state.records.get(*position))
            .cloned()
            .ok_or_else(|| DomainError::not_found(RecordKind::Employee, emp_id.as_str()))
    }

    pub fn contains(&self, emp_id: &EmployeeId) -> bool {
        self.state.read().index.contains_key(emp_id)
    }

    /// Case-insensitive substring match on name, in insertion order.
    ///
    /// An empty result is not an error here; callers decide what a miss means.
    pub fn search_by_name(&self, query: &str) -> Vec<EmployeeId> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.state
            .read()
            .records
            .iter()
            .filter(|employee| employee.name.to_lowercase().contains(&needle))
            .map(|employee| employee.emp_id.clone())
            .collect()
    }

    pub fn list(&self) -> Vec<Employee> {
        self.state.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::employee::EmployeeCreate;
    use crate::errors::{DomainError, RecordKind};
    use crate::ids::{EmployeeId, IdAllocator};

    use super::EmployeeDirectory;

    fn directory() -> EmployeeDirectory {
        EmployeeDirectory::new(Arc::new(IdAllocator::new()))
    }

    fn create(name: &str, manager_id: Option<&str>) -> EmployeeCreate {
        EmployeeCreate {
            name: name.to_string(),
            email: format!("{}@atliq.com", name.to_lowercase().replace(' ', ".")),
            manager_id: manager_id.map(EmployeeId::new),
        }
    }

    #[test]
    fn add_issues_increasing_ids_and_stores_record() {
        let directory = directory();
        let first = directory.add(create("Asha Rao", None)).expect("first add");
        let second = directory.add(create("Ben Okafor", Some(first.emp_id.as_str()))).expect("second add");

        assert!(first.emp_id < second.emp_id);
        assert_eq!(second.manager_id, Some(first.emp_id.clone()));
        assert_eq!(directory.get_by_id(&second.emp_id), Ok(second));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn add_rejects_blank_name_and_email() {
        let directory = directory();
        let mut request = create("Asha Rao", None);
        request.name = "  ".to_string();
        assert!(matches!(directory.add(request), Err(DomainError::InvalidArgument(_))));

        let mut request = create("Asha Rao", None);
        request.email = String::new();
        assert!(matches!(directory.add(request), Err(DomainError::InvalidArgument(_))));
        assert!(directory.is_empty());
    }

    #[test]
    fn add_rejects_unknown_manager_without_consuming_state() {
        let directory = directory();
        let error = directory.add(create("Asha Rao", Some("E999"))).expect_err("unknown manager");
        assert_eq!(error, DomainError::UnknownManager("E999".to_string()));
        assert!(directory.is_empty());
    }

    #[test]
    fn blank_manager_id_means_no_manager() {
        let directory = directory();
        let employee = directory.add(create("Asha Rao", Some("  "))).expect("blank manager");
        assert_eq!(employee.manager_id, None);
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let directory = directory();
        let first = directory.add(create("Sam Lee", None)).expect("first");
        let second = directory.add(create("Sam Lee", None)).expect("second");
        assert_ne!(first.emp_id, second.emp_id);
        assert_eq!(directory.search_by_name("sam lee"), vec![first.emp_id, second.emp_id]);
    }

    #[test]
    fn search_is_case_insensitive_substring_in_insertion_order() {
        let directory = directory();
        let asha = directory.add(create("Asha Rao", None)).expect("asha");
        directory.add(create("Ben Okafor", None)).expect("ben");
        let rashid = directory.add(create("Rashid Khan", None)).expect("rashid");

        assert_eq!(directory.search_by_name("RA"), vec![asha.emp_id, rashid.emp_id]);
        assert!(directory.search_by_name("zed").is_empty());
        assert!(directory.search_by_name("   ").is_empty());
    }

    #[test]
    fn get_by_id_reports_missing_employee() {
        let directory = directory();
        assert_eq!(
            directory.get_by_id(&EmployeeId::new("E001")),
            Err(DomainError::not_found(RecordKind::Employee, "E001"))
        );
    }
}

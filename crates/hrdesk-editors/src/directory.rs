//! Local employee directory mirrored in the [`LocalStore`]

use hrdesk_client::HrClient;
use hrdesk_persistence::LocalStore;
use hrdesk_types::{DirectoryEntry, Employee};
use tracing::info;

use crate::error::EditorError;
use crate::validation::validate_directory_entry;

/// Directory row for `employee`; `None` when the record has no id
pub fn entry_from_employee(employee: &Employee) -> Option<DirectoryEntry> {
    let id = employee.emp_id?;
    let department = employee
        .departmentname
        .clone()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| employee.department.map(|d| d.to_string()))
        .unwrap_or_default();
    Some(DirectoryEntry {
        id: id.to_string(),
        full_name: employee.display_name(),
        title: employee.title.clone().unwrap_or_default(),
        department,
        email: employee.email.clone().unwrap_or_default(),
        photo: employee.photo.clone().unwrap_or_default(),
    })
}

/// Entries containing every whitespace-separated term of `query`
///
/// Terms are matched case-insensitively against
/// `fullName title department email` joined by spaces.
pub fn filter_entries<'a>(entries: &'a [DirectoryEntry], query: &str) -> Vec<&'a DirectoryEntry> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    entries
        .iter()
        .filter(|entry| {
            let haystack = format!(
                "{} {} {} {}",
                entry.full_name, entry.title, entry.department, entry.email
            )
            .to_lowercase();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .collect()
}

pub struct EmployeeDirectory {
    store: LocalStore,
}

impl EmployeeDirectory {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &str) -> Result<Vec<DirectoryEntry>, EditorError> {
        let entries = self.store.load_directory().await?;
        Ok(filter_entries(&entries, query).into_iter().cloned().collect())
    }

    pub async fn upsert(&self, entry: DirectoryEntry) -> Result<(), EditorError> {
        validate_directory_entry(&entry)?;
        self.store.upsert_entry(entry).await?;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), EditorError> {
        if self.store.remove_entry(id).await? {
            Ok(())
        } else {
            Err(EditorError::NotFound(format!("Employee {id}")))
        }
    }

    /// Replace the mirror with the server's employee list
    pub async fn sync(&self, client: &HrClient) -> Result<usize, EditorError> {
        let entries: Vec<DirectoryEntry> = client
            .list_employees()
            .await?
            .iter()
            .filter_map(entry_from_employee)
            .collect();
        self.store.save_directory(&entries).await?;
        info!(count = entries.len(), "Employee directory synced");
        Ok(entries.len())
    }
}

//! View/edit form binder for a single employee record
//!
//! A form opened with an employee id starts read-only ([`EditorMode::View`]);
//! [`EmployeeEditor::begin_edit`] is the only way to unlock it. Without an id the
//! form is a blank create form. Nothing is saved until [`EmployeeEditor::submit`],
//! and [`EmployeeEditor::discard`] throws pending edits away.

use hrdesk_client::HrClient;
use hrdesk_types::{Department, Employee, EmployeeDraft, EmployeeId};
use tracing::{info, warn};

use crate::error::EditorError;
use crate::validation::validate_employee;

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No id yet; fields are editable
    Create,
    /// Existing record, fields disabled
    View,
    /// Existing record, fields enabled
    Edit,
}

/// Shown when `/departments` fails or returns nothing
pub fn fallback_departments() -> Vec<Department> {
    vec![
        Department::new(1, "Engineering"),
        Department::new(2, "Finance"),
        Department::new(3, "Operations"),
    ]
}

/// Fetch the department options, falling back to the built-in list
pub async fn load_departments(client: &HrClient) -> Vec<Department> {
    match client.departments().await {
        Ok(departments) if !departments.is_empty() => departments,
        Ok(_) => {
            warn!("Department list is empty, using built-in departments");
            fallback_departments()
        }
        Err(e) => {
            warn!("Failed to load departments, using built-in departments: {}", e);
            fallback_departments()
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeEditor {
    employee_id: Option<EmployeeId>,
    form: EmployeeDraft,
    saved: EmployeeDraft,
    departments: Vec<Department>,
    disabled: bool,
}

impl EmployeeEditor {
    /// Blank create form
    pub fn create(departments: Vec<Department>) -> Self {
        Self {
            employee_id: None,
            form: EmployeeDraft::default(),
            saved: EmployeeDraft::default(),
            departments,
            disabled: false,
        }
    }

    /// Read-only form over an existing record
    pub fn for_employee(id: EmployeeId, employee: &Employee, departments: Vec<Department>) -> Self {
        let draft = EmployeeDraft::from_employee(employee);
        Self {
            employee_id: Some(id),
            form: draft.clone(),
            saved: draft,
            departments,
            disabled: true,
        }
    }

    /// Open the form for `id`, or a create form when `id` is `None`
    pub async fn open(client: &HrClient, id: Option<EmployeeId>) -> Result<Self, EditorError> {
        let departments = load_departments(client).await;
        match id {
            None => Ok(Self::create(departments)),
            Some(id) => {
                let employee = client.get_employee(id).await?;
                Ok(Self::for_employee(id, &employee, departments))
            }
        }
    }

    pub fn mode(&self) -> EditorMode {
        match (self.employee_id, self.disabled) {
            (None, _) => EditorMode::Create,
            (Some(_), true) => EditorMode::View,
            (Some(_), false) => EditorMode::Edit,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn form(&self) -> &EmployeeDraft {
        &self.form
    }

    /// Mutable access to the fields; `None` while the form is disabled
    pub fn form_mut(&mut self) -> Option<&mut EmployeeDraft> {
        if self.disabled {
            None
        } else {
            Some(&mut self.form)
        }
    }

    /// Unlock the fields. Only valid from view mode.
    pub fn begin_edit(&mut self) -> bool {
        if self.mode() != EditorMode::View {
            return false;
        }
        self.disabled = false;
        true
    }

    /// Drop unsaved edits and return to the last saved state
    pub fn discard(&mut self) {
        self.form = self.saved.clone();
        self.disabled = self.employee_id.is_some();
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        validate_employee(&self.form)?;
        Ok(())
    }

    /// Validate and write the record, returning its id
    ///
    /// Existing records are PUT, new ones POSTed. On success the form goes back
    /// to view mode for the saved record.
    pub async fn submit(&mut self, client: &HrClient) -> Result<EmployeeId, EditorError> {
        if self.disabled {
            return Err(EditorError::ReadOnly);
        }
        self.validate()?;

        let draft = self.form.trimmed();
        let id = match self.employee_id {
            Some(id) => client.update_employee(id, &draft).await?,
            None => client.create_employee(&draft).await?,
        };
        info!(employee_id = id, "Employee record saved");

        self.employee_id = Some(id);
        self.form = draft.clone();
        self.saved = draft;
        self.disabled = true;
        Ok(id)
    }
}

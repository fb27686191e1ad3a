use serde::{Deserialize, Serialize};

/// Employee ID type
pub type EmployeeId = i64;

/// Employee as returned by `GET /employees/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "empID", alias = "id", default)]
    pub emp_id: Option<EmployeeId>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(rename = "fullName", alias = "fullname", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Department identifier as stored on the employee row
    #[serde(default, deserialize_with = "lenient_id")]
    pub department: Option<i64>,
    #[serde(default)]
    pub departmentname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Photo as a data URL
    #[serde(default)]
    pub photo: Option<String>,
}

impl Employee {
    /// Name to show in headers, trying the full name, then first + last
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full.trim().to_string();
        }
        let joined = format!(
            "{} {}",
            self.firstname.as_deref().unwrap_or(""),
            self.lastname.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if joined.is_empty() {
            "Unknown".to_string()
        } else {
            joined.to_string()
        }
    }
}

/// Body for `POST /employees` and `PUT /employees/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub firstname: String,
    pub lastname: String,
    pub title: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub photo: String,
}

impl EmployeeDraft {
    /// Prefill a form from a loaded employee
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            firstname: employee.firstname.clone().unwrap_or_default(),
            lastname: employee.lastname.clone().unwrap_or_default(),
            title: employee.title.clone().unwrap_or_default(),
            department: employee.department.map(|d| d.to_string()).unwrap_or_default(),
            email: employee.email.clone().unwrap_or_default(),
            phone: employee.phone.clone().unwrap_or_default(),
            photo: employee.photo.clone().unwrap_or_default(),
        }
    }

    /// Copy with every free-text field trimmed, as submitted
    pub fn trimmed(&self) -> Self {
        Self {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            title: self.title.trim().to_string(),
            department: self.department.clone(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            photo: self.photo.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "depID")]
    pub dep_id: i64,
    pub departmentname: String,
}

impl Department {
    pub fn new(dep_id: i64, name: impl Into<String>) -> Self {
        Self {
            dep_id,
            departmentname: name.into(),
        }
    }
}

/// Row of the locally mirrored employee directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: String,
}

/// Avatar initials: first letter of up to two words, upper-cased
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.to_uppercase()
    }
}

/// Accepts ids sent either as numbers or numeric strings (`""` reads as none)
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

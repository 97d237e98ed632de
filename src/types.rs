/// Shared closed enums used across the codebase
///
/// Roles and departments arrive as free-form strings at exactly one place
/// (login / employee creation) and are normalized there. Everything past that
/// boundary works with these types, never with raw strings.
use serde::{Deserialize, Serialize};

/// Employee role. Gates every route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Planner,
    Supervisor,
    Technician,
}

impl Role {
    /// Normalize a raw role string. Accepts the legacy "technicien" spelling
    /// and any casing; this is the only place that mapping happens.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "planner" => Some(Role::Planner),
            "supervisor" => Some(Role::Supervisor),
            "technician" | "technicien" => Some(Role::Technician),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Planner => "planner",
            Role::Supervisor => "supervisor",
            Role::Technician => "technician",
        }
    }

    /// Supervisors and technicians work inside a department; admins and
    /// planners sit above them.
    pub fn requires_department(&self) -> bool {
        matches!(self, Role::Supervisor | Role::Technician)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organizational unit shared by employees and process stages. Access control
/// is scoped by equality on this value, so both sides reference one enum
/// rather than two string columns that happen to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "department", rename_all = "lowercase")]
pub enum Department {
    Management,
    Production,
    Testing,
    Qa,
}

impl Department {
    pub fn parse(raw: &str) -> Option<Department> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "management" => Some(Department::Management),
            "production" => Some(Department::Production),
            "testing" => Some(Department::Testing),
            "qa" => Some(Department::Qa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Management => "management",
            Department::Production => "production",
            Department::Testing => "testing",
            Department::Qa => "qa",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a time entry records. Only `work` goes through supervisor review;
/// the rest are auto-approved on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "activity_type", rename_all = "lowercase")]
pub enum ActivityType {
    Work,
    Break,
    Leave,
    Waiting,
    Other,
}

impl ActivityType {
    pub fn parse(raw: &str) -> Option<ActivityType> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "work" => Some(ActivityType::Work),
            "break" => Some(ActivityType::Break),
            "leave" => Some(ActivityType::Leave),
            "waiting" => Some(ActivityType::Waiting),
            "other" => Some(ActivityType::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Work => "work",
            ActivityType::Break => "break",
            ActivityType::Leave => "leave",
            ActivityType::Waiting => "waiting",
            ActivityType::Other => "other",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a time entry. Work entries start `pending`; non-work
/// entries start `approved`. Neither `approved` nor `rejected` is terminal -
/// a supervisor may correct a prior decision at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_status", rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn parse(raw: &str) -> Option<EntryStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(EntryStatus::Pending),
            "approved" => Some(EntryStatus::Approved),
            "rejected" => Some(EntryStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Approved => "approved",
            EntryStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl NotificationStatus {
    pub fn parse(raw: &str) -> Option<NotificationStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unread" => Some(NotificationStatus::Unread),
            "read" => Some(NotificationStatus::Read),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_normalizes_legacy_spellings() {
        assert_eq!(Role::parse("technicien"), Some(Role::Technician));
        assert_eq!(Role::parse("Technician"), Some(Role::Technician));
        assert_eq!(Role::parse(" ADMIN "), Some(Role::Admin));
        assert_eq!(Role::parse("operator"), None);
    }

    #[test]
    fn department_parse_is_case_insensitive() {
        assert_eq!(Department::parse("Production"), Some(Department::Production));
        assert_eq!(Department::parse("QA"), Some(Department::Qa));
        assert_eq!(Department::parse("warehouse"), None);
    }

    #[test]
    fn role_department_requirement() {
        assert!(Role::Technician.requires_department());
        assert!(Role::Supervisor.requires_department());
        assert!(!Role::Planner.requires_department());
        assert!(!Role::Admin.requires_department());
    }

    #[test]
    fn activity_type_rejects_unknown() {
        assert_eq!(ActivityType::parse("work"), Some(ActivityType::Work));
        assert_eq!(ActivityType::parse("lunch"), None);
    }
}

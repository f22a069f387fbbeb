//! Credential lookup and login.
//!
//! The credential table is a read-only collaborator behind
//! `CredentialStore`, so it can be swapped without touching the
//! attendance and homework logic.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
}

/// `role -> email -> credential`
pub type CredentialTable = BTreeMap<Role, BTreeMap<String, Credential>>;

pub trait CredentialStore {
    fn lookup(&self, role: Role, email: &str) -> Option<Credential>;
}

#[derive(Debug, Clone)]
pub struct StaticCredentials {
    table: CredentialTable,
}

impl StaticCredentials {
    pub fn from_table(table: CredentialTable) -> Self {
        Self { table }
    }

    /// The demo accounts shipped with the application.
    pub fn builtin() -> Self {
        let students = [
            ("aravind@example.com", "Aravind"),
            ("aswin@example.com", "Aswin"),
            ("bhavana@example.com", "Bhavana"),
            ("gokul@example.com", "Gokul"),
            ("hariharan@example.com", "Hariharan"),
            ("meenatchi@example.com", "Meenatchi"),
            ("sivabharathi@example.com", "Siva Bharathi"),
            ("visal@example.com", "Visal Stephenraj"),
        ];

        let mut table = CredentialTable::new();
        table.insert(
            Role::Student,
            students
                .iter()
                .map(|(email, name)| {
                    (
                        email.to_string(),
                        Credential {
                            password: "student123".into(),
                            student_name: Some(name.to_string()),
                        },
                    )
                })
                .collect(),
        );
        table.insert(
            Role::Teacher,
            BTreeMap::from([(
                "teacher@example.com".to_string(),
                Credential {
                    password: "teacher123".into(),
                    student_name: None,
                },
            )]),
        );
        table.insert(
            Role::Admin,
            BTreeMap::from([(
                "admin@example.com".to_string(),
                Credential {
                    password: "admin123".into(),
                    student_name: None,
                },
            )]),
        );

        Self { table }
    }
}

impl CredentialStore for StaticCredentials {
    fn lookup(&self, role: Role, email: &str) -> Option<Credential> {
        self.table.get(&role)?.get(email).cloned()
    }
}

/// The authenticated caller, handed explicitly to every gated handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
}

impl Session {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

pub fn authenticate(
    store: &dyn CredentialStore,
    role: Role,
    email: &str,
    password: &str,
) -> AppResult<Session> {
    let cred = store
        .lookup(role, email.trim())
        .ok_or(AppError::InvalidCredentials)?;

    if cred.password != password {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Session {
        user: email.trim().to_string(),
        role,
        student_name: if role == Role::Student {
            cred.student_name
        } else {
            None
        },
    })
}

/// Parse the role name, then authenticate.
pub fn login(
    store: &dyn CredentialStore,
    role: &str,
    email: &str,
    password: &str,
) -> AppResult<Session> {
    let role = Role::from_name(role).ok_or_else(|| AppError::InvalidRole(role.to_string()))?;
    authenticate(store, role, email, password)
}

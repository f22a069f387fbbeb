use crate::core::courses::CourseCatalog;
use crate::db::log::audit;
use crate::db::students::{delete_student, find_student_by_name, insert_student};
use crate::errors::AppResult;
use crate::models::student::Student;
use rusqlite::Connection;

/// Roster and course management (admin only).
pub struct StudentLogic;

impl StudentLogic {
    /// Add a student. Blank or already-present names are skipped (`None`).
    pub fn add(conn: &Connection, name: &str) -> AppResult<Option<Student>> {
        let name = name.trim();
        if name.is_empty() || find_student_by_name(conn, name)?.is_some() {
            return Ok(None);
        }

        let s = insert_student(conn, name)?;
        audit(conn, "add_student", name, &format!("Student #{} added", s.id));
        Ok(Some(s))
    }

    /// Remove a student together with its attendance rows.
    /// Returns the number of attendance rows deleted, `None` if unknown.
    pub fn remove(conn: &Connection, name: &str) -> AppResult<Option<usize>> {
        let Some(s) = find_student_by_name(conn, name.trim())? else {
            return Ok(None);
        };

        let removed = delete_student(conn, s.id)?;
        audit(
            conn,
            "del_student",
            &s.name,
            &format!("Student #{} removed with {} attendance rows", s.id, removed),
        );
        Ok(Some(removed))
    }

    /// Append a course to the runtime catalog (not persisted).
    pub fn add_course(conn: &Connection, catalog: &CourseCatalog, name: &str) -> Option<String> {
        let added = catalog.add(name)?;
        audit(conn, "add_course", &added, "Course added for this process");
        Some(added)
    }
}

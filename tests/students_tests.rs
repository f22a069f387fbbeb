use attendtrack::app::request::StudentAction;
use attendtrack::app::views::View;
use attendtrack::app::{FlashLevel, Outcome, Request};
use attendtrack::core::attendance::{AttendanceLogic, MarkEntry};
use attendtrack::core::courses::CourseCatalog;
use attendtrack::core::students::StudentLogic;
use attendtrack::db::attendance::count_attendance_for_student;
use attendtrack::db::initialize::init_db;
use attendtrack::db::students::{find_student_by_name, insert_student, list_students};
use attendtrack::errors::AppError;
use attendtrack::models::status::Status;
use chrono::NaiveDate;
use std::collections::HashMap;

mod common;
use common::{admin, call, open_state, page};

#[test]
fn test_remove_student_removes_attendance() {
    let state = open_state("students_remove");
    let conn = state.conn();
    let aswin = find_student_by_name(conn, "Aswin").unwrap().unwrap();

    let marks = HashMap::from([(
        "Aswin".to_string(),
        MarkEntry {
            status: Status::Present,
            info: "ok".into(),
        },
    )]);
    for day in ["2025-03-01", "2025-03-02", "2025-03-03"] {
        let day = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        AttendanceLogic::mark(conn, day, "Maths", &marks).unwrap();
    }
    assert_eq!(count_attendance_for_student(conn, aswin.id).unwrap(), 3);

    assert_eq!(StudentLogic::remove(conn, "Aswin").unwrap(), Some(3));

    assert_eq!(count_attendance_for_student(conn, aswin.id).unwrap(), 0);
    let names: Vec<String> = list_students(conn).unwrap().into_iter().map(|s| s.name).collect();
    assert!(!names.contains(&"Aswin".to_string()));
    assert_eq!(names.len(), 7);

    // other students keep their rows
    let aravind = find_student_by_name(conn, "Aravind").unwrap().unwrap();
    assert_eq!(count_attendance_for_student(conn, aravind.id).unwrap(), 3);

    assert_eq!(StudentLogic::remove(conn, "Aswin").unwrap(), None);
}

#[test]
fn test_seeding_is_idempotent() {
    let state = open_state("students_seed");
    let conn = state.conn();
    let roster = vec!["Aravind".to_string(), "New Kid".to_string(), "  ".to_string()];

    assert_eq!(init_db(conn, &roster).unwrap(), 1);
    assert_eq!(init_db(conn, &roster).unwrap(), 0);
    assert_eq!(list_students(conn).unwrap().len(), 9);
}

#[test]
fn test_add_student_skips_blank_and_duplicates() {
    let state = open_state("students_add");
    let conn = state.conn();

    let s = StudentLogic::add(conn, "  Nila  ").unwrap().unwrap();
    assert_eq!(s.name, "Nila");
    assert!(StudentLogic::add(conn, "Nila").unwrap().is_none());
    assert!(StudentLogic::add(conn, "   ").unwrap().is_none());
}

#[test]
fn test_duplicate_insert_reports_the_key() {
    let state = open_state("students_integrity");
    match insert_student(state.conn(), "Gokul") {
        Err(AppError::IntegrityViolation { entity, key }) => {
            assert_eq!(entity, "student");
            assert_eq!(key, "Gokul");
        }
        other => panic!("expected integrity violation, got {other:?}"),
    }
}

#[test]
fn test_course_catalog_append() {
    let catalog = CourseCatalog::new(&["Maths".to_string(), " Maths ".to_string()]);
    assert_eq!(catalog.list(), ["Maths"]);
    assert_eq!(catalog.add(" Physics "), Some("Physics".to_string()));
    assert_eq!(catalog.add("Physics"), None);
    assert_eq!(catalog.add(""), None);
    assert!(catalog.contains("Physics"));
    assert_eq!(catalog.first().as_deref(), Some("Maths"));
}

#[test]
fn test_course_catalog_concurrent_appends() {
    let catalog = CourseCatalog::new(&[]);
    std::thread::scope(|s| {
        for t in 0..4 {
            let catalog = &catalog;
            s.spawn(move || {
                for i in 0..25 {
                    catalog.add(&format!("Course {}", (t * 25 + i) % 50));
                }
            });
        }
    });
    assert_eq!(catalog.list().len(), 50);
}

#[test]
fn test_students_page_flashes() {
    let state = open_state("students_page");
    let a = admin(&state);

    let out = call(&state, Some(&a), Request::Students(StudentAction::Add("Nila".into())));
    let flash = out.flash().unwrap();
    assert_eq!(flash.level, FlashLevel::Success);
    assert_eq!(flash.message, "Student 'Nila' added successfully.");

    let out = call(
        &state,
        Some(&a),
        Request::Students(StudentAction::AddCourse("Physics".into())),
    );
    assert_eq!(out.flash().unwrap().message, "Subject 'Physics' added successfully.");
    match page(out) {
        View::Students(v) => {
            assert!(v.students.contains(&"Nila".to_string()));
            assert_eq!(v.courses.last().map(String::as_str), Some("Physics"));
        }
        other => panic!("unexpected view {other:?}"),
    }

    let out = call(&state, Some(&a), Request::Students(StudentAction::Remove("Nila".into())));
    assert_eq!(out.flash().unwrap().level, FlashLevel::Success);

    let out = call(&state, Some(&a), Request::Students(StudentAction::Remove("Nila".into())));
    assert_eq!(out.flash().unwrap().level, FlashLevel::Info);
    assert!(matches!(out, Outcome::Page { .. }));
}

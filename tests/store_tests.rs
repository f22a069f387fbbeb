use attendtrack::db::attendance::{
    delete_attendance, find_attendance, find_attendance_by_id, update_attendance,
    upsert_attendance,
};
use attendtrack::db::students::{find_student_by_id, find_student_by_name, rename_student};
use attendtrack::errors::AppError;
use attendtrack::models::attendance::AttendanceMark;
use attendtrack::models::status::Status;
use chrono::NaiveDate;

mod common;
use common::open_state;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_students_find_and_rename() {
    let state = open_state("store_students");
    let conn = state.conn();
    let gokul = find_student_by_name(conn, "Gokul").unwrap().unwrap();

    assert_eq!(find_student_by_id(conn, gokul.id).unwrap().name, "Gokul");
    assert!(matches!(
        find_student_by_id(conn, 999),
        Err(AppError::NotFound(_))
    ));

    rename_student(conn, gokul.id, "Gokul R").unwrap();
    assert_eq!(find_student_by_id(conn, gokul.id).unwrap().name, "Gokul R");
    assert!(find_student_by_name(conn, "Gokul").unwrap().is_none());

    assert!(matches!(
        rename_student(conn, gokul.id, "Aswin"),
        Err(AppError::IntegrityViolation { entity: "student", .. })
    ));
    assert!(matches!(
        rename_student(conn, 999, "Ghost"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_attendance_crud() {
    let state = open_state("store_attendance");
    let conn = state.conn();
    let aswin = find_student_by_name(conn, "Aswin").unwrap().unwrap();
    let day = d("2025-03-20");

    let mut rec = upsert_attendance(
        conn,
        &AttendanceMark {
            student_id: aswin.id,
            date: day,
            course: "Maths".into(),
            status: Status::Present,
            info: String::new(),
        },
    )
    .unwrap();
    assert_eq!(find_attendance_by_id(conn, rec.id).unwrap(), rec);
    assert_eq!(rec.display_date(), "20-03-2025");

    rec.status = Status::Absent;
    rec.info = "left early".into();
    update_attendance(conn, &rec).unwrap();
    let stored = find_attendance(conn, aswin.id, &day, "Maths").unwrap().unwrap();
    assert_eq!(stored.status, Status::Absent);
    assert_eq!(stored.info, "left early");

    // moving the row onto an existing key is refused
    let other = upsert_attendance(
        conn,
        &AttendanceMark {
            student_id: aswin.id,
            date: day,
            course: "Hindhi".into(),
            status: Status::Present,
            info: String::new(),
        },
    )
    .unwrap();
    let mut clash = other.clone();
    clash.course = "Maths".into();
    assert!(matches!(
        update_attendance(conn, &clash),
        Err(AppError::IntegrityViolation { entity: "attendance", .. })
    ));

    delete_attendance(conn, rec.id).unwrap();
    assert!(find_attendance(conn, aswin.id, &day, "Maths").unwrap().is_none());
    assert!(matches!(
        delete_attendance(conn, rec.id),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        find_attendance_by_id(conn, rec.id),
        Err(AppError::NotFound(_))
    ));
}

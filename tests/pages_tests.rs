use attendtrack::app::request::{Filters, HomeworkAction};
use attendtrack::app::views::View;
use attendtrack::app::{Outcome, Request};
use attendtrack::core::attendance::MarkEntry;
use attendtrack::core::homework::Grade;
use attendtrack::models::status::Status;
use attendtrack::utils::date::{to_attendance, to_db, today};
use std::collections::HashMap;

mod common;
use common::{admin, call, open_state, page, student, teacher};

fn present(names: &[&str]) -> HashMap<String, MarkEntry> {
    names
        .iter()
        .map(|n| {
            (
                n.to_string(),
                MarkEntry {
                    status: Status::Present,
                    info: "in class".into(),
                },
            )
        })
        .collect()
}

fn mark(date: Option<&str>, course: Option<&str>, entries: Option<HashMap<String, MarkEntry>>) -> Request {
    Request::Mark {
        date: date.map(str::to_string),
        course: course.map(str::to_string),
        entries,
    }
}

#[test]
fn test_mark_get_defaults() {
    let state = open_state("pages_mark_get");
    let t = teacher(&state);

    match page(call(&state, Some(&t), mark(None, None, None))) {
        View::Mark(v) => {
            assert_eq!(v.current_date, to_attendance(&today()));
            assert_eq!(v.selected_course.as_deref(), Some("Software Engineering"));
            assert!(!v.show_records);
            assert_eq!(v.attendance.absent_count, 8);
            assert_eq!(v.courses.len(), 7);
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_mark_post_saves_and_reports_counts() {
    let state = open_state("pages_mark_post");
    let t = teacher(&state);

    let out = call(
        &state,
        Some(&t),
        mark(Some("2025-03-10"), Some("Maths"), Some(present(&["Aravind", "Gokul"]))),
    );
    assert_eq!(out.flash().unwrap().message, "Attendance saved successfully!");
    match page(out) {
        View::Mark(v) => {
            assert_eq!(v.current_date, "10-03-2025");
            assert!(v.show_records);
            assert_eq!(v.attendance.present_count, 2);
            assert_eq!(v.attendance.absent_count, 6);
            assert_eq!(v.attendance.get("Gokul").unwrap().info, "in class");
            assert_eq!(v.attendance.get("Aswin").unwrap().info, "not_informed");
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_snapshot_accepts_both_formats() {
    let state = open_state("pages_snapshot");
    let t = teacher(&state);
    call(&state, Some(&t), mark(Some("2025-03-11"), Some("Maths"), Some(present(&["Bhavana"]))));

    for date in ["2025-03-11", "11-03-2025"] {
        match page(call(&state, Some(&t), Request::DailySnapshot { date: date.into() })) {
            View::DailySnapshot(v) => {
                let b = v.attendance.iter().find(|e| e.name == "Bhavana").unwrap();
                assert_eq!(b.status, Status::Present, "{date}");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    match page(call(&state, Some(&t), Request::DailySnapshot { date: "not-a-date".into() })) {
        View::DailySnapshot(v) => {
            assert!(v.attendance.iter().all(|e| e.status == Status::Absent));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_records_need_date_and_course() {
    let state = open_state("pages_records");
    let t = teacher(&state);
    call(&state, Some(&t), mark(Some("2025-03-12"), Some("Maths"), Some(present(&["Gokul"]))));
    call(&state, Some(&t), mark(Some("2025-03-14"), Some("Maths"), Some(present(&[]))));

    let only_course = Filters {
        course: Some("Maths".into()),
        ..Default::default()
    };
    match page(call(&state, Some(&t), Request::AttendanceRecords(only_course))) {
        View::Records(v) => {
            assert!(v.records.is_empty());
            assert_eq!(v.range_type, "day");
        }
        other => panic!("unexpected view {other:?}"),
    }

    let week = Filters {
        date: Some("2025-03-12".into()),
        course: Some("Maths".into()),
        range: Some("week".into()),
    };
    match page(call(&state, Some(&t), Request::AttendanceRecords(week))) {
        View::Records(v) => {
            assert_eq!(v.records.len(), 8);
            let gokul = v.records.iter().find(|r| r.name == "Gokul").unwrap();
            assert_eq!(gokul.entries.len(), 2);
            assert_eq!(gokul.entries[0].status, Status::Present);
            assert_eq!(gokul.entries[1].date, "14-03-2025");
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_student_detail_filters() {
    let state = open_state("pages_student_detail");
    let t = teacher(&state);
    call(&state, Some(&t), mark(Some("2025-03-12"), Some("Maths"), Some(present(&["Gokul"]))));
    call(&state, Some(&t), mark(Some("2025-04-12"), Some("Hindhi"), Some(present(&[]))));

    let req = Request::StudentDetail {
        name: "Gokul".into(),
        filters: Filters {
            date: Some("2025-03-01".into()),
            course: Some("all".into()),
            range: Some("month".into()),
        },
    };
    match page(call(&state, Some(&t), req)) {
        View::StudentDetail(v) => {
            assert_eq!(v.summary.total_days, 1);
            assert_eq!(v.summary.percentage, 100.0);
            assert_eq!(v.selected_date, "2025-03-01");
        }
        other => panic!("unexpected view {other:?}"),
    }

    let req = Request::StudentDetail {
        name: "Gokul".into(),
        filters: Filters::default(),
    };
    match page(call(&state, Some(&t), req)) {
        View::StudentDetail(v) => {
            assert_eq!(v.summary.total_days, 2);
            assert_eq!(v.summary.percentage, 50.0);
            assert_eq!(v.selected_date, to_db(&today()));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_report_requires_subject_and_student() {
    let state = open_state("pages_report");
    let a = admin(&state);
    call(&state, Some(&a), mark(Some("2025-03-12"), Some("Maths"), Some(present(&["Gokul"]))));

    let partial = Request::Report {
        subject: Some("Maths".into()),
        student: None,
    };
    match page(call(&state, Some(&a), partial)) {
        View::Report(v) => assert!(v.records.is_empty()),
        other => panic!("unexpected view {other:?}"),
    }

    let full = Request::Report {
        subject: Some("Maths".into()),
        student: Some("Gokul".into()),
    };
    match page(call(&state, Some(&a), full)) {
        View::Report(v) => {
            assert_eq!(v.records.len(), 1);
            assert_eq!(v.records[0].date, "12-03-2025");
            assert_eq!(v.records[0].info, "in class");
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_homework_round_trip_between_teacher_and_student() {
    let state = open_state("pages_homework_flow");
    let t = teacher(&state);
    let s = student(&state, "hariharan");

    let assign = Request::Homework {
        filters: Filters::default(),
        action: Some(HomeworkAction::Assign {
            date: Some("2025-03-15".into()),
            course: Some("Maths".into()),
            description: "Exercise 4".into(),
            grades: HashMap::from([(
                "Hariharan".to_string(),
                Grade {
                    marks: "10".into(),
                    progress: "done".into(),
                },
            )]),
        }),
    };
    let out = call(&state, Some(&t), assign);
    assert_eq!(out.flash().unwrap().message, "Homework and Exercism progress saved!");

    let ask = Request::StudentHomework {
        filter_course: None,
        ask: Some((1, "Is part b optional?".into())),
    };
    let out = call(&state, Some(&s), ask);
    assert_eq!(
        out.flash().unwrap().message,
        "Your question has been submitted successfully!"
    );
    match page(out) {
        View::StudentHomework(v) => {
            assert_eq!(v.student_name, "Hariharan");
            assert_eq!(v.homework_data.len(), 1);
            assert_eq!(v.homework_data[0].marks, "10");
            assert_eq!(v.homework_data[0].doubts.len(), 1);
        }
        other => panic!("unexpected view {other:?}"),
    }

    let list = Request::Homework {
        filters: Filters {
            date: Some("2025-03-15".into()),
            ..Default::default()
        },
        action: None,
    };
    match page(call(&state, Some(&t), list)) {
        View::Homework(v) => {
            assert_eq!(v.homework_records.len(), 1);
            assert_eq!(v.unanswered_doubts.len(), 1);
            assert_eq!(v.unanswered_doubts[0].student, "Hariharan");
        }
        other => panic!("unexpected view {other:?}"),
    }

    let answer = Request::Homework {
        filters: Filters::default(),
        action: Some(HomeworkAction::AnswerDoubt {
            doubt_id: 1,
            answer: "Yes".into(),
        }),
    };
    let out = call(&state, Some(&t), answer);
    assert_eq!(out.flash().unwrap().message, "Answer submitted successfully!");
    match page(out) {
        View::Homework(v) => assert!(v.unanswered_doubts.is_empty()),
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_homework_assign_without_course_is_rejected() {
    let state = open_state("pages_homework_no_course");
    let t = teacher(&state);
    let assign = Request::Homework {
        filters: Filters::default(),
        action: Some(HomeworkAction::Assign {
            date: None,
            course: None,
            description: "x".into(),
            grades: HashMap::new(),
        }),
    };
    assert!(matches!(call(&state, Some(&t), assign), Outcome::Rejected { .. }));
}

#[test]
fn test_student_homework_without_profile_redirects() {
    let state = open_state("pages_no_profile");
    let a = admin(&state);
    call(
        &state,
        Some(&a),
        Request::Students(attendtrack::app::request::StudentAction::Remove("Aswin".into())),
    );

    let s = student(&state, "aswin");
    match call(
        &state,
        Some(&s),
        Request::StudentHomework {
            filter_course: None,
            ask: None,
        },
    ) {
        Outcome::Redirect { to, flash } => {
            assert_eq!(to, "/front");
            assert_eq!(flash.message, "Student profile not found.");
        }
        other => panic!("expected redirect, got {other:?}"),
    }
}

//! Terminal rendering of router outcomes.

use crate::app::Outcome;
use crate::app::views::*;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{RESET, color_for_optional_field, color_for_percentage, colorize_status};
use crate::utils::describe_status;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};

const QUESTION_WIDTH: usize = 48;

/// Print an outcome, either as tables or as pretty JSON.
pub fn render(outcome: &Outcome, json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Page { view, flash } => {
            if let Some(f) = flash {
                messages::flash(f);
            }
            render_view(view);
        }
        Outcome::Redirect { to, flash } => {
            messages::flash(flash);
            messages::info(format!("→ {}", to));
        }
        Outcome::NotFound { message } => messages::error(message),
        Outcome::Rejected { message } => messages::error(message),
    }
    Ok(())
}

pub fn render_view(view: &View) {
    match view {
        View::Front(v) => front(v),
        View::Mark(v) => mark(v),
        View::StudentDetail(v) => student_detail(v),
        View::DailySnapshot(v) => snapshot(v),
        View::Students(v) => students(v),
        View::Records(v) => records(v),
        View::Homework(v) => homework(v),
        View::StudentHomework(v) => student_homework(v),
        View::Report(v) => report(v),
    }
}

fn print_table(t: &Table, empty: &str) {
    if t.is_empty() {
        messages::info(empty);
    } else {
        print!("{}", t.render());
    }
}

fn front(v: &FrontView) {
    messages::header(format!("Welcome {} ({})", v.user_email, v.user_role));
    if let Some(name) = &v.student_name {
        println!("Student profile: {}\n", bold(name));
    }
    println!("{}", bold("Students"));
    for s in &v.students {
        println!("  • {}", s);
    }
}

fn mark(v: &MarkView) {
    let course = v.selected_course.as_deref().unwrap_or("-");
    messages::header(format!("Attendance {} · {}", v.current_date, course));

    let mut t = Table::new(vec![
        Column::new("Student", 16),
        Column::new("Status", 6),
        Column::new("Info", 12),
    ]);
    for e in &v.attendance.entries {
        t.add_row(vec![
            e.name.clone(),
            colorize_status(e.status.code()),
            format!("{}{}{}", color_for_optional_field(&e.info), e.info, RESET),
        ]);
    }
    print_table(&t, "No students enrolled.");

    println!(
        "\nPresent: {}   Absent: {}",
        v.attendance.present_count, v.attendance.absent_count
    );
    if !v.show_records {
        println!("Courses: {}", v.courses.join(", "));
    }
}

fn student_detail(v: &StudentDetailView) {
    messages::header(format!("Attendance of {}", v.name));
    println!(
        "Course: {}   Range: {}   Date: {}\n",
        v.selected_course, v.date_range, v.selected_date
    );

    let mut t = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Status", 6),
        Column::new("Course", 20),
    ]);
    for r in &v.summary.records {
        t.add_row(vec![
            r.date.clone(),
            colorize_status(r.status.code()),
            r.course.clone(),
        ]);
    }
    print_table(&t, "No attendance records.");

    let s = &v.summary;
    println!(
        "\nTotal: {}   Present: {}   Absent: {}   {}{:.2}%{}",
        s.total_days,
        s.present_count,
        s.absent_count,
        color_for_percentage(s.percentage),
        s.percentage,
        RESET
    );
}

fn snapshot(v: &SnapshotView) {
    messages::header(format!("Attendance on {}", v.date));
    let mut t = Table::new(vec![Column::new("Student", 16), Column::new("Status", 8)]);
    for e in &v.attendance {
        let (label, color) = describe_status(e.status);
        t.add_row(vec![e.name.clone(), format!("{color}{label}{RESET}")]);
    }
    print_table(&t, "No students enrolled.");
}

fn students(v: &StudentsView) {
    messages::header("Students");
    for s in &v.students {
        println!("  • {}", s);
    }
    println!("\n{}", bold("Courses"));
    for c in &v.courses {
        println!("  • {}", c);
    }
}

fn records(v: &RecordsView) {
    let course = v.selected_course.as_deref().unwrap_or("-");
    let date = v.selected_date.as_deref().unwrap_or("-");
    messages::header(format!("Records · {} · {} ({})", course, date, v.range_type));

    if v.records.is_empty() {
        messages::info("No records for the selected filters.");
        return;
    }
    for group in &v.records {
        println!("{}", bold(&group.name));
        let mut t = Table::new(vec![
            Column::new("Date", 10),
            Column::new("Status", 6),
            Column::new("Info", 12),
        ]);
        for e in &group.entries {
            t.add_row(vec![
                e.date.clone(),
                colorize_status(e.status.code()),
                e.info.clone(),
            ]);
        }
        println!("{}", t.render());
    }
}

fn homework(v: &HomeworkPageView) {
    messages::header(format!("Homework (today {})", v.current_date));

    if v.homework_records.is_empty() {
        messages::info("No homework for the selected filters.");
    }
    for day in &v.homework_records {
        for (course, hw) in &day.courses {
            println!(
                "{} · {} (#{})\n  {}",
                bold(&day.date),
                course,
                hw.homework_id,
                hw.description
            );
            let mut t = Table::new(vec![
                Column::new("Student", 16),
                Column::new("Marks", 8),
                Column::new("Progress", 10),
            ]);
            for (student, marks) in &hw.marks {
                let progress = hw.progress.get(student).map(String::as_str).unwrap_or("N/A");
                t.add_row(vec![
                    student.clone(),
                    format!("{}{}{}", color_for_optional_field(marks), marks, RESET),
                    format!("{}{}{}", color_for_optional_field(progress), progress, RESET),
                ]);
            }
            println!("{}", t.render());
        }
    }

    println!("{}", bold("Unanswered doubts"));
    let mut t = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Homework", 10),
        Column::new("Course", 12),
        Column::new("Student", 12),
        Column::new("Question", QUESTION_WIDTH),
    ]);
    for d in &v.unanswered_doubts {
        let lines = textwrap::wrap(&d.question, QUESTION_WIDTH);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                t.add_row(vec![
                    d.id.to_string(),
                    d.homework_date.clone(),
                    d.course.clone(),
                    d.student.clone(),
                    line.to_string(),
                ]);
            } else {
                let mut row = vec![String::new(); 4];
                row.push(line.to_string());
                t.add_row(row);
            }
        }
    }
    print_table(&t, "No pending doubts.");
}

fn student_homework(v: &StudentHomeworkView) {
    messages::header(format!("Homework of {}", v.student_name));
    if let Some(c) = &v.filter_course {
        println!("Course: {}\n", c);
    }

    if v.homework_data.is_empty() {
        messages::info("No homework assigned.");
        return;
    }
    for item in &v.homework_data {
        let hw = &item.homework;
        println!(
            "{} · {} (#{})\n  {}",
            bold(&hw.date_str()),
            hw.course,
            hw.id,
            hw.description
        );
        println!(
            "  Marks: {}{}{}   Progress: {}{}{}",
            color_for_optional_field(&item.marks),
            item.marks,
            RESET,
            color_for_optional_field(&item.progress),
            item.progress,
            RESET
        );
        for d in &item.doubts {
            println!("  Q: {}", textwrap::fill(&d.question, QUESTION_WIDTH));
            match &d.answer {
                Some(a) => println!("  A: {}", textwrap::fill(a, QUESTION_WIDTH)),
                None => println!("  A: {}(waiting for an answer){}", color_for_optional_field(""), RESET),
            }
        }
        println!();
    }
}

fn report(v: &ReportView) {
    let subject = v.selected_subject.as_deref().unwrap_or("-");
    let student = v.selected_student.as_deref().unwrap_or("-");
    messages::header(format!("Report · {} · {}", student, subject));

    let mut t = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Status", 6),
        Column::new("Info", 12),
    ]);
    for r in &v.records {
        t.add_row(vec![
            r.date.clone(),
            colorize_status(r.status.code()),
            r.info.clone(),
        ]);
    }
    print_table(&t, "Select a subject and a student to see the report.");
}

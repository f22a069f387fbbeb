//! Homework assignment, grading and doubts.

use crate::core::range::{RangeKind, resolve_str};
use crate::db::homework::{
    HomeworkFilter, find_doubt_by_id, find_homework_by_id, find_progress, insert_doubt,
    list_doubts, list_homework, list_progress_for_homework, list_unanswered_doubts,
    update_doubt_answer, upsert_homework, upsert_progress,
};
use crate::db::log::audit;
use crate::db::students::list_students;
use crate::errors::{AppError, AppResult};
use crate::models::homework::{Homework, HomeworkDoubt, HomeworkProgress};
use crate::utils::date::{now_timestamp, to_db};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const NOT_GRADED: &str = "Not graded";
pub const NOT_SUBMITTED: &str = "Not submitted";
const MISSING: &str = "N/A";
const UNKNOWN_STUDENT: &str = "Unknown";

/// Marks and progress typed for one student on the homework form.
#[derive(Debug, Clone, Default)]
pub struct Grade {
    pub marks: String,
    pub progress: String,
}

// ---------------------------
// Teacher view
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CourseHomework {
    pub homework_id: i64,
    pub description: String,
    pub marks: BTreeMap<String, String>,
    pub progress: BTreeMap<String, String>,
}

/// `date -> course -> homework`, newest date first.
#[derive(Debug, Clone, Serialize)]
pub struct HomeworkDay {
    pub date: String, // YYYY-MM-DD
    pub courses: BTreeMap<String, CourseHomework>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoubtView {
    pub id: i64,
    pub homework_id: i64,
    pub homework_date: String,
    pub course: String,
    pub student: String,
    pub question: String,
    pub created_at: String,
}

// ---------------------------
// Student view
// ---------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StudentHomework {
    pub homework: Homework,
    pub marks: String,
    pub progress: String,
    pub doubts: Vec<HomeworkDoubt>,
}

pub struct HomeworkLogic;

impl HomeworkLogic {
    /// Create the homework for (date, course) or replace its description;
    /// the existing id is kept.
    pub fn assign_or_update(
        conn: &Connection,
        date: NaiveDate,
        course: &str,
        description: &str,
    ) -> AppResult<Homework> {
        let hw = upsert_homework(conn, &date, course, description.trim())?;
        audit(
            conn,
            "homework",
            course,
            &format!("Homework #{} saved for {}", hw.id, to_db(&date)),
        );
        Ok(hw)
    }

    pub fn upsert_progress(
        conn: &Connection,
        homework_id: i64,
        student_id: i64,
        marks: &str,
        progress: &str,
    ) -> AppResult<HomeworkProgress> {
        upsert_progress(conn, homework_id, student_id, marks.trim(), progress.trim())
    }

    /// Write a progress row for every current student; students without an
    /// entry in `grades` get empty marks and progress.
    pub fn grade_all(
        conn: &Connection,
        homework: &Homework,
        grades: &HashMap<String, Grade>,
    ) -> AppResult<usize> {
        let students = list_students(conn)?;
        let tx = conn.unchecked_transaction()?;
        for s in &students {
            let g = grades.get(&s.name).cloned().unwrap_or_default();
            Self::upsert_progress(&tx, homework.id, s.id, &g.marks, &g.progress)?;
        }
        tx.commit()?;

        audit(
            conn,
            "grade",
            &homework.course,
            &format!("Progress saved for {} students on homework #{}", students.len(), homework.id),
        );
        Ok(students.len())
    }

    /// Homework grouped by date and course.
    ///
    /// Date bounds come from `filter_date` + `filter_range` (range defaults
    /// to `day`). For the literal `day` range every entry must also match
    /// `filter_date` exactly, and the course filter is checked once more.
    pub fn build_teacher_view(
        conn: &Connection,
        filter_date: Option<&str>,
        filter_range: Option<&str>,
        filter_course: Option<&str>,
    ) -> AppResult<Vec<HomeworkDay>> {
        let filter_date = filter_date.map(str::trim).filter(|s| !s.is_empty());
        let filter_course = filter_course.filter(|s| !s.is_empty());
        let range = filter_range.unwrap_or(RangeKind::Day.as_str());
        let exact_day = filter_date.is_some() && range == RangeKind::Day.as_str();

        let bounds = resolve_str(filter_date, Some(range));
        let filter = HomeworkFilter {
            course: filter_course.map(str::to_string),
            from: bounds.map(|b| b.0),
            to: bounds.map(|b| b.1),
        };

        let names: HashMap<i64, String> = list_students(conn)?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let mut days: Vec<HomeworkDay> = Vec::new();
        for hw in list_homework(conn, &filter)? {
            let date = hw.date_str();
            if exact_day {
                if Some(date.as_str()) != filter_date {
                    continue;
                }
                if filter_course.is_some_and(|c| c != hw.course) {
                    continue;
                }
            }

            let mut entry = CourseHomework {
                homework_id: hw.id,
                description: hw.description.clone(),
                marks: BTreeMap::new(),
                progress: BTreeMap::new(),
            };
            for p in list_progress_for_homework(conn, hw.id)? {
                let who = names
                    .get(&p.student_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_STUDENT.to_string());
                entry.marks.insert(who.clone(), or_missing(&p.marks));
                entry.progress.insert(who, or_missing(&p.progress));
            }

            // list_homework is sorted by date, so a new date is always last.
            match days.last_mut() {
                Some(day) if day.date == date => {
                    day.courses.insert(hw.course.clone(), entry);
                }
                _ => days.push(HomeworkDay {
                    date,
                    courses: BTreeMap::from([(hw.course.clone(), entry)]),
                }),
            }
        }

        Ok(days)
    }

    /// Every homework (optionally one course), newest first, with this
    /// student's marks, progress and doubts.
    pub fn build_student_view(
        conn: &Connection,
        student_id: i64,
        filter_course: Option<&str>,
    ) -> AppResult<Vec<StudentHomework>> {
        let filter = HomeworkFilter {
            course: filter_course.filter(|s| !s.is_empty()).map(str::to_string),
            ..Default::default()
        };

        let mut out = Vec::new();
        for hw in list_homework(conn, &filter)? {
            let progress = find_progress(conn, hw.id, student_id)?;
            let doubts = list_doubts(conn, hw.id, student_id)?;
            out.push(StudentHomework {
                marks: progress
                    .as_ref()
                    .map(|p| p.marks.clone())
                    .unwrap_or_else(|| NOT_GRADED.to_string()),
                progress: progress
                    .map(|p| p.progress)
                    .unwrap_or_else(|| NOT_SUBMITTED.to_string()),
                homework: hw,
                doubts,
            });
        }
        Ok(out)
    }

    /// Unanswered doubts, newest first, with homework and student names.
    pub fn unanswered_doubts(conn: &Connection) -> AppResult<Vec<DoubtView>> {
        let names: HashMap<i64, String> = list_students(conn)?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let mut out = Vec::new();
        for d in list_unanswered_doubts(conn)? {
            let (homework_date, course) = match find_homework_by_id(conn, d.homework_id) {
                Ok(hw) => (hw.date_str(), hw.course),
                Err(AppError::NotFound(_)) => (MISSING.to_string(), MISSING.to_string()),
                Err(e) => return Err(e),
            };
            out.push(DoubtView {
                id: d.id,
                homework_id: d.homework_id,
                homework_date,
                course,
                student: names
                    .get(&d.student_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
                question: d.question,
                created_at: d.created_at,
            });
        }
        Ok(out)
    }

    /// Record a student's question. A blank question is ignored (`None`);
    /// the homework must exist.
    pub fn submit_doubt(
        conn: &Connection,
        homework_id: i64,
        student_id: i64,
        question: &str,
    ) -> AppResult<Option<HomeworkDoubt>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        let hw = find_homework_by_id(conn, homework_id)?;

        let doubt = insert_doubt(conn, hw.id, student_id, question, &now_timestamp())?;
        audit(
            conn,
            "doubt",
            &hw.course,
            &format!("Doubt #{} raised on homework #{}", doubt.id, hw.id),
        );
        Ok(Some(doubt))
    }

    /// Answer a doubt. Blank answers and unknown ids change nothing and
    /// return `false`. Answering again overwrites the previous answer.
    pub fn answer_doubt(conn: &Connection, doubt_id: i64, answer: &str) -> AppResult<bool> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(false);
        }
        let doubt = match find_doubt_by_id(conn, doubt_id) {
            Ok(d) => d,
            Err(AppError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        update_doubt_answer(conn, doubt.id, answer, &now_timestamp())?;
        audit(
            conn,
            "answer",
            &format!("doubt #{}", doubt.id),
            "Answer submitted",
        );
        Ok(true)
    }
}

fn or_missing(v: &str) -> String {
    if v.is_empty() {
        MISSING.to_string()
    } else {
        v.to_string()
    }
}

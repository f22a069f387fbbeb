use crate::utils::date::ISO_FMT;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Homework {
    pub id: i64,
    pub date: NaiveDate,     // ⇔ homework.date (TEXT "YYYY-MM-DD")
    pub course: String,      // ⇔ homework.course, UNIQUE(date, course)
    pub description: String, // ⇔ homework.description
}

impl Homework {
    pub fn date_str(&self) -> String {
        self.date.format(ISO_FMT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeworkProgress {
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub marks: String,
    pub progress: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeworkDoubt {
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub created_at: String,          // "%Y-%m-%d %H:%M:%S"
    pub answered_at: Option<String>, // set together with `answer`
}

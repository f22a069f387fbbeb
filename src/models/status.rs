use serde::{Deserialize, Serialize};

/// Attendance mark for one student, one course, one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl Status {
    pub fn code(&self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::Absent => "A",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "P" => Some(Status::Present),
            "A" => Some(Status::Absent),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Status::Present)
    }
}

use clap::{Parser, Subcommand};

/// Command-line interface definition for attendtrack
/// Attendance and homework tracking for a small class, backed by SQLite
#[derive(Parser, Debug)]
#[command(
    name = "attendtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Role-gated attendance and homework tracking for a small class, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print the page as JSON instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Role to log in with: Student, Teacher or Admin
    #[arg(global = true, long = "role")]
    pub role: Option<String>,

    #[arg(global = true, long = "email")]
    pub email: Option<String>,

    #[arg(global = true, long = "password")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Landing page of the logged-in user
    Front,

    /// Show or save attendance for one date and course
    Mark {
        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, help = "Course, default the first configured course")]
        course: Option<String>,

        #[arg(long = "present", value_name = "NAME", help = "Student present (repeatable)")]
        present: Vec<String>,

        #[arg(
            long = "info",
            value_name = "NAME=TEXT",
            value_parser = parse_key_val,
            help = "Note for a student (repeatable)"
        )]
        info: Vec<(String, String)>,

        #[arg(long, help = "Save the marks; unlisted students are stored absent")]
        save: bool,
    },

    /// Attendance detail of one student
    Student {
        name: String,

        #[arg(long, help = "Course name, or 'all'")]
        course: Option<String>,

        #[arg(long, help = "all, day, week, month or year")]
        range: Option<String>,

        #[arg(long, help = "Reference date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Status of every student on one date
    Attendance {
        #[arg(help = "Date (DD-MM-YYYY or YYYY-MM-DD)")]
        date: String,
    },

    /// Manage the roster and the course list
    Students {
        #[arg(long, value_name = "NAME", conflicts_with_all = ["remove", "add_course"])]
        add: Option<String>,

        #[arg(long, value_name = "NAME", conflicts_with = "add_course")]
        remove: Option<String>,

        #[arg(long = "add-course", value_name = "NAME")]
        add_course: Option<String>,
    },

    /// Attendance of one course grouped by student
    Records {
        #[arg(long, help = "Reference date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long)]
        course: Option<String>,

        #[arg(long, help = "day, week, month or year (default day)")]
        range: Option<String>,
    },

    /// Assign and grade homework, answer doubts
    Homework {
        #[arg(long = "filter-date")]
        filter_date: Option<String>,

        #[arg(long = "filter-course")]
        filter_course: Option<String>,

        #[arg(long = "filter-range", help = "day, week, month or year (default day)")]
        filter_range: Option<String>,

        #[arg(long, conflicts_with = "answer_doubt", help = "Assign or update homework")]
        assign: bool,

        #[arg(long, requires = "assign", help = "Homework date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, requires = "assign")]
        course: Option<String>,

        #[arg(long, requires = "assign")]
        description: Option<String>,

        #[arg(long, value_name = "NAME=VALUE", value_parser = parse_key_val, requires = "assign")]
        marks: Vec<(String, String)>,

        #[arg(long, value_name = "NAME=VALUE", value_parser = parse_key_val, requires = "assign")]
        progress: Vec<(String, String)>,

        #[arg(long = "answer-doubt", value_name = "ID", requires = "answer")]
        answer_doubt: Option<i64>,

        #[arg(long, requires = "answer_doubt")]
        answer: Option<String>,
    },

    /// Own homework of the logged-in student
    StudentHomework {
        #[arg(long = "filter-course")]
        filter_course: Option<String>,

        #[arg(long, value_name = "HOMEWORK_ID", requires = "question")]
        ask: Option<i64>,

        #[arg(long, requires = "ask")]
        question: Option<String>,
    },

    /// Chronological records of one student in one course
    Report {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        student: Option<String>,
    },

    /// Log in (uses --role, --email and --password)
    Login,

    /// Log out of the interactive shell
    Logout,

    /// Interactive shell keeping the login between commands
    Shell,
}

/// `NAME=VALUE`; the name may contain spaces, the value may be empty.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("missing name in '{s}'"));
    }
    Ok((k.to_string(), v.trim().to_string()))
}

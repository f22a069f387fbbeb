use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;
use rusqlite::Connection;

const OP_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "mark" | "add_student" => Colour::Green,
        "del_student" => Colour::Red,
        "add_course" => Colour::Cyan,
        "homework" | "grade" => Colour::Yellow,
        "doubt" | "answer" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One line per entry: `id: date | operation (target) => message`,
    /// the operation coloured, the op column capped at 60 visible chars.
    pub fn format_log(entries: &[LogEntry]) -> Vec<String> {
        let rows: Vec<(&LogEntry, String, String)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or_else(|_| e.date.clone());
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e, date, op_target)
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, _, t)| t.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_MAX);
        let id_w = rows.iter().map(|(e, _, _)| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|(_, d, _)| d.len()).max().unwrap_or(10);

        let mut out = Vec::with_capacity(rows.len());
        for (e, date, op_target) in rows {
            let color = color_for_operation(&e.operation);

            let visible = if op_target.chars().count() > OP_MAX {
                let mut s: String = op_target.chars().take(OP_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            out.push(format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, date, colored, padding, e.message
            ));
        }
        out
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        println!("📜 Internal log:\n");
        for line in Self::format_log(&entries) {
            println!("{}", line);
        }
        Ok(())
    }
}

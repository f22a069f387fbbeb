use crate::ui::messages::notice;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves here.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the five domain tables.
///
/// Foreign keys are declared for documentation only: SQLite leaves them
/// unenforced unless `PRAGMA foreign_keys=ON`, so progress and doubt rows
/// keep their `student_id` after the student is removed.
fn create_domain_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE CHECK(length(trim(name)) > 0)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  INTEGER NOT NULL REFERENCES students(id),
            date        TEXT NOT NULL,
            course      TEXT NOT NULL,
            status      TEXT NOT NULL CHECK(status IN ('P','A')),
            info        TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS homework (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            course       TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS homework_progress (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            homework_id  INTEGER NOT NULL REFERENCES homework(id),
            student_id   INTEGER NOT NULL REFERENCES students(id),
            marks        TEXT NOT NULL DEFAULT '',
            progress     TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS homework_doubts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            homework_id  INTEGER NOT NULL REFERENCES homework(id),
            student_id   INTEGER NOT NULL REFERENCES students(id),
            question     TEXT NOT NULL,
            answer       TEXT,
            created_at   TEXT NOT NULL,
            answered_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date_course ON attendance(date, course);
        CREATE INDEX IF NOT EXISTS idx_doubts_created ON homework_doubts(created_at);
        "#,
    )?;
    Ok(())
}

/// Natural keys become UNIQUE indexes so upserts can rely on ON CONFLICT.
fn migrate_add_unique_keys(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_unique_natural_keys";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    // 2) Apply
    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_attendance_key
            ON attendance(student_id, date, course);
        CREATE UNIQUE INDEX IF NOT EXISTS ux_homework_key
            ON homework(date, course);
        CREATE UNIQUE INDEX IF NOT EXISTS ux_progress_key
            ON homework_progress(homework_id, student_id);
        "#,
    )?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added unique natural keys')",
        [version],
    )?;

    notice(format!("Migration applied: {}", version));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Domain tables
    let fresh = !table_exists(conn, "students")?;
    create_domain_tables(conn)?;
    if fresh {
        notice("Created attendance and homework tables.");
    }

    // 3) Versioned migrations
    migrate_add_unique_keys(conn)?;

    Ok(())
}

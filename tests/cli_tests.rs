use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{atk, init_cli, setup_test_db};

const TEACHER: [&str; 6] = [
    "--role",
    "Teacher",
    "--email",
    "teacher@example.com",
    "--password",
    "teacher123",
];

#[test]
fn test_init_creates_and_seeds() {
    let db_path = setup_test_db("cli_init");

    atk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("8 students added"));

    // second run: nothing new to seed
    atk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("students added").not());
}

#[test]
fn test_mark_save_then_student_detail() {
    let db_path = setup_test_db("cli_mark_detail");
    init_cli(&db_path);

    atk()
        .args(["--db", &db_path])
        .args(TEACHER)
        .args([
            "mark",
            "--date",
            "2025-03-10",
            "--course",
            "Maths",
            "--present",
            "Aravind",
            "--info",
            "Aswin=medical leave",
            "--save",
        ])
        .assert()
        .success()
        .stdout(contains("Attendance saved successfully!"))
        .stdout(contains("10-03-2025"))
        .stdout(contains("medical leave"))
        .stdout(contains("Present: 1"));

    atk()
        .args([
            "--db",
            &db_path,
            "--role",
            "Student",
            "--email",
            "aravind@example.com",
            "--password",
            "student123",
            "student",
            "Aravind",
        ])
        .assert()
        .success()
        .stdout(contains("Attendance of Aravind"))
        .stdout(contains("10-03-2025"))
        .stdout(contains("100.00%"));
}

#[test]
fn test_student_cannot_view_other_student() {
    let db_path = setup_test_db("cli_other_student");
    init_cli(&db_path);

    atk()
        .args([
            "--db",
            &db_path,
            "--role",
            "Student",
            "--email",
            "aravind@example.com",
            "--password",
            "student123",
            "student",
            "Gokul",
        ])
        .assert()
        .failure()
        .stderr(contains("You can only view your own attendance records."));
}

#[test]
fn test_requires_login() {
    let db_path = setup_test_db("cli_requires_login");
    init_cli(&db_path);

    atk()
        .args(["--db", &db_path, "front"])
        .assert()
        .failure()
        .stderr(contains("Please log in to access this page."));
}

#[test]
fn test_wrong_password() {
    let db_path = setup_test_db("cli_wrong_password");
    init_cli(&db_path);

    atk()
        .args([
            "--db",
            &db_path,
            "--role",
            "Admin",
            "--email",
            "admin@example.com",
            "--password",
            "wrong",
            "students",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials. Please try again."));
}

#[test]
fn test_teacher_denied_student_management() {
    let db_path = setup_test_db("cli_teacher_denied");
    init_cli(&db_path);

    atk()
        .args(["--db", &db_path])
        .args(TEACHER)
        .args(["students", "--add", "Nila"])
        .assert()
        .failure()
        .stderr(contains("Access denied. This page is only for Admin."));
}

#[test]
fn test_json_output() {
    let db_path = setup_test_db("cli_json");
    init_cli(&db_path);

    atk()
        .args(["--db", &db_path, "--json"])
        .args(TEACHER)
        .args(["attendance", "2025-03-10"])
        .assert()
        .success()
        .stdout(contains("\"outcome\": \"page\""))
        .stdout(contains("\"page\": \"daily_snapshot\""))
        .stdout(contains("\"status\": \"A\""));
}

#[test]
fn test_json_output_on_fresh_database_is_pure_json() {
    // no init: the schema is created while the command runs
    let db_path = setup_test_db("cli_json_fresh");

    let out = atk()
        .args(["--db", &db_path, "--json"])
        .args(TEACHER)
        .arg("front")
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["outcome"], "page");
    assert!(String::from_utf8_lossy(&out.stderr).contains("Created attendance and homework tables."));
}

#[test]
fn test_homework_assign_and_log() {
    let db_path = setup_test_db("cli_homework_log");
    init_cli(&db_path);

    atk()
        .args(["--db", &db_path])
        .args(TEACHER)
        .args([
            "homework",
            "--assign",
            "--date",
            "2025-03-15",
            "--course",
            "Maths",
            "--description",
            "Exercise 4",
            "--marks",
            "Gokul=9",
            "--filter-date",
            "2025-03-15",
        ])
        .assert()
        .success()
        .stdout(contains("Homework and Exercism progress saved!"))
        .stdout(contains("Exercise 4"));

    atk()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("(Maths)"))
        .stdout(contains("Homework #1 saved for 2025-03-15"))
        .stdout(contains("Progress saved for 8 students on homework #1"));
}

#[test]
fn test_bad_info_pair_is_a_usage_error() {
    let db_path = setup_test_db("cli_bad_info");

    atk()
        .args(["--db", &db_path])
        .args(TEACHER)
        .args(["mark", "--info", "no-equals-sign"])
        .assert()
        .failure()
        .stderr(contains("expected NAME=VALUE"));
}

#[test]
fn test_shell_keeps_session() {
    let db_path = setup_test_db("cli_shell");
    init_cli(&db_path);

    let script = "\
front
login --role Admin --email admin@example.com --password admin123
students --add-course \"Cloud Computing\"
logout
front
exit
";

    atk()
        .args(["--db", &db_path, "shell"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Logged in as admin@example.com (Admin)"))
        .stdout(contains("Subject 'Cloud Computing' added successfully."))
        .stdout(contains("You have been logged out successfully."))
        .stderr(contains("Please log in to access this page."));
}

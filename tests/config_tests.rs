use attendtrack::config::Config;
use attendtrack::core::auth::{CredentialStore, login};
use attendtrack::models::role::Role;
use attendtrack::utils::path::expand_tilde;
use std::path::PathBuf;

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let cfg: Config = serde_yaml::from_str("database: /tmp/class.sqlite\n").unwrap();
    assert_eq!(cfg.database, "/tmp/class.sqlite");
    assert_eq!(cfg.courses.len(), 7);
    assert_eq!(cfg.courses[0], "Software Engineering");
    assert_eq!(cfg.students.len(), 8);
    assert!(cfg.users.is_none());

    // builtin accounts when no table is configured
    let store = cfg.credentials();
    assert!(store.lookup(Role::Teacher, "teacher@example.com").is_some());
}

#[test]
fn test_configured_users_replace_builtin_table() {
    let yaml = r#"
database: class.sqlite
courses: [Physics]
students: [Nila]
users:
  Student:
    nila@school.test:
      password: pw1
      student_name: Nila
  Teacher:
    t@school.test:
      password: pw2
"#;
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.courses, ["Physics"]);

    let store = cfg.credentials();
    assert!(store.lookup(Role::Teacher, "teacher@example.com").is_none());

    let s = login(&store, "Student", "nila@school.test", "pw1").unwrap();
    assert_eq!(s.student_name.as_deref(), Some("Nila"));
    assert!(login(&store, "Teacher", "t@school.test", "pw2").is_ok());
    assert!(login(&store, "Admin", "admin@example.com", "admin123").is_err());
}

#[test]
fn test_config_round_trips_through_yaml() {
    let cfg = Config::default();
    let yaml = serde_yaml::to_string(&cfg).unwrap();
    assert!(!yaml.contains("users"));
    let back: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back.students, cfg.students);
    assert!(Config::config_file().ends_with("attendtrack.conf"));
}

#[test]
fn test_tilde_paths_expand_to_home() {
    let home = dirs::home_dir().unwrap();
    assert_eq!(expand_tilde("~"), home);
    assert_eq!(expand_tilde("~/class/db.sqlite"), home.join("class/db.sqlite"));
    // only a leading "~/" is special
    assert_eq!(expand_tilde("~other/db"), PathBuf::from("~other/db"));
    assert_eq!(expand_tilde("/tmp/db"), PathBuf::from("/tmp/db"));
}

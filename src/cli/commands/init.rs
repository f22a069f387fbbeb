use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the seed roster
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let mut cfg = Config::load()?;
    cfg.database = db_path.clone();

    println!("⚙️  Initializing attendtrack…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    let seeded = init_db(&pool.conn, &cfg.students)?;

    messages::success(format!("Database initialized at {}", &db_path));
    if seeded > 0 {
        messages::info(format!("{} students added to the roster", seeded));
    }

    audit(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {} ({} students seeded)", &db_path, seeded),
    );

    println!("🎉 attendtrack initialization completed!");
    Ok(())
}

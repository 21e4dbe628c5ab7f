use bank_service::config::db::{db_url, sanitize_db_url, DbKind};
use bank_service::connect_db;
use clap::Parser;
use migration::MigrationCommand;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Bank service database migration tool")]
struct Args {
    /// Migration command: up | down | fresh | reset | refresh | status
    command: MigrationCommand,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    // Only Postgres: an in-memory database would vanish when the command exits.
    match db_url(DbKind::Postgres) {
        Ok(url) => info!(url = %sanitize_db_url(&url), command = ?args.command, "running migration"),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    }

    let conn = match connect_db(DbKind::Postgres).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&conn, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

use std::{env, error::Error, path::Path};

use clap::Parser;
use duckdb::Connection;
use kennel::db::prod_db::ProdDb;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the animals DuckDB file
    #[arg(long)]
    duckdb_path: Option<String>,

    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,
}

/// One-time database setup.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let _ = dotenvy::from_path(Path::new(format!(".env/{}.env", args.env).as_str()));

    let mut archive = ProdDb::petpoint_animals();
    if let Some(path) = args
        .duckdb_path
        .or_else(|| env::var("PETPOINT_DUCKDB_PATH").ok())
    {
        archive.duckdb_path = path;
    }

    let conn = Connection::open(&archive.duckdb_path)?;
    archive.create_schema(&conn)?;
    conn.close().unwrap();
    info!("created animals table in {}", archive.duckdb_path);

    Ok(())
}

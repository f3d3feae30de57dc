use std::{env, error::Error, path::Path};

use clap::Parser;
use duckdb::Connection;
use kennel::db::prod_db::ProdDb;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the downloaded reports
    input_directory: String,

    #[arg(long)]
    shelter_id: Option<String>,

    /// Path to the animals DuckDB file
    #[arg(long)]
    duckdb_path: Option<String>,

    /// Drop malformed report rows with a warning instead of failing the run
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,

    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,
}

/// Run this job after download_petpoint_reports.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let _ = dotenvy::from_path(Path::new(format!(".env/{}.env", args.env).as_str()));

    let shelter_id = match args.shelter_id {
        Some(id) => id,
        None => env::var("PETPOINT_SHELTER_ID")?,
    };

    let mut archive = ProdDb::petpoint_animals();
    archive.base_dir = args.input_directory;
    if let Some(path) = args
        .duckdb_path
        .or_else(|| env::var("PETPOINT_DUCKDB_PATH").ok())
    {
        archive.duckdb_path = path;
    }

    let rows = archive.read_file(archive.filename(), args.skip_malformed)?;
    info!("read {} intake rows from {}", rows.len(), archive.filename());

    let conn = Connection::open(&archive.duckdb_path)?;
    let n = archive.upsert_rows(&conn, &shelter_id, rows)?;
    conn.close().unwrap();
    info!("done, {} rows applied", n);

    Ok(())
}

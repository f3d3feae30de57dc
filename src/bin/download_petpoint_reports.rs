use std::{env, error::Error, fs, path::Path};

use clap::Parser;
use kennel::db::petpoint::lib_portal::{
    wait_for_download_and_move, Credentials, PortalSession, Report,
};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where the downloaded reports end up
    output_directory: String,

    /// Seconds to wait for each report download
    #[arg(long, default_value_t = 60)]
    download_timeout: u64,

    #[arg(long)]
    shelter_id: Option<String>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    password: Option<String>,

    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,
}

fn arg_or_env(arg: Option<String>, name: &str) -> Result<String, Box<dyn Error>> {
    match arg {
        Some(value) => Ok(value),
        None => env::var(name).map_err(|_| format!("missing {}", name).into()),
    }
}

/// Run this job overnight, before the animals sync.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let _ = dotenvy::from_path(Path::new(format!(".env/{}.env", args.env).as_str()));

    let credentials = Credentials {
        shelter_id: arg_or_env(args.shelter_id, "PETPOINT_SHELTER_ID")?,
        username: arg_or_env(args.username, "PETPOINT_USERNAME")?,
        password: arg_or_env(args.password, "PETPOINT_PASSWORD")?,
    };

    // start from an empty staging directory so a leftover file from an
    // earlier run cannot be mistaken for today's download
    let staging = env::temp_dir().join("petpoint_reports");
    let _ = fs::remove_dir_all(&staging);
    fs::create_dir_all(&staging)?;

    let session = PortalSession::sign_in(&credentials)?;
    info!("signed in to the portal as shelter {}", credentials.shelter_id);

    let output_dir = Path::new(&args.output_directory);
    for report in [Report::IntakeExtended, Report::IntakeWithResultsExtended] {
        session.download_report(report, &staging)?;
        let path = wait_for_download_and_move(&staging, output_dir, args.download_timeout)?;
        info!("downloaded '{}' to {}", report.title(), path.display());
    }

    Ok(())
}

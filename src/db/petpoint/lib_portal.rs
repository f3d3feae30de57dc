use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use jiff::{ToSpan, Zoned};
use log::info;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use reqwest_cookie_store::CookieStoreMutex;
use thiserror::Error;

const SIGNIN_URL: &str = "https://sms.petpoint.com/sms3/forms/signinout.aspx";
const REPORTS_URL: &str = "https://repstd.petpoint.com/Reports/Intake";
const UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// The portal's date inputs want `6/15/2023 4:05 PM`, no padding.
const PORTAL_DATE_FORMAT: &str = "%-m/%-d/%Y %-I:%-M %p";

/// Reports cover intakes from this many days back up to now.
const LOOKBACK_DAYS: i64 = 730;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("sign in rejected for shelter {0}")]
    SignIn(String),
    #[error("request for report '{report}' failed with status {status}")]
    Report {
        report: &'static str,
        status: StatusCode,
    },
    #[error("no .xls file appeared within {0}s")]
    DownloadTimeout(u64),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone)]
pub struct Credentials {
    pub shelter_id: String,
    pub username: String,
    pub password: String,
}

/// The two intake reports the portal publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    IntakeExtended,
    IntakeWithResultsExtended,
}

impl Report {
    /// Title of the report on the portal's Intake page.
    pub fn title(&self) -> &'static str {
        match self {
            Report::IntakeExtended => "Animal: Intake Extended",
            Report::IntakeWithResultsExtended => "Animal: Intake with Results Extended",
        }
    }

    /// Name the portal gives the exported file.
    pub fn filename(&self) -> &'static str {
        match self {
            Report::IntakeExtended => "AnimalIntakeExtended.xls",
            Report::IntakeWithResultsExtended => "AnimalIntakeWithResultsExtended.xls",
        }
    }

    fn export_path(&self) -> &'static str {
        match self {
            Report::IntakeExtended => "AnimalIntakeExtended.aspx",
            Report::IntakeWithResultsExtended => "AnimalIntakeWithResultsExtended.aspx",
        }
    }

    /// Query parameter carrying the start of the intake window.
    fn date_param(&self) -> &'static str {
        match self {
            Report::IntakeExtended => "Date_IntakeStart",
            Report::IntakeWithResultsExtended => "IntakeDateFrom",
        }
    }
}

/// An authenticated session against the portal. The cookie jar carries the
/// sign-in for every report request that follows.
pub struct PortalSession {
    client: Client,
}

impl PortalSession {
    pub fn sign_in(credentials: &Credentials) -> Result<PortalSession, FetchError> {
        let jar = Arc::new(CookieStoreMutex::default());
        let client = Client::builder().cookie_provider(jar).build()?;
        let response = client
            .post(SIGNIN_URL)
            .header(USER_AGENT, UA)
            .form(&[
                (
                    "cphSearchArea$txtShelterPetFinderId",
                    credentials.shelter_id.as_str(),
                ),
                ("cphSearchArea$txtUserName", credentials.username.as_str()),
                ("cphSearchArea$txtPassword", credentials.password.as_str()),
                ("cphSearchArea$btn_SignIn", "Sign In"),
            ])
            .send()?;
        // a rejected sign-in lands back on the sign-in form
        if response.status() != StatusCode::OK || response.url().path().ends_with("signinout.aspx")
        {
            return Err(FetchError::SignIn(credentials.shelter_id.clone()));
        }
        Ok(PortalSession { client })
    }

    /// Request a report export with the intake window starting
    /// `LOOKBACK_DAYS` ago, and save the body under `staging_dir` the way a
    /// browser download would land there.
    pub fn download_report(
        &self,
        report: Report,
        staging_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let start = Zoned::now().saturating_sub(LOOKBACK_DAYS.days());
        let start = start.strftime(PORTAL_DATE_FORMAT).to_string();
        let mut request = self
            .client
            .get(format!("{}/{}", REPORTS_URL, report.export_path()))
            .header(USER_AGENT, UA)
            .query(&[(report.date_param(), start.as_str()), ("validate", "1")]);
        if report == Report::IntakeWithResultsExtended {
            request = request.query(&[("ActiveAnimals", "1")]);
        }
        let response = request.send()?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Report {
                report: report.title(),
                status: response.status(),
            });
        }
        fs::create_dir_all(staging_dir)?;
        let path = staging_dir.join(report.filename());
        fs::write(&path, response.text()?)?;
        info!("saved '{}' to {}", report.title(), path.display());
        Ok(path)
    }
}

/// Poll `staging_dir` once a second until a `.xls` file shows up, then move
/// it into `output_dir`. Bounded by `timeout_secs`; no retry past that.
pub fn wait_for_download_and_move(
    staging_dir: &Path,
    output_dir: &Path,
    timeout_secs: u64,
) -> Result<PathBuf, FetchError> {
    let re = Regex::new(r".+\.xls$").unwrap();
    for _ in 0..timeout_secs {
        let candidate = fs::read_dir(staging_dir)?
            .filter_map(|e| e.ok())
            .find(|e| re.is_match(&e.file_name().to_string_lossy()));
        if let Some(entry) = candidate {
            let target = output_dir.join(entry.file_name());
            // rename fails across filesystems
            if fs::rename(entry.path(), &target).is_err() {
                fs::copy(entry.path(), &target)?;
                fs::remove_file(entry.path())?;
            }
            info!(
                "moved {} to {}",
                entry.file_name().to_string_lossy(),
                output_dir.display()
            );
            return Ok(target);
        }
        thread::sleep(Duration::from_secs(1));
    }
    Err(FetchError::DownloadTimeout(timeout_secs))
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::error::Error;

    #[test]
    fn moves_file_already_present() -> Result<(), Box<dyn Error>> {
        let staging = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        fs::write(
            staging.path().join("AnimalIntakeExtended.xls"),
            "Animal ID\n",
        )?;
        let moved = wait_for_download_and_move(staging.path(), output.path(), 5)?;
        assert_eq!(moved, output.path().join("AnimalIntakeExtended.xls"));
        assert!(moved.exists());
        assert!(!staging.path().join("AnimalIntakeExtended.xls").exists());
        Ok(())
    }

    #[test]
    fn times_out_on_empty_directory() {
        let staging = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let res = wait_for_download_and_move(staging.path(), output.path(), 1);
        assert!(matches!(res, Err(FetchError::DownloadTimeout(1))));
    }

    #[test]
    fn ignores_files_with_other_extensions() {
        let staging = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(staging.path().join("notes.csv"), "x\n").unwrap();
        let res = wait_for_download_and_move(staging.path(), output.path(), 1);
        assert!(matches!(res, Err(FetchError::DownloadTimeout(1))));
    }

    #[ignore]
    #[test]
    fn sign_in_live() -> Result<(), Box<dyn Error>> {
        dotenvy::from_path(Path::new(".env/test.env")).unwrap();
        let credentials = Credentials {
            shelter_id: std::env::var("PETPOINT_SHELTER_ID")?,
            username: std::env::var("PETPOINT_USERNAME")?,
            password: std::env::var("PETPOINT_PASSWORD")?,
        };
        let session = PortalSession::sign_in(&credentials)?;
        let staging = tempfile::tempdir()?;
        session.download_report(Report::IntakeExtended, staging.path())?;
        Ok(())
    }
}

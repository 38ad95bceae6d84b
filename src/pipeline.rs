use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};
use url::Url;

use crate::assets::{self, DATASHEET_FILE_NAME};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::output;
use crate::parser::{self, image};

/// What happened to one output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved(path) => write!(f, "saved to {}", path.display()),
            Outcome::Skipped(reason) => write!(f, "skipped ({reason})"),
            Outcome::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Per-artifact results of one run. Each artifact succeeds or fails on its own,
/// except that a failed page fetch leaves all three untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub folder_created: bool,
    pub page_error: Option<String>,
    pub tables: Outcome,
    pub image: Outcome,
    pub datasheet: Outcome,
}

impl RunReport {
    fn aborted(folder_created: bool, message: String) -> Self {
        let skipped = || Outcome::Skipped("page could not be fetched".into());
        RunReport {
            folder_created,
            page_error: Some(message),
            tables: skipped(),
            image: skipped(),
            datasheet: skipped(),
        }
    }

    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(e) = &self.page_error {
            writeln!(f, "Error fetching the page: {e}")?;
        }
        writeln!(f, "Table data: {}", self.tables)?;
        writeln!(f, "Image:      {}", self.image)?;
        writeln!(f, "Datasheet:  {}", self.datasheet)
    }
}

/// Validated inputs for a run. Building one is the only step that can fail the
/// whole process.
struct Job {
    page_url: Url,
    image_selector: scraper::Selector,
    datasheet_url: Option<Url>,
}

impl Job {
    fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Job {
            page_url: assets::parse_url(&settings.page_url)?,
            image_selector: image::parse_selector(&settings.image_selector)?,
            datasheet_url: settings.datasheet_url().map(assets::parse_url).transpose()?,
        })
    }
}

/// fetch → parse → extract → save, then the image and the datasheet.
///
/// Returns `Err` only for invalid settings; every failure after that is
/// logged and recorded in the report.
pub async fn run(settings: &Settings) -> Result<RunReport> {
    let job = Job::from_settings(settings)?;
    let fetcher = Fetcher::new(settings)?;
    let dir = settings.output_dir.as_path();

    let folder_created = match output::ensure_folder(dir) {
        Ok(created) => created,
        Err(e) => {
            warn!("Could not create output folder: {}", e);
            false
        }
    };

    info!("Fetching {}", job.page_url);
    let page = match fetcher.fetch_page(&job.page_url).await {
        Ok(bytes) => bytes,
        // Reported once, by the run summary.
        Err(e) => return Ok(RunReport::aborted(folder_created, e.to_string())),
    };

    // The document is dropped at the end of this block; it is not Send and
    // must not live across the downloads below.
    let data = {
        let doc = parser::parse_document(&page);
        parser::extract_page(&doc, &job.image_selector)
    };

    let tables = if data.rows.is_empty() {
        info!("No table data extracted");
        Outcome::Skipped("no table data extracted".into())
    } else {
        match output::save_table_data(dir, settings.table_format, &data.rows) {
            Ok(path) => Outcome::Saved(path),
            Err(e) => {
                warn!("Error saving table data: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    };

    let image = match data.image_url.as_deref() {
        None => {
            info!("Product image URL not found");
            Outcome::Skipped("product image URL not found".into())
        }
        Some(src) => match assets::resolve_url(&job.page_url, src) {
            Ok(url) => {
                let path = dir.join(assets::image_file_name(&url));
                download(&fetcher, &url, path).await
            }
            Err(e) => {
                warn!("Error resolving image URL: {}", e);
                Outcome::Failed(e.to_string())
            }
        },
    };

    let datasheet = match &job.datasheet_url {
        None => {
            info!("Product datasheet URL not found");
            Outcome::Skipped("no datasheet URL configured".into())
        }
        Some(url) => download(&fetcher, url, dir.join(DATASHEET_FILE_NAME)).await,
    };

    Ok(RunReport {
        folder_created,
        page_error: None,
        tables,
        image,
        datasheet,
    })
}

async fn download(fetcher: &Fetcher, url: &Url, path: PathBuf) -> Outcome {
    match fetcher.download(url, &path).await {
        Ok(_) => Outcome::Saved(path),
        Err(e) => {
            warn!("Error downloading {}: {}", url, e);
            Outcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_rejects_bad_selector() {
        let settings = Settings {
            image_selector: "img[[".into(),
            ..Settings::default()
        };
        assert!(Job::from_settings(&settings).is_err());
    }

    #[test]
    fn job_rejects_bad_page_url() {
        let settings = Settings {
            page_url: "/relative/only".into(),
            ..Settings::default()
        };
        assert!(Job::from_settings(&settings).is_err());
    }

    #[test]
    fn job_without_datasheet() {
        let settings = Settings {
            datasheet_url: String::new(),
            ..Settings::default()
        };
        let job = Job::from_settings(&settings).unwrap();
        assert!(job.datasheet_url.is_none());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(
            Outcome::Saved(PathBuf::from("out/table_data.txt")).to_string(),
            "saved to out/table_data.txt"
        );
        assert_eq!(Outcome::Skipped("x".into()).to_string(), "skipped (x)");
        assert_eq!(Outcome::Failed("boom".into()).to_string(), "failed: boom");
    }

    #[test]
    fn page_error_appears_once_in_summary() {
        let report = RunReport::aborted(true, "http://x/p returned HTTP 404 Not Found".into());
        let summary = report.to_string();
        assert_eq!(summary.matches("404 Not Found").count(), 1);
        assert!(summary.starts_with("Error fetching the page: "));
        assert!(summary.contains("Datasheet:  skipped (page could not be fetched)"));
    }

    #[test]
    fn summary_without_page_error() {
        let report = RunReport {
            folder_created: false,
            page_error: None,
            tables: Outcome::Saved(PathBuf::from("out/table_data.txt")),
            image: Outcome::Skipped("product image URL not found".into()),
            datasheet: Outcome::Failed("timed out".into()),
        };
        assert_eq!(
            report.to_string(),
            "Table data: saved to out/table_data.txt\n\
             Image:      skipped (product image URL not found)\n\
             Datasheet:  failed: timed out\n"
        );
    }

    #[tokio::test]
    async fn invalid_settings_fail_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().join("never"),
            image_selector: "img[[".into(),
            ..Settings::default()
        };
        assert!(run(&settings).await.is_err());
        assert!(!dir.path().join("never").exists());
    }
}

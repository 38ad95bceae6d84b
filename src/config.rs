use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::output::TableFormat;
use crate::parser::image::DEFAULT_IMAGE_SELECTOR;

const ENV_PREFIX: &str = "PRODUCT";
const CONFIG_FILE: &str = "product_scraper";

pub const DEFAULT_PAGE_URL: &str = "https://www.sick.com/in/en/catalog/products/detection-sensors/photoelectric-sensors/w4/wtb4fp-22161120a00/p/p661408?tab=detail";
pub const DEFAULT_OUTPUT_DIR: &str = "product_details";
// Points at one specific product's datasheet, not at whatever page is scraped.
pub const DEFAULT_DATASHEET_URL: &str =
    "https://cdn.sick.com/media/pdf/8/08/408/dataSheet_WTB4FP-22161120A00_1222998_en.pdf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub page_url: String,
    pub output_dir: PathBuf,
    pub image_selector: String,
    /// Empty means no datasheet is configured.
    pub datasheet_url: String,
    pub table_format: TableFormat,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            page_url: DEFAULT_PAGE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image_selector: DEFAULT_IMAGE_SELECTOR.to_string(),
            datasheet_url: DEFAULT_DATASHEET_URL.to_string(),
            table_format: TableFormat::Tsv,
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Defaults, then `product_scraper.{toml,json,...}` (or `file` when given),
    /// then `PRODUCT_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("page_url", DEFAULT_PAGE_URL)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("image_selector", DEFAULT_IMAGE_SELECTOR)?
            .set_default("datasheet_url", DEFAULT_DATASHEET_URL)?
            .set_default("table_format", "tsv")?
            .set_default("user_agent", default_user_agent())?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn datasheet_url(&self) -> Option<&str> {
        Some(self.datasheet_url.trim()).filter(|url| !url.is_empty())
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

//! Download client for the MOI actual-price-registration (實價登錄) portal.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::domain::Season;
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://plvr.land.moi.gov.tw";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ARCHIVE_FILE_NAME: &str = "lvr_landcsv.zip";

/// Anything that can produce the raw ZIP bytes of a season.
pub trait ArchiveSource {
    fn fetch(&self, season: Season) -> Result<Vec<u8>, AppError>;
}

pub struct LvrClient {
    client: Client,
    base_url: String,
}

impl LvrClient {
    /// Build a client from the environment (`.env` is honored).
    ///
    /// - `LVR_BASE_URL` (default: the public portal)
    /// - `LVR_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("LVR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env_secs("LVR_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        Self::new(base_url, Duration::from_secs(timeout))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn download_url(&self) -> String {
        format!("{}/DownloadSeason", self.base_url)
    }
}

impl ArchiveSource for LvrClient {
    fn fetch(&self, season: Season) -> Result<Vec<u8>, AppError> {
        let url = self.download_url();
        let season_label = season.to_string();
        info!(%url, season = %season_label, "downloading season archive");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("season", season_label.as_str()),
                ("type", "zip"),
                ("fileName", ARCHIVE_FILE_NAME),
            ])
            .send()
            .map_err(|e| AppError::upstream(format!("Archive download failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Archive download failed with status {}.",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| AppError::upstream(format!("Failed to read archive body: {e}")))?;
        info!(bytes = bytes.len(), "season archive downloaded");
        Ok(bytes.to_vec())
    }
}

/// Read a seconds value from the environment, falling back to `default`.
pub(crate) fn env_secs(name: &str, default: u64) -> Result<u64, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::input(format!("`{name}` must be a whole number of seconds, got '{raw}'."))),
        Err(_) => Ok(default),
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::{
    APP_TYPE, BASE_URL, CATALOG_DEST, CURRENCY, FAN_OUT_PAUSE_MS, MAX_RESULTS, PAGE_SIZE, REGIONS,
    REQUEST_TIMEOUT_SECS, SIZING_DEST, USER_AGENT,
};

/// Everything about the remote API and the run that isn't the query itself.
/// `Config::default()` mirrors the live search API.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Products per catalog page, fixed by the remote API.
    pub page_size: usize,
    /// Deepest result the popularity sort will enumerate.
    pub max_results: usize,
    pub regions: String,
    pub sizing_dest: String,
    pub catalog_dest: String,
    pub app_type: u8,
    pub currency: String,
    pub user_agent: String,
    pub fan_out_pause: Duration,
    pub request_timeout: Duration,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            page_size: PAGE_SIZE,
            max_results: MAX_RESULTS,
            regions: REGIONS.into(),
            sizing_dest: SIZING_DEST.into(),
            catalog_dest: CATALOG_DEST.into(),
            app_type: APP_TYPE,
            currency: CURRENCY.into(),
            user_agent: USER_AGENT.into(),
            fan_out_pause: Duration::from_millis(FAN_OUT_PAUSE_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_fan_out_pause(mut self, pause: Duration) -> Self {
        self.fan_out_pause = pause;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Full url of the search endpoint both requests go to.
    pub fn search_url(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}search", self.base_url)
        } else {
            format!("{}/search", self.base_url)
        }
    }
}

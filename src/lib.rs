//! Marketplace listing scraper.
//! Sizes a search query, fetches every catalog page concurrently and writes the
//! products to a `;` separated csv file.

mod config;
mod error;
mod macros;
mod model;
pub mod output;
mod parse;
mod plan;
pub mod process;
pub mod request;

pub use config::Config;
pub use error::{Error, Result};
pub use model::ProductRecord;
pub use plan::SessionPlan;

const BASE_URL: &str = "https://search.wb.ru/exactmatch/ru/common/v4/";
/// The API never returns more than this many products per page.
const PAGE_SIZE: usize = 100;
/// Popularity sorted results can't be enumerated past this depth.
const MAX_RESULTS: usize = 6000;
const REGIONS: &str = "80,64,38,4,115,83,33,68,70,69,30,86,75,40,1,66,48,110,31,22,71,114";
const SIZING_DEST: &str = "-1257786";
const CATALOG_DEST: &str = "-1075831,-77677,-398551,12358499";
const APP_TYPE: u8 = 1;
const CURRENCY: &str = "rub";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
/// Pause between sizing and fan-out, in milliseconds.
const FAN_OUT_PAUSE_MS: u64 = 1000;
/// Per request timeout, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

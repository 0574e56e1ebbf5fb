use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};

use crate::{Config, Result};

/// Where the raw search responses come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Body of the filters-only search, which carries `data.total`.
    async fn sizing_body(&self, query: &str) -> Result<String>;

    /// Body of the 1-based, popularity sorted catalog page `page`.
    async fn page_body(&self, query: &str, page: usize) -> Result<String>;
}

/// `CatalogSource` backed by the live search API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    config: Config,
}

impl HttpCatalog {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    async fn get_text(&self, params: &[(&str, String)]) -> Result<String> {
        let res = self
            .client
            .get(self.config.search_url())
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        let body = res.text().await?;
        Ok(body)
    }

    fn common_params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("appType", self.config.app_type.to_string()),
            ("curr", self.config.currency.clone()),
            ("query", query.to_string()),
            ("regions", self.config.regions.clone()),
            ("spp", "0".into()),
            ("suppressSpellcheck", "false".into()),
        ]
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn sizing_body(&self, query: &str) -> Result<String> {
        let mut params = self.common_params(query);
        params.push(("dest", self.config.sizing_dest.clone()));
        params.push(("resultset", "filters".into()));

        self.get_text(&params).await
    }

    async fn page_body(&self, query: &str, page: usize) -> Result<String> {
        let mut params = self.common_params(query);
        params.push(("dest", self.config.catalog_dest.clone()));
        params.push(("page", page.to_string()));
        params.push(("resultset", "catalog".into()));
        params.push(("sort", "popular".into()));

        self.get_text(&params).await
    }
}

use std::{path::PathBuf, sync::Arc};

use chrono::{Local, NaiveDate};
use tokio::{sync::mpsc, task::JoinSet};

use crate::output::write_products;
use crate::parse::{parse_products, parse_total};
use crate::request::{CatalogSource, HttpCatalog};
use crate::{info_time, Config, Error, ProductRecord, Result, SessionPlan};

/// Scrapes everything the live search API returns for `query` and writes it to
/// `"<query> <today>.csv"` in the working directory.
pub async fn process_query(query: &str) -> Result<PathBuf> {
    let config = Config::default();
    let source = Arc::new(HttpCatalog::new(config.clone())?);
    run(source, query, &config, Local::now().date_naive()).await
}

/// Sizing, then the courtesy pause, then the concurrent page fetches, then the file.
/// Nothing is written unless every page fetch went through.
pub async fn run(
    source: Arc<dyn CatalogSource>,
    query: &str,
    config: &Config,
    date: NaiveDate,
) -> Result<PathBuf> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    let start_time = Local::now();
    info_time!("Started scraping: {query}");

    let plan = resolve_plan(source.as_ref(), query, config).await?;
    tokio::time::sleep(config.fan_out_pause).await;

    let products = collect_products(source, query, plan).await?;
    info_time!(
        start_time,
        "Finished PROCESSING {} pages, collected {} products.",
        plan.session_count,
        products.len()
    );

    write_products(&products, query, &config.output_dir, date).await
}

/// Requests the result count for `query` and derives how many pages to fetch.
pub async fn resolve_plan(
    source: &dyn CatalogSource,
    query: &str,
    config: &Config,
) -> Result<SessionPlan> {
    let body = source.sizing_body(query).await?;
    let total = parse_total(&body)?;
    let plan = SessionPlan::from_total(total, config);

    if plan.is_truncated() {
        info_time!(
            "Total found {total} products. Gathering data for the {} most popular products.",
            config.max_results
        );
    } else {
        info_time!("Total found {total} products. Gathering data for all products.");
    }
    tracing::debug!(session_count = plan.session_count, "resolved session plan");

    Ok(plan)
}

/// Fetches every page of the plan concurrently. Each page sends its products through a
/// `mpsc::channel` to a single collector.
/// The first failed fetch aborts the rest and is returned.
pub async fn collect_products(
    source: Arc<dyn CatalogSource>,
    query: &str,
    plan: SessionPlan,
) -> Result<Vec<ProductRecord>> {
    let (product_tx, product_rx) = mpsc::channel(plan.session_count.max(1));
    let collect_handle = tokio::spawn(async move { collect_entries(product_rx).await });

    let mut task_set = JoinSet::new();
    for page in plan.pages() {
        task_set.spawn({
            let source = source.clone();
            let query = query.to_string();
            let product_tx = product_tx.clone();

            async move { fetch_page(source.as_ref(), &query, page, product_tx).await }
        });
    }
    // The collector stops once the last fetch drops its sender.
    drop(product_tx);

    while let Some(task) = task_set.join_next().await {
        // Returning here drops the `JoinSet`, which aborts the fetches still running.
        task??;
    }

    let products = collect_handle.await?;
    Ok(products)
}

/// Requests a single page and sends its products to the collector.
async fn fetch_page(
    source: &dyn CatalogSource,
    query: &str,
    page: usize,
    product_tx: mpsc::Sender<Vec<ProductRecord>>,
) -> Result<()> {
    tracing::debug!(page, "requesting page");
    let body = source.page_body(query, page).await?;

    let products = parse_products(&body, page);
    if products.is_empty() {
        info_time!("found EMPTY page {page}");
        return Ok(());
    }
    product_tx.send(products).await?;
    Ok(())
}

/// Appends every batch it receives, in arrival order, until all senders are gone.
async fn collect_entries(mut product_rx: mpsc::Receiver<Vec<ProductRecord>>) -> Vec<ProductRecord> {
    let start_time = Local::now();
    let mut col = Vec::new();

    while let Some(batch) = product_rx.recv().await {
        tracing::debug!(len = batch.len(), "received a batch");
        col.extend(batch);
    }

    info_time!(start_time, "DONE collecting: {} products", col.len());
    col
}

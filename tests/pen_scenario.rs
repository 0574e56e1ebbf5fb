//! Runs the whole pipeline against a local stand-in for the search API.

use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::NaiveDate;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use wbscrap::{
    output::read_products,
    process::run,
    request::HttpCatalog,
    Config, Error,
};

const PRODUCTS_PER_FULL_PAGE: u64 = 100;

/// Answers `resultset=filters` with `total` and `page=N` with the products of that page.
/// Pages past `total` come back with an empty product list.
async fn spawn_api(total: u64, fail_page: Option<u64>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));

    tokio::spawn({
        let requests = requests.clone();
        async move {
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                requests.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(answer(stream, total, fail_page));
            }
        }
    });

    (format!("http://{addr}/exactmatch/ru/common/v4/"), requests)
}

async fn answer(mut stream: TcpStream, total: u64, fail_page: Option<u64>) {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf[read..]).await.unwrap();
        if n == 0 {
            return;
        }
        read += n;
    }
    let head = String::from_utf8_lossy(&buf[..read]).into_owned();
    let request_line = head.lines().next().unwrap_or_default();

    let (status, body) = if request_line.contains("resultset=filters") {
        ("200 OK", format!(r#"{{"data":{{"total":{total},"filters":[]}}}}"#))
    } else {
        let page: u64 = request_line
            .split(['?', '&', ' '])
            .find_map(|kv| kv.strip_prefix("page="))
            .and_then(|n| n.parse().ok())
            .unwrap();
        if Some(page) == fail_page {
            ("500 Internal Server Error", String::new())
        } else {
            ("200 OK", page_body(page, total))
        }
    };

    let res = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(res.as_bytes()).await;
}

fn page_body(page: u64, total: u64) -> String {
    let first = (page - 1) * PRODUCTS_PER_FULL_PAGE;
    let last = (page * PRODUCTS_PER_FULL_PAGE).min(total);
    let products: Vec<_> = (first..last)
        .map(|i| {
            serde_json::json!({
                "name": format!("Ручка гелевая {i}"),
                "id": 10_000_000 + i,
                "brandId": 6049,
                "supplierId": 18136 + i % 5,
                "feedbacks": i * 3,
                "rating": 4.0 + (i % 10) as f64 / 10.0,
                "salePriceU": 3900,
            })
        })
        .collect();
    serde_json::json!({ "state": 0, "data": { "products": products } }).to_string()
}

fn config(base_url: String, dir: &std::path::Path) -> Config {
    Config::default()
        .with_base_url(base_url)
        .with_fan_out_pause(Duration::from_millis(10))
        .with_request_timeout(Duration::from_secs(5))
        .with_output_dir(dir)
}

#[tokio::test]
async fn pen_query_writes_every_product() {
    let (base_url, requests) = spawn_api(450, None).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(base_url, dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let source = Arc::new(HttpCatalog::new(config.clone()).unwrap());

    let path = run(source, "pen", &config, date).await.unwrap();

    // Sizing plus five pages.
    assert_eq!(requests.load(Ordering::SeqCst), 6);
    assert_eq!(path, dir.path().join("pen 2024-03-09.csv"));

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.trim_start_matches('\u{feff}').lines();
    assert_eq!(
        lines.next(),
        Some("name;id;brandId;supplierId;feedbackCount;rating")
    );
    assert_eq!(lines.count(), 450);

    let products = read_products(&path).await.unwrap();
    let ids: BTreeSet<_> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, (10_000_000..10_000_450).collect());

    let sample = products.iter().find(|p| p.id == 10_000_123).unwrap();
    assert_eq!(sample.name, "Ручка гелевая 123");
    assert_eq!(sample.supplier_id, 18139);
    assert_eq!(sample.feedback_count, 369);
    assert_eq!(sample.rating.as_f64(), Some(4.0 + 3.0 / 10.0));
}

#[tokio::test]
async fn failed_page_leaves_no_file() {
    let (base_url, _requests) = spawn_api(450, Some(3)).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(base_url, dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let source = Arc::new(HttpCatalog::new(config.clone()).unwrap());

    let res = run(source, "pen", &config, date).await;

    assert!(matches!(res, Err(Error::Transport(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

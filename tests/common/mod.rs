//! Common test utilities for integration tests.
//!
//! Provides a recording presentation sink, page-response fixtures, and
//! polling helpers shared by the integration suites.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use marquee::catalog::{CollectionSink, PageController};
use marquee::error::NetworkError;
use marquee::models::Title;
use serde_json::{json, Value};

/// Sink that records every snapshot and failure it receives.
#[derive(Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<Vec<Title>>>,
    failures: Mutex<Vec<NetworkError>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots received so far, oldest first.
    pub fn updates(&self) -> Vec<Vec<Title>> {
        self.updates.lock().unwrap().clone()
    }

    /// All failures received so far, oldest first.
    pub fn failures(&self) -> Vec<NetworkError> {
        self.failures.lock().unwrap().clone()
    }
}

impl CollectionSink for RecordingSink {
    fn on_collection_updated(&self, items: &[Title]) {
        self.updates.lock().unwrap().push(items.to_vec());
    }

    fn on_fetch_failed(&self, error: &NetworkError) {
        self.failures.lock().unwrap().push(error.clone());
    }
}

/// Build a page-response JSON body with the given ids.
pub fn page_json(page: u32, total_pages: u32, ids: &[i64]) -> Value {
    let results: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Title {}", id),
                "release_date": "2024-06-01",
                "poster_path": format!("/poster-{}.jpg", id),
                "vote_average": 7.0
            })
        })
        .collect();
    json!({
        "page": page,
        "results": results,
        "total_pages": total_pages,
        "total_results": 100
    })
}

/// Poll until the controller has no fetch outstanding.
pub async fn wait_until_idle(controller: &PageController) {
    for _ in 0..500 {
        if !controller.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("controller never returned to idle");
}

/// A minimal valid PNG for poster fixtures.
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::new(2, 2);
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Extract just the ids from a slice of titles.
pub fn ids(items: &[Title]) -> Vec<i64> {
    items.iter().map(|t| t.id).collect()
}

/// Initialize tracing output for a test run (no-op if already set).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marquee=debug")),
        )
        .with_test_writer()
        .try_init();
}

// tests/pipeline.rs
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use lead_extractor::phone::is_canonical;
use lead_extractor::synthetic::curated_names;
use lead_extractor::{
    export_to_excel, generate_with, ExtractorConfig, Lead, LeadExtractor, MockFetcher,
    XlsxWriter,
};

const BASE: &str = "https://listings.test";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("lead_extractor_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn extractor(mock: MockFetcher) -> (LeadExtractor, Arc<MockFetcher>) {
    let mock = Arc::new(mock);
    let config = ExtractorConfig::default().with_base_url(BASE);
    (LeadExtractor::with_fetcher(config, mock.clone()), mock)
}

const RESULT_BOX_PAGE: &str = r#"
<html><body>
  <div class="resultbox_info">
    <h2>Mahesh Lunch Home</h2>
    <span class="callbutton" data-phone="919820012345">Show Number</span>
    <div class="resultbox_address">Cawasji Patel Street, Fort</div>
    <a href="/rd?redirectUrl=https%3A%2F%2Fmaheshlunchhome.example.com">Website</a>
  </div>
  <div class="resultbox_info"><p>sponsored</p></div>
  <div class="resultbox_info">
    <h2>Gajalee</h2>
  </div>
</body></html>
"#;

#[tokio::test]
async fn live_page_is_parsed() {
    let (extractor, mock) = extractor(
        MockFetcher::new().with_page(format!("{BASE}/mumbai/restaurants"), RESULT_BOX_PAGE),
    );

    let leads = extractor.extract_leads("Restaurants", "Mumbai").await;

    assert_eq!(mock.requests(), vec![format!("{BASE}/mumbai/restaurants")]);
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].name, "Mahesh Lunch Home");
    assert_eq!(leads[0].phone, "+91 98200 12345");
    assert_eq!(
        leads[0].website.as_deref(),
        Some("https://maheshlunchhome.example.com")
    );
    assert_eq!(leads[1].address, "Mumbai (exact address not available)");
    assert!(leads.iter().all(|l| l.email.is_none()));
}

#[tokio::test]
async fn fetch_failure_falls_back_to_synthetic() {
    let (extractor, _) = extractor(
        MockFetcher::new().with_failure(format!("{BASE}/mumbai/restaurants"), "HTTP 503"),
    );

    let leads = extractor.extract_leads("restaurants", "mumbai").await;
    let curated = curated_names("restaurants", "mumbai");

    assert!((10..=20).contains(&leads.len()));
    for lead in &leads {
        assert!(
            lead.name.contains("mumbai") || curated.contains(&lead.name.as_str()),
            "unexpected name {}",
            lead.name
        );
        assert!(is_canonical(&lead.phone), "phone {}", lead.phone);
        assert_eq!(lead.category.as_deref(), Some("restaurants"));
    }
}

#[tokio::test]
async fn empty_page_fallback_equals_generator_output() {
    let (extractor, _) = extractor(
        MockFetcher::new().with_page(format!("{BASE}/goa/hotels"), "<html><body>No results</body></html>"),
    );

    let leads = extractor
        .extract_leads_with("hotels", "goa", &mut StdRng::seed_from_u64(2024))
        .await;
    let expected = generate_with("hotels", "goa", &mut StdRng::seed_from_u64(2024));

    assert!(!leads.is_empty());
    assert_eq!(leads, expected);
}

#[tokio::test]
async fn disabled_fallback_returns_empty() {
    let mock = Arc::new(MockFetcher::new());
    let config = ExtractorConfig::default()
        .with_base_url(BASE)
        .without_fallback();
    let extractor = LeadExtractor::with_fetcher(config, mock);

    assert!(extractor.extract_leads("plumbers", "pune").await.is_empty());
}

#[tokio::test]
async fn concurrent_searches_are_independent() {
    let mock = MockFetcher::new()
        .with_page(format!("{BASE}/mumbai/restaurants"), RESULT_BOX_PAGE)
        .with_failure(format!("{BASE}/new-delhi/restaurants"), "timeout");
    let (extractor, _) = extractor(mock);
    let extractor = Arc::new(extractor);

    let handles: Vec<_> = ["Mumbai", "New Delhi"]
        .into_iter()
        .map(|location| {
            let extractor = Arc::clone(&extractor);
            tokio::spawn(async move { extractor.extract_leads("restaurants", location).await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(results[0].len(), 2);
    assert!(results[1].len() >= 10);
    assert!(results[1].iter().all(|l| l.name.contains("New Delhi")));
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let config = ExtractorConfig::default().with_base_url("http://127.0.0.1:9");
    let extractor = LeadExtractor::new(config);

    let leads = extractor.extract_leads("electricians", "Surat").await;
    assert!((10..=20).contains(&leads.len()));
}

#[tokio::test]
async fn not_found_status_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    let extractor = LeadExtractor::new(ExtractorConfig::default().with_base_url(base));
    let leads = extractor.extract_leads("restaurants", "mumbai").await;

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /mumbai/restaurants HTTP/1.1"));
    assert!((10..=20).contains(&leads.len()));
    assert!(leads.iter().all(|l| is_canonical(&l.phone)));
}

#[test]
fn export_writes_xlsx_file() {
    let dir = tmp_dir("export");
    let leads = vec![
        Lead::new("One", "9876543210", "a"),
        Lead::new("Two", "+91-98765-43210", "b"),
        Lead::new("Three", "098765 43210", "c"),
    ];

    let filename = export_to_excel(&leads, "fine dining", "navi mumbai", &dir, &XlsxWriter).unwrap();

    assert_eq!(filename, "JustDial_fine_dining_navi_mumbai_Leads.xlsx");
    let path = dir.join(&filename);
    assert!(path.exists());
    assert!(fs::metadata(&path).unwrap().len() > 0);
    // xlsx is a zip archive
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn export_of_empty_set_still_writes_file() {
    let dir = tmp_dir("export_empty");

    let filename = export_to_excel(&[], "restaurants", "mumbai", &dir, &XlsxWriter).unwrap();

    assert_eq!(filename, "JustDial_restaurants_mumbai_Leads.xlsx");
    let bytes = fs::read(dir.join(&filename)).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn export_to_missing_directory_fails() {
    let mut dir = tmp_dir("missing_parent");
    dir.push("does/not/exist");
    let leads = vec![Lead::new("One", "9876543210", "a")];

    assert!(export_to_excel(&leads, "a", "b", &dir, &XlsxWriter).is_err());
}

use std::io::Read;

use chrono::Utc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thpu_backend::content::build_whitepaper;
use thpu_backend::export::{ApiClient, ExportError, ExportFormat};

async fn serve_paper(mock_server: &MockServer) -> thpu_backend::models::WhitePaper {
    let paper = build_whitepaper();
    Mock::given(method("GET"))
        .and(path("/api/whitepaper"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&paper))
        .mount(mock_server)
        .await;
    paper
}

#[tokio::test]
async fn client_fetches_the_served_paper() {
    let mock_server = MockServer::start().await;
    let served = serve_paper(&mock_server).await;

    let client = ApiClient::new(&format!("{}/api", mock_server.uri())).unwrap();
    let fetched = client.fetch_whitepaper().await.unwrap();

    assert_eq!(fetched, served);
}

#[tokio::test]
async fn client_tolerates_a_trailing_slash() {
    let mock_server = MockServer::start().await;
    serve_paper(&mock_server).await;

    let client = ApiClient::new(&format!("{}/api/", mock_server.uri())).unwrap();
    assert!(client.fetch_whitepaper().await.is_ok());
}

#[tokio::test]
async fn error_status_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/whitepaper"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"detail": "Error retrieving white paper"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&format!("{}/api", mock_server.uri())).unwrap();
    let err = client.fetch_whitepaper().await.unwrap_err();

    assert!(matches!(err, ExportError::Status { status: 500, .. }));
}

#[tokio::test]
async fn undecodable_body_is_an_http_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/whitepaper"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&format!("{}/api", mock_server.uri())).unwrap();
    let err = client.fetch_whitepaper().await.unwrap_err();

    assert!(matches!(err, ExportError::Http(_)));
}

#[tokio::test]
async fn fetched_paper_renders_in_every_format() {
    let mock_server = MockServer::start().await;
    serve_paper(&mock_server).await;
    let client = ApiClient::new(&format!("{}/api", mock_server.uri())).unwrap();
    let paper = client.fetch_whitepaper().await.unwrap();
    let dir = TempDir::new().unwrap();

    for format in [ExportFormat::Pdf, ExportFormat::SimplePdf, ExportFormat::Word] {
        let bytes = format.render(&paper, Utc::now()).unwrap();
        let file = dir.path().join(format.default_file_name());
        std::fs::write(&file, &bytes).unwrap();

        match format {
            ExportFormat::Pdf | ExportFormat::SimplePdf => {
                let document = lopdf::Document::load(&file).unwrap();
                assert!(
                    document.get_pages().len() > 3,
                    "{:?} produced too few pages",
                    format
                );
            }
            ExportFormat::Word => {
                let mut archive = zip::ZipArchive::new(std::fs::File::open(&file).unwrap()).unwrap();
                let mut core = String::new();
                archive
                    .by_name("docProps/core.xml")
                    .unwrap()
                    .read_to_string(&mut core)
                    .unwrap();
                assert!(core.contains("<dc:title>Temporal-Holographic Processing Units"));
            }
        }
    }
}

#[test]
fn detailed_pdf_gives_each_section_its_own_page() {
    let paper = build_whitepaper();
    let bytes = ExportFormat::Pdf.render(&paper, Utc::now()).unwrap();
    let document = lopdf::Document::load_mem(&bytes).unwrap();

    // title, abstract and contents pages precede the sections
    assert!(document.get_pages().len() >= 3 + paper.sections.len() + 1);
}

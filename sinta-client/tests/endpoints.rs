use pretty_assertions::assert_eq;
use serde_json::json;
use sinta_client::{ClientError, JobApi, ScraperClient, StatusClient};
use sinta_core::domain::job::JobResult;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_status_decodes_running_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scraping-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": true,
            "progress": 52,
            "message": "Scraping haki...",
            "results": {},
            "start_time": "Mon, 06 Jan 2025 10:00:00 GMT",
            "output_dir": "output-06012025",
            "elapsed_time": "0:03:41"
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let status = client.fetch_status().await.expect("status ok");

    assert!(status.running);
    assert_eq!(status.progress, 52);
    assert_eq!(status.message.as_deref(), Some("Scraping haki..."));
    assert_eq!(status.output_dir.as_deref(), Some("output-06012025"));
}

#[tokio::test]
async fn fetch_status_accepts_idle_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scraping-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": false,
            "progress": 0,
            "message": "",
            "results": {},
            "start_time": null,
            "output_dir": null
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let status = client.fetch_status().await.expect("idle status is not an error");

    assert!(status.is_terminal());
    assert_eq!(status.result, Some(JobResult::default()));
}

#[tokio::test]
async fn fetch_status_reports_finished_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scraping-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": false,
            "progress": 20,
            "message": "Error: timeout",
            "results": {"success": false, "error": "timeout"}
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let status = client.fetch_status().await.unwrap();

    assert_eq!(status.result, Some(JobResult::failed("timeout")));
}

#[tokio::test]
async fn fetch_status_maps_malformed_body_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scraping-status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>502 Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let err = client.fetch_status().await.unwrap_err();

    assert!(err.is_decode(), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_status_maps_http_status_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scraping-status"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let err = client.fetch_status().await.unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_status_maps_unreachable_backend_to_network_error() {
    // Nothing listens on a port freed right after binding it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ScraperClient::new(format!("http://{addr}"));
    let err = client.fetch_status().await.unwrap_err();

    assert!(err.is_network(), "unexpected error: {err}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn save_lecturers_posts_ids_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/lecturers"))
        .and(body_json(json!({"lecturer_ids": ["6005631", "5975416"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Lecturer IDs saved successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let ids = vec!["6005631".to_string(), "5975416".to_string()];
    let ack = client.save_lecturers(&ids).await.unwrap();

    assert_eq!(ack.rejection(), None);
}

#[tokio::test]
async fn start_scraping_surfaces_backend_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/start-scraping"))
        .and(body_json(json!({"categories": ["buku", "haki"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Scraping is already running"
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let categories = vec!["buku".to_string(), "haki".to_string()];
    let ack = client.start_scraping(&categories).await.unwrap();

    assert_eq!(
        ack.rejection().as_deref(),
        Some("Scraping is already running")
    );
}

#[tokio::test]
async fn get_lecturers_returns_saved_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lecturers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"lecturer_ids": ["111", "222"]})),
        )
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    assert_eq!(client.get_lecturers().await.unwrap(), vec!["111", "222"]);
}

#[tokio::test]
async fn list_outputs_decodes_directories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outputs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "outputs": [{
                "name": "output-06012025",
                "date": "06 January 2025",
                "path": "/srv/sinta/output-06012025",
                "files_count": 2,
                "files": ["buku.csv", "haki.csv"]
            }]
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let outputs = client.list_outputs().await.unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].name, "output-06012025");
    assert_eq!(outputs[0].files, vec!["buku.csv", "haki.csv"]);
}

#[tokio::test]
async fn download_file_returns_csv_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/output-06012025/buku.csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string("Judul,ISBN\nRust,978-1\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let bytes = client
        .download_file("output-06012025", "buku.csv")
        .await
        .unwrap();

    assert_eq!(bytes, b"Judul,ISBN\nRust,978-1\n".to_vec());
}

#[tokio::test]
async fn download_file_maps_missing_file_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/output-06012025/haki.csv"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "File not found"})))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let err = client
        .download_file("output-06012025", "haki.csv")
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "File not found");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_csv_data_decodes_preview() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/csv-data/output-06012025/profil.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "filename": "profil.csv",
            "columns": ["Nama", "Universitas", "SINTA Score Overall"],
            "data": [
                {"Nama": "Budi", "Universitas": "UGM", "SINTA Score Overall": "310"},
                {"Nama": "Sari", "Universitas": "-", "SINTA Score Overall": "-"}
            ],
            "stats": {
                "total_rows": 2,
                "total_columns": 3,
                "file_size": "0.2 KB",
                "universities": 1,
                "avg_sinta_score": 310.0
            }
        })))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let preview = client
        .get_csv_data("output-06012025", "profil.csv")
        .await
        .unwrap();

    assert_eq!(preview.columns.len(), 3);
    assert_eq!(preview.stats.total_rows, 2);
    assert_eq!(preview.row_cells(&preview.data[1]), vec!["Sari", "-", "-"]);
    assert_eq!(
        preview.stats.extra.get("universities").map(ToString::to_string),
        Some("1".to_string())
    );
}

#[tokio::test]
async fn get_csv_data_maps_missing_file_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/csv-data/output-06012025/ppm.csv"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "File not found"})))
        .mount(&server)
        .await;

    let client = ScraperClient::new(server.uri());
    let err = client
        .get_csv_data("output-06012025", "ppm.csv")
        .await
        .unwrap_err();

    assert!(!err.is_server_error());
    assert_eq!(err.to_string(), "API error (status 404): File not found");
}

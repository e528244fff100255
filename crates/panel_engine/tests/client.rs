use panel_engine::{
    ClientSettings, FailureKind, JobApi, ReqwestJobApi, SearchPayload, StatusPayload,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestJobApi {
    let settings = ClientSettings::parse(&server.uri()).expect("mock uri");
    ReqwestJobApi::new(settings).expect("client")
}

fn payload() -> SearchPayload {
    SearchPayload {
        country: Some("Россия".to_string()),
        city: None,
        category: Some("кафе".to_string()),
        max_results: Some(20),
        whole_country: true,
    }
}

#[tokio::test]
async fn start_search_posts_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "country": "Россия",
            "city": null,
            "category": "кафе",
            "max_results": 20,
            "whole_country": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Поиск запущен", "status": "started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).start_search(&payload()).await.expect("start ok");
}

#[tokio::test]
async fn start_search_surfaces_server_error_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Поиск уже выполняется"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).start_search(&payload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.to_string(), "Поиск уже выполняется");
}

#[tokio::test]
async fn start_search_defaults_message_without_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = api_for(&server).start_search(&payload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "Failed to start search");
}

#[tokio::test]
async fn start_search_rejects_html_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<h1>Bad gateway</h1>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).start_search(&payload()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::MalformedResponse {
            content_type: Some("text/html".to_string())
        }
    );
    assert_eq!(
        err.message,
        "The server returned an invalid response. Try refreshing the page."
    );
}

#[tokio::test]
async fn fetch_status_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_running": true,
            "progress": 4,
            "total": 10,
            "current": "Город 2/5: Казань",
            "error": null,
            "results": []
        })))
        .mount(&server)
        .await;

    let status = api_for(&server).fetch_status().await.expect("status");
    assert_eq!(
        status,
        StatusPayload {
            is_running: true,
            progress: 4,
            total: 10,
            current: Some("Город 2/5: Казань".to_string()),
            error: None,
            results: Some(Vec::new()),
        }
    );
}

#[tokio::test]
async fn fetch_status_requires_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"is_running": false}"#,
            "text/plain",
        ))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_status().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::MalformedResponse { .. }));
}

#[tokio::test]
async fn download_returns_blob() {
    let server = MockServer::start().await;
    let blob = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            blob.clone(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ))
        .mount(&server)
        .await;

    let bytes = api_for(&server).download().await.expect("download");
    assert_eq!(bytes.as_ref(), blob.as_slice());
}

#[tokio::test]
async fn download_failure_reads_error_or_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Нет результатов для экспорта"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("oops", "text/plain"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let first = api.download().await.unwrap_err();
    assert_eq!(first.message, "Нет результатов для экспорта");

    let second = api.download().await.unwrap_err();
    assert_eq!(second.kind, FailureKind::HttpStatus(500));
    assert_eq!(second.message, "Error");
}

#[tokio::test]
async fn reset_posts_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Статус сброшен"})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).reset().await.expect("reset");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let settings = ClientSettings::parse("http://127.0.0.1:9").unwrap();
    let api = ReqwestJobApi::new(settings).unwrap();

    let err = api.fetch_status().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use dtrsystem::config::PrintSettings;
use dtrsystem::dtr::DtrSheet;
use dtrsystem::store::{InMemoryStore, RecordStore};
use dtrsystem::web::{router, AppState};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let store = InMemoryStore::new(json!({
        "embeddings": {
            "Ana Reyes": [0.12, 0.5],
            "Ben Santos": [0.3, 0.1],
            "Carla Reyes": [0.7, 0.2]
        },
        "logs": {
            "Ana Reyes": {
                "2025-02": {
                    "03": {
                        "AM_IN": "08:00 AM",
                        "AM_OUT": "12:00 PM",
                        "PM_IN": "01:00 PM",
                        "PM_OUT": "05:00 PM"
                    },
                    "04": { "AM_IN": "08:30 AM", "AM_OUT": "12:15 PM" }
                }
            }
        }
    }));

    let store: Arc<dyn RecordStore> = Arc::new(store);
    let state = AppState {
        store,
        names_path: "embeddings".to_string(),
        logs_path: "logs".to_string(),
        timezone: chrono_tz::Asia::Manila,
        print: Arc::new(PrintSettings {
            office_name: "Field Office".to_string(),
            ..Default::default()
        }),
    };

    router(state, "assets")
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_employees_filtered() {
    let (status, body) = get(test_app(), "/api/employees?q=reyes").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(names, vec!["Ana Reyes", "Carla Reyes"]);
}

#[tokio::test]
async fn test_sheet_api() {
    let (status, body) = get(test_app(), "/api/dtr/Ana%20Reyes?month=2025-02").await;
    assert_eq!(status, StatusCode::OK);

    let sheet: DtrSheet = serde_json::from_str(&body).unwrap();
    assert_eq!(sheet.employee, "Ana Reyes");
    assert_eq!(sheet.rows.len(), 28);
    assert_eq!(sheet.total.hours, 11);
    assert_eq!(sheet.total.minutes, 45);
}

#[tokio::test]
async fn test_sheet_api_rejects_bad_month() {
    let (status, _) = get(test_app(), "/api/dtr/Ana%20Reyes?month=2025-13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sheet_api_rejects_name_spanning_keys() {
    let (status, _) = get(test_app(), "/api/dtr/Ana%2F2025-02%2F03?month=2025-02").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(test_app(), "/api/dtr/..%2Fsecrets?month=2025-02").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(test_app(), "/print?name=Ana%2F2025-02&month=2025-02").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_page() {
    let (status, body) = get(test_app(), "/?name=Ana+Reyes&q=reyes&month=2025-02").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("class=\"selected\">Ana Reyes</a>"));
    assert!(body.contains(">Carla Reyes</a>"));
    assert!(!body.contains("Ben Santos"));
    assert!(body.contains("February 2025"));
    assert!(body.contains("Field Office"));
    assert!(body.contains("11 hours 45 minutes"));
}

#[tokio::test]
async fn test_index_without_selection_shows_blank_sheet() {
    let (status, body) = get(test_app(), "/?month=2025-02").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("Ben Santos"));
    assert!(body.contains("0 hours 0 minutes"));
}

#[tokio::test]
async fn test_print_page() {
    let (status, body) = get(test_app(), "/print?name=Ana+Reyes&month=2025-02").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("window.print()"));
    assert!(body.contains("<td>Feb 04</td><td></td><td>08:30 AM</td><td>12:15 PM</td>"));
}

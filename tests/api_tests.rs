//! Integration tests for the converter HTTP surface

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use weathertext::web;

/// The OpenWeatherMap sample payload the service was built around
fn sample_payload() -> Value {
    json!({
        "city": {
            "name": "London",
            "country": "GB",
            "timezone": "GMT"
        },
        "list": [
            {
                "dt_txt": "2025-12-28 12:00:00",
                "main": {"temp": 5.2, "feels_like": 2.1, "humidity": 75},
                "clouds": {"all": 60},
                "weather": [{"description": "partly cloudy"}],
                "wind": {"speed": 4.5},
                "visibility": 10000,
                "rain": {"3h": 0.2}
            },
            {
                "dt_txt": "2025-12-28 15:00:00",
                "main": {"temp": 4.8, "feels_like": 1.5, "humidity": 80},
                "clouds": {"all": 80},
                "weather": [{"description": "overcast clouds"}],
                "wind": {"speed": 5.2},
                "visibility": 9000,
                "rain": {"3h": 1.5}
            }
        ]
    })
}

const SAMPLE_TEXT: &str = "Location: London, GB\n\
    Timezone: GMT\n\
    \n\
    Timestamp: 2025-12-28 12:00:00\n\
    Temp: 5.2°C | Feels Like: 2.1°C\n\
    Humidity: 75% | Clouds: 60%\n\
    Condition: partly cloudy\n\
    Wind: 4.5 m/s | Visibility: 10000 m\n\
    Rain (3h): 0.2 mm\n\
    --------------------------\n\
    Timestamp: 2025-12-28 15:00:00\n\
    Temp: 4.8°C | Feels Like: 1.5°C\n\
    Humidity: 80% | Clouds: 80%\n\
    Condition: overcast clouds\n\
    Wind: 5.2 m/s | Visibility: 9000 m\n\
    Rain (3h): 1.5 mm\n\
    --------------------------\n";

async fn get(uri: &str) -> (StatusCode, String) {
    let response = web::app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(uri: &str, body: &Value) -> (StatusCode, String) {
    let response = web::app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn root_returns_service_descriptor() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);

    let descriptor: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(descriptor["name"], "Weather JSON to Text Converter");
    assert_eq!(descriptor["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(
        descriptor["endpoints"]["POST /convert"],
        "Convert weather JSON to plain text"
    );
}

#[tokio::test]
async fn convert_renders_sample_payload() {
    let (status, body) = post_json("/convert", &sample_payload()).await;
    assert_eq!(status, StatusCode::OK);

    let result: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(result["status"], "success");
    assert_eq!(result["text"], SAMPLE_TEXT);
}

#[tokio::test]
async fn convert_and_convert_raw_agree() {
    let payload = sample_payload();
    let (status, body) = post_json("/convert", &payload).await;
    let (raw_status, raw_body) = post_json("/convert-raw", &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(raw_status, StatusCode::OK);
    assert_eq!(body, raw_body);
}

#[tokio::test]
async fn convert_rejects_malformed_top_level_shape() {
    let payload = json!({"city": "not a mapping", "list": []});
    let (status, _) = post_json("/convert", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn convert_rejects_absent_top_level_keys() {
    let payload = json!({"city": {"name": "London", "country": "GB", "timezone": "GMT"}});
    let (status, _) = post_json("/convert", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn convert_reports_missing_entry_field() {
    let mut payload = sample_payload();
    payload["list"][0]["main"]
        .as_object_mut()
        .unwrap()
        .remove("temp");

    let (status, body) = post_json("/convert", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        error["detail"],
        "Missing required field in JSON: list[0].main.temp"
    );
}

#[tokio::test]
async fn convert_raw_reports_missing_city_field() {
    let mut payload = sample_payload();
    payload["city"].as_object_mut().unwrap().remove("name");

    let (status, body) = post_json("/convert-raw", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["detail"], "Missing required field in JSON: city.name");
}

#[tokio::test]
async fn convert_raw_reports_missing_top_level_key() {
    let payload = json!({"list": []});
    let (status, body) = post_json("/convert-raw", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["detail"], "Missing required field in JSON: city");
}

#[tokio::test]
async fn convert_raw_reports_type_mismatch_as_server_error() {
    let payload = json!({"city": 42, "list": []});
    let (status, body) = post_json("/convert-raw", &payload).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: Value = serde_json::from_str(&body).unwrap();
    let detail = error["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error processing weather data:"));
}

#[tokio::test]
async fn convert_raw_renders_fallbacks() {
    let mut payload = sample_payload();
    let entry = payload["list"][0].as_object_mut().unwrap();
    entry.remove("visibility");
    entry.remove("rain");

    let (status, body) = post_json("/convert-raw", &payload).await;
    assert_eq!(status, StatusCode::OK);

    let result: Value = serde_json::from_str(&body).unwrap();
    let text = result["text"].as_str().unwrap();
    assert!(text.contains("Wind: 4.5 m/s | Visibility: N/A m\n"));
    assert!(text.contains("Rain (3h): 0 mm\n"));
}

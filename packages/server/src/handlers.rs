//! HTTP handler functions for the AED station map API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use aed_map_render::map::render_map;
use aed_map_render::on_interaction;
use aed_map_server_models::{ApiError, ApiHealth, ApiPage};
use aed_map_station_models::{InteractionEvent, StationTable};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/page`
///
/// Returns the title and curated-map link shown above the map.
pub async fn page(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiPage::from(&state.config.page))
}

/// `GET /api/map`
///
/// Returns the map view with one marker per station.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    match load_stations(&state).await {
        Ok(table) => HttpResponse::Ok().json(render_map(table.stations(), &state.config.map)),
        Err(response) => response,
    }
}

/// `POST /api/interaction`
///
/// Accepts the latest viewport snapshot (or `null`/an empty body before
/// the user has interacted) and returns the render commands for it.
pub async fn interaction(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let event = match parse_event(&body) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Rejected interaction payload: {e}");
            return HttpResponse::BadRequest().json(ApiError::new(format!(
                "Invalid interaction payload: {e}"
            )));
        }
    };

    let table = match load_stations(&state).await {
        Ok(table) => table,
        Err(response) => return response,
    };

    let commands = on_interaction(
        table.stations(),
        event.as_ref(),
        state.config.map.center,
        state.config.ranking.limit,
    );

    HttpResponse::Ok().json(commands)
}

fn parse_event(body: &[u8]) -> Result<Option<InteractionEvent>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
}

/// Loads the cached station table, mapping failures to a `503` response.
async fn load_stations(state: &AppState) -> Result<Arc<StationTable>, HttpResponse> {
    state.stations.load(&state.source_url).await.map_err(|e| {
        log::error!("Failed to load stations: {e}");
        HttpResponse::ServiceUnavailable().json(ApiError::new(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test};

    use crate::config::AppConfig;
    use crate::{AppState, configure_api};

    const FEED: &str = "\
タイトル,場所,緯度,経度
今治市役所,本館1階,34.0663183,132.997528
今治駅,改札横,34.0682,132.9989
しまなみ,大島,34.15,133.07
";

    fn temp_feed() -> PathBuf {
        let path = std::env::temp_dir().join(format!("aed-map-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, FEED).unwrap();
        path
    }

    fn state_for(source: &str) -> actix_web::web::Data<AppState> {
        let config = AppConfig::default().with_source_url(Some(source.to_string()));
        actix_web::web::Data::new(AppState::new(config).unwrap())
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().configure(configure_api)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn page_returns_configured_chrome() {
        let state = state_for("unused.csv");
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;
        let req = test::TestRequest::get().uri("/api/page").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "いまばりAEDステーション");
        assert_eq!(body["myMapLabel"], "マイマップ");
    }

    #[actix_web::test]
    async fn map_plots_every_station() {
        let path = temp_feed();
        let state = state_for(&path.to_string_lossy());
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let req = test::TestRequest::get().uri("/api/map").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["markers"].as_array().unwrap().len(), 3);
        assert_eq!(body["markers"][0]["tooltip"], "今治市役所");
        assert_eq!(body["locateControl"], true);
        assert_eq!(body["zoom"], 16);
        std::fs::remove_file(path).ok();
    }

    #[actix_web::test]
    async fn interaction_without_event_has_no_table() {
        let path = temp_feed();
        let state = state_for(&path.to_string_lossy());
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;

        for payload in ["null", ""] {
            let req = test::TestRequest::post()
                .uri("/api/interaction")
                .insert_header(ContentType::json())
                .set_payload(payload)
                .to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert!(body["table"].is_null(), "payload {payload:?}");
        }
        std::fs::remove_file(path).ok();
    }

    #[actix_web::test]
    async fn interaction_ranks_stations_in_viewport() {
        let path = temp_feed();
        let state = state_for(&path.to_string_lossy());
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let event = serde_json::json!({
            "bounds": {
                "_southWest": {"lat": 34.06, "lng": 132.99},
                "_northEast": {"lat": 34.07, "lng": 133.00}
            },
            "center": {"lat": 34.0682, "lng": 132.9989}
        });
        let req = test::TestRequest::post()
            .uri("/api/interaction")
            .set_json(&event)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let rows = body["table"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "今治駅");
        assert_eq!(rows[1]["title"], "今治市役所");
        assert_eq!(
            rows[1]["navi"],
            "https://www.google.com/maps/dir/?api=1&destination=34.0663183,132.997528"
        );
        assert_eq!(body["table"]["hideIndex"], true);
        std::fs::remove_file(path).ok();
    }

    #[actix_web::test]
    async fn malformed_interaction_is_bad_request() {
        let path = temp_feed();
        let state = state_for(&path.to_string_lossy());
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let req = test::TestRequest::post()
            .uri("/api/interaction")
            .set_payload(r#"{"center": {"lat": 1.0, "lng": 2.0}}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        std::fs::remove_file(path).ok();
    }

    #[actix_web::test]
    async fn unavailable_data_is_service_unavailable() {
        let missing = std::env::temp_dir().join(format!("aed-map-{}.csv", uuid::Uuid::new_v4()));
        let state = state_for(&missing.to_string_lossy());
        let app =
            test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let req = test::TestRequest::get().uri("/api/map").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::post()
            .uri("/api/interaction")
            .set_payload("null")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Station data unavailable")
        );
    }
}

//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::{
        get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    dataset::initialize_database_endpoint,
    endpoints,
    not_found::get_404_not_found,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
///
/// The dashboard is served from a different origin, so any origin may call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::INITIALIZE_DATABASE,
            get(initialize_database_endpoint),
        )
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_DATA, get(get_combined_data_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        pagination::PaginationConfig,
        test_utils::{serve_json, spawn_server},
    };

    use super::build_router;

    fn snapshot() -> Value {
        json!([
            {
                "id": 1,
                "title": "Wireless Mouse",
                "price": 50.0,
                "description": "Two buttons and a wheel",
                "category": "electronics",
                "image": "https://example.com/mouse.jpg",
                "sold": true,
                "dateOfSale": "2022-03-10T10:00:00Z"
            },
            {
                "id": 2,
                "title": "Rain Jacket",
                "price": 150.0,
                "description": "Keeps the rain out",
                "category": "women's clothing",
                "image": "https://example.com/jacket.jpg",
                "sold": false,
                "dateOfSale": "2021-03-12T10:00:00Z"
            },
            {
                "id": 3,
                "title": "Silver Ring",
                "price": 999.0,
                "description": "Sterling silver",
                "category": "jewelery",
                "image": "https://example.com/ring.jpg",
                "sold": true,
                "dateOfSale": "2022-04-01T10:00:00Z"
            }
        ])
    }

    /// Start the app against a fresh database and snapshot, returning its base URL.
    async fn start_app() -> String {
        let dataset_url = serve_json(snapshot()).await;
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            &dataset_url,
            PaginationConfig::default(),
        )
        .unwrap();

        let addr = spawn_server(build_router(state)).await;
        format!("http://{addr}")
    }

    async fn get_json(url: &str) -> (StatusCode, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn load_then_query_every_view() {
        let base = start_app().await;

        let (status, body) = get_json(&format!("{base}{}", endpoints::INITIALIZE_DATABASE)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recordCount"], 3);

        let (status, body) =
            get_json(&format!("{base}{}?month=3&search=jacket", endpoints::TRANSACTIONS)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["transactions"][0]["title"], "Rain Jacket");
        assert_eq!(body["transactions"][0]["dateOfSale"], "2021-03-12T10:00:00Z");

        let (status, body) =
            get_json(&format!("{base}{}", format_endpoint(endpoints::STATISTICS, "03"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"totalSaleAmount": 200.0, "totalSoldItems": 1, "totalNotSoldItems": 1})
        );

        let (_, body) =
            get_json(&format!("{base}{}", format_endpoint(endpoints::BAR_CHART, "3"))).await;
        assert_eq!(body.as_array().unwrap().len(), 10);

        let (_, body) =
            get_json(&format!("{base}{}", format_endpoint(endpoints::PIE_CHART, "4"))).await;
        assert_eq!(body, json!([{"category": "jewelery", "count": 1}]));

        let (_, body) =
            get_json(&format!("{base}{}", format_endpoint(endpoints::COMBINED_DATA, "4"))).await;
        assert_eq!(body["statistics"]["totalSaleAmount"], 999.0);
        assert_eq!(body["pieChart"], json!([{"category": "jewelery", "count": 1}]));
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let base = start_app().await;

        let (status, body) = get_json(&format!("{base}/api/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let base = start_app().await;

        let response = reqwest::Client::new()
            .get(format!("{base}{}", endpoints::TRANSACTIONS))
            .header("Origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}

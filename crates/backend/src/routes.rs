use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, StatusCode};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use contracts::shared::api::ErrorBody;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers::{self, proxy};
use crate::shared::state::AppState;
use crate::shared::upstream::resources::{
    ProxyResource, DOCUMENTS, ENTITIES, FEE_CATEGORIES, LEGISLATIONS, LICENSE_PARAMETERS,
    PROCESS_TYPES,
};
use crate::system;

/// Запас на служебные части multipart сверх лимита файла
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Роуты одного проксируемого ресурса; `/batch` есть только у документов
fn proxy_routes(app: &AppState, resource: &'static ProxyResource) -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(proxy::list).post(proxy::create))
        .route(
            "/:id",
            get(proxy::get_by_id)
                .put(proxy::update)
                .delete(proxy::delete)
                .patch(proxy::set_status),
        );
    if std::ptr::eq(resource, &DOCUMENTS) {
        router = router.route("/batch", post(proxy::batch));
    }
    router.with_state(proxy::ProxyState::new(app, resource))
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let upload_limit = state.config.upload.max_bytes + MULTIPART_OVERHEAD;
    let uploads_prefix = state.config.upload.public_prefix.clone();
    let uploads = ServeDir::new(&state.upload_dir);

    let mut router = Router::new()
        .route("/health", get(system::handlers::app_info::health))
        .route("/api/app-info", get(system::handlers::app_info::app_info))
        .route(
            "/api/upload",
            post(system::handlers::upload::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // ========================================
        // MOCK ENTITIES
        // ========================================
        .route(
            "/api/sectors",
            get(handlers::a001_sector::list).post(handlers::a001_sector::create),
        )
        .route(
            "/api/sectors/:id",
            get(handlers::a001_sector::get_by_id)
                .put(handlers::a001_sector::update)
                .delete(handlers::a001_sector::delete)
                .patch(handlers::a001_sector::set_status),
        )
        .route(
            "/api/categories",
            get(handlers::a002_category::list).post(handlers::a002_category::create),
        )
        .route(
            "/api/categories/:id",
            get(handlers::a002_category::get_by_id)
                .put(handlers::a002_category::update)
                .delete(handlers::a002_category::delete)
                .patch(handlers::a002_category::set_status),
        )
        .route(
            "/api/licence-types",
            get(handlers::a003_licence_type::list).post(handlers::a003_licence_type::create),
        )
        .route(
            "/api/licence-types/:id",
            get(handlers::a003_licence_type::get_by_id)
                .put(handlers::a003_licence_type::update)
                .delete(handlers::a003_licence_type::delete)
                .patch(handlers::a003_licence_type::set_status),
        )
        .route(
            "/api/options",
            get(handlers::a004_option::list).post(handlers::a004_option::create),
        )
        .route("/api/options/groups", get(handlers::a004_option::groups))
        .route(
            "/api/options/items/:id",
            get(handlers::a004_option::get_item)
                .put(handlers::a004_option::update_item)
                .delete(handlers::a004_option::delete_item),
        )
        .route(
            "/api/options/:ccode",
            get(handlers::a004_option::get_group)
                .put(handlers::a004_option::replace_group)
                .delete(handlers::a004_option::delete_group),
        )
        .route(
            "/api/options/:ccode/exists",
            get(handlers::a004_option::exists),
        )
        .route(
            "/api/dossier/general",
            get(handlers::a005_general_data::list).post(handlers::a005_general_data::create),
        )
        .route(
            "/api/dossier/general/:id",
            get(handlers::a005_general_data::get_by_id)
                .put(handlers::a005_general_data::update)
                .delete(handlers::a005_general_data::delete)
                .patch(handlers::a005_general_data::set_status),
        );

    // ========================================
    // UPSTREAM-OWNED ENTITIES (proxy)
    // ========================================
    for (prefix, resource) in [
        ("/api/fee-categories", &FEE_CATEGORIES),
        ("/api/legislations", &LEGISLATIONS),
        ("/api/license-parameters", &LICENSE_PARAMETERS),
        ("/api/process-types", &PROCESS_TYPES),
        ("/api/documents", &DOCUMENTS),
        ("/api/entities", &ENTITIES),
    ] {
        router = router.nest(prefix, proxy_routes(&state, resource));
    }

    router
        .nest_service(&uploads_prefix, uploads)
        .fallback(not_found)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::extract::Query;
    use serde_json::{json, Value};

    use crate::shared::config::Config;
    use crate::shared::store::{MockStore, SequentialIdGenerator};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_app(config: Config) -> String {
        let store = MockStore::build(Arc::new(SequentialIdGenerator::starting_at(100)), true);
        let state = AppState::new(config, store).unwrap();
        spawn(configure_routes(state)).await
    }

    /// Заглушка внешнего API: эхо запроса и фиксированные ошибки
    async fn spawn_upstream() -> String {
        let stub = Router::new()
            .route(
                "/fee-categories",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({"content": [{"id": "1", "name": "Taxa"}], "query": q}))
                })
                .post(|Json(body): Json<Value>| async move {
                    (StatusCode::CREATED, Json(json!({"id": "9", "received": body})))
                }),
            )
            .route(
                "/legislations/:id",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "Legislation 77 does not exist in schema lic"})),
                    )
                }),
            )
            .route(
                "/documents/batch",
                post(
                    |Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                        Json(json!({"action": q.get("action"), "processed": body["documentIds"]}))
                    },
                ),
            );
        spawn(stub).await
    }

    fn config_with_upstream(base_url: Option<String>) -> Config {
        let mut config = Config::default();
        config.upstream.base_url = base_url;
        config.upstream.app_code = Some("LIC-ADMIN".into());
        config.upload.dir = std::env::temp_dir()
            .join(format!("uploads-{}", uuid::Uuid::new_v4()))
            .display()
            .to_string();
        config
    }

    async fn app() -> String {
        spawn_app(config_with_upstream(None)).await
    }

    #[tokio::test]
    async fn health_and_app_info() {
        let base = app().await;
        let health = reqwest::get(format!("{}/health", base)).await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let info: Value = reqwest::get(format!("{}/api/app-info", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(info["appCode"], "LIC-ADMIN");
        assert_eq!(info["previewMode"], false);
        assert_eq!(info["backendConfigured"], false);
    }

    #[tokio::test]
    async fn active_sectors_are_sorted() {
        let base = app().await;
        let body: Value = reqwest::get(format!("{}/api/sectors?active=true", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["total"], 8);
        let orders: Vec<i64> = body["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["sortOrder"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, (1..=8).collect::<Vec<_>>());
        assert!(body.get("totalPages").is_none());
    }

    #[tokio::test]
    async fn invalid_filter_literal_is_400_json() {
        let base = app().await;
        let response = reqwest::get(format!("{}/api/sectors?active=maybe", base))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("active"));
    }

    #[tokio::test]
    async fn category_create_resolves_sector_name() {
        let base = app().await;
        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/api/categories", base))
            .json(&json!({"name": "Test", "code": "T1", "sectorId": "5"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = response.json().await.unwrap();
        assert_eq!(created["sectorName"], "Comércio e Serviços");
        assert_eq!(created["active"], true);

        let fetched: Value = client
            .get(format!("{}/api/categories/{}", base, created["id"].as_str().unwrap()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_without_required_fields_is_400() {
        let base = app().await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/licence-types", base))
            .json(&json!({"description": "sem nome"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing required fields: name, code");
    }

    #[tokio::test]
    async fn malformed_json_is_400_json() {
        let base = app().await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/sectors", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_general_data_delete_is_404() {
        let base = app().await;
        let response = reqwest::Client::new()
            .delete(format!("{}/api/dossier/general/unknown", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "General data parameter not found"}));
    }

    #[tokio::test]
    async fn patch_status_and_invalid_action() {
        let base = app().await;
        let client = reqwest::Client::new();
        let ok: Value = client
            .patch(format!("{}/api/sectors/9?action=activate", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(ok["active"], true);
        assert_eq!(ok["id"], "9");

        let bad = client
            .patch(format!("{}/api/sectors/9?action=archive", base))
            .send()
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        let body: Value = bad.json().await.unwrap();
        assert_eq!(body["error"], "Invalid action. Use 'activate' or 'deactivate'");
    }

    #[tokio::test]
    async fn option_group_put_with_empty_items_clears_it() {
        let base = app().await;
        let client = reqwest::Client::new();
        let stored: Value = client
            .put(format!("{}/api/options/PAYMENT_METHOD", base))
            .json(&json!({"locale": "pt", "items": []}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stored, json!([]));

        let listed: Value = client
            .get(format!("{}/api/options?ccode=PAYMENT_METHOD", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["total"], 0);

        let exists: Value = client
            .get(format!("{}/api/options/PAYMENT_METHOD/exists", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(exists, json!({"exists": false}));
    }

    #[tokio::test]
    async fn option_groups_and_items_routes() {
        let base = app().await;
        let client = reqwest::Client::new();
        let groups: Value = client
            .get(format!("{}/api/options/groups", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(groups.as_array().unwrap().len(), 3);

        let english: Value = client
            .get(format!("{}/api/options/DOCUMENT_TYPE?locale=en", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(english[0]["cvalue"], "Identity Card");

        let item: Value = client
            .get(format!("{}/api/options/items/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(item["ckey"], "BI");
        assert_eq!(item["sort_order"], 1);
    }

    #[tokio::test]
    async fn proxy_without_backend_is_500() {
        let base = app().await;
        let response = reqwest::get(format!("{}/api/entities", base)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Backend URL not configured");
    }

    #[tokio::test]
    async fn proxy_relays_upstream_body_and_status() {
        let upstream = spawn_upstream().await;
        let base = spawn_app(config_with_upstream(Some(upstream))).await;
        let client = reqwest::Client::new();

        let listed: Value = client
            .get(format!("{}/api/fee-categories?page=2&limit=5&currency=MZN&hack=1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["content"][0]["name"], "Taxa");
        assert_eq!(listed["query"]["active"], "true");
        assert_eq!(listed["query"]["pageNumber"], "1");
        assert_eq!(listed["query"]["pageSize"], "5");
        assert_eq!(listed["query"]["currency"], "MZN");
        assert!(listed["query"].get("hack").is_none());

        let created = client
            .post(format!("{}/api/fee-categories", base))
            .json(&json!({"name": "Taxa", "code": "TX", "amount": 100}))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = created.json().await.unwrap();
        assert_eq!(created["received"]["code"], "TX");

        let missing = client
            .get(format!("{}/api/legislations/77", base))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = missing.json().await.unwrap();
        assert_eq!(body["error"], "Failed to fetch legislations");
    }

    #[tokio::test]
    async fn document_batch_validation_and_forwarding() {
        let upstream = spawn_upstream().await;
        let base = spawn_app(config_with_upstream(Some(upstream))).await;
        let client = reqwest::Client::new();

        let empty = client
            .post(format!("{}/api/documents/batch?action=delete", base))
            .json(&json!({"documentIds": []}))
            .send()
            .await
            .unwrap();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let bad_action = client
            .post(format!("{}/api/documents/batch?action=archive", base))
            .json(&json!({"documentIds": ["1"]}))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_action.status(), StatusCode::BAD_REQUEST);

        let ok: Value = client
            .post(format!("{}/api/documents/batch?action=deactivate", base))
            .json(&json!({"documentIds": ["1", "2"]}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(ok["action"], "deactivate");
        assert_eq!(ok["processed"], json!(["1", "2"]));
    }

    #[tokio::test]
    async fn upload_then_download() {
        let base = app().await;
        let client = reqwest::Client::new();
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(b"conteudo".to_vec()).file_name("alvara.final.pdf"),
        );
        let response = client
            .post(format!("{}/api/upload", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("/uploads/alvara.final-"));
        assert!(url.ends_with(".pdf"));

        let downloaded = client
            .get(format!("{}{}", base, url))
            .send()
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(&downloaded[..], b"conteudo");
    }

    #[tokio::test]
    async fn upload_without_file_is_400() {
        let base = app().await;
        let form = reqwest::multipart::Form::new().text("note", "sem ficheiro");
        let response = reqwest::Client::new()
            .post(format!("{}/api/upload", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "No file uploaded");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let base = app().await;
        let response = reqwest::get(format!("{}/api/nothing-here", base)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Not found");
    }
}

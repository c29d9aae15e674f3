//! HTTP routes.

use std::str::FromStr;
use std::sync::Arc;

use addrbook_domain::{Address, AddressId, AddressPatch, NearbyAddress};
use addrbook_shared::{
    AddressData, CreateAddressData, ErrorCode, ErrorResponse, HealthStatus, NearbyAddressData,
    NearbyQuery, RootMessage, UpdateAddressData,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::app::App;
use crate::use_cases::{AddressError, NewAddress, ProximityError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .route("/health_check/db", get(health_check_db))
        .route("/addresses", get(list_addresses).post(create_address))
        .route("/addresses/", get(list_addresses).post(create_address))
        .route("/addresses/nearby", get(find_nearby))
        .route(
            "/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "App is running".to_string(),
    })
}

async fn health_check_db(State(app): State<Arc<App>>) -> (StatusCode, Json<HealthStatus>) {
    match app.repositories.address.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::connected())),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthStatus::disconnected()))
        }
    }
}

// =============================================================================
// Addresses
// =============================================================================

async fn create_address(
    State(app): State<Arc<App>>,
    payload: Result<Json<CreateAddressData>, JsonRejection>,
) -> Result<(StatusCode, Json<AddressData>), ApiError> {
    let Json(data) = payload?;
    let created = app
        .use_cases
        .address
        .create
        .execute(NewAddress {
            name: data.name,
            street: data.street,
            city: data.city,
            state: data.state,
            country: data.country,
            latitude: data.latitude,
            longitude: data.longitude,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(address_data(&created))))
}

async fn list_addresses(State(app): State<Arc<App>>) -> Result<Json<Vec<AddressData>>, ApiError> {
    let addresses = app.use_cases.address.list.execute().await?;
    Ok(Json(addresses.iter().map(address_data).collect()))
}

async fn find_nearby(
    State(app): State<Arc<App>>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<Vec<NearbyAddressData>>, ApiError> {
    let Query(q) = query?;
    let hits = app
        .use_cases
        .proximity
        .find_nearby
        .execute(q.latitude, q.longitude, q.distance_km)
        .await?;
    Ok(Json(hits.iter().map(nearby_data).collect()))
}

async fn get_address(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<AddressData>, ApiError> {
    let id = parse_address_id(&id)?;
    let address = app.use_cases.address.get.execute(id).await?;
    Ok(Json(address_data(&address)))
}

async fn update_address(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAddressData>, JsonRejection>,
) -> Result<Json<AddressData>, ApiError> {
    let id = parse_address_id(&id)?;
    let Json(data) = payload?;
    let patch = AddressPatch {
        name: data.name,
        street: data.street,
        city: data.city,
        state: data.state,
        country: data.country,
        latitude: data.latitude,
        longitude: data.longitude,
    };
    let updated = app.use_cases.address.update.execute(id, patch).await?;
    Ok(Json(address_data(&updated)))
}

async fn delete_address(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_address_id(&id)?;
    app.use_cases.address.delete.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// No live address can have a malformed id, so it is reported as not found.
fn parse_address_id(raw: &str) -> Result<AddressId, ApiError> {
    AddressId::from_str(raw).map_err(|_| ApiError::NotFound(format!("Address not found: {raw}")))
}

fn address_data(address: &Address) -> AddressData {
    AddressData {
        id: address.id().to_string(),
        name: address.name().to_string(),
        street: address.street().to_string(),
        city: address.city().to_string(),
        state: address.state().to_string(),
        country: address.country().to_string(),
        latitude: address.latitude(),
        longitude: address.longitude(),
    }
}

fn nearby_data(hit: &NearbyAddress) -> NearbyAddressData {
    NearbyAddressData {
        address: address_data(&hit.address),
        distance_km: hit.distance_km,
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation {
        message: String,
        field: Option<&'static str>,
    },
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::BadRequest, msg),
            ),
            ApiError::Validation { message, field } => {
                let body = ErrorResponse::new(ErrorCode::ValidationError, message);
                let body = match field {
                    Some(field) => body.with_field(field),
                    None => body,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, body)
            }
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, msg),
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(ErrorCode::Conflict, msg),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, "Internal error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<AddressError> for ApiError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::Validation(v) => ApiError::Validation {
                message: v.to_string(),
                field: Some(v.field()),
            },
            e @ AddressError::Conflict { .. } => ApiError::Conflict(e.to_string()),
            e @ AddressError::NotFound(_) => ApiError::NotFound(e.to_string()),
            AddressError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProximityError> for ApiError {
    fn from(e: ProximityError) -> Self {
        match e {
            ProximityError::Validation(v) => ApiError::Validation {
                message: v.to_string(),
                field: Some(v.field()),
            },
            ProximityError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape: missing or mistyped fields
            JsonRejection::JsonDataError(e) => ApiError::Validation {
                message: e.body_text(),
                field: None,
            },
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation {
            message: rejection.body_text(),
            field: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{AddressRepo, MockAddressRepo, RepoError};
    use crate::infrastructure::sqlite::{connect, ensure_schema, SqliteAddressRepo};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestServer {
        router: Router,
        _dir: Option<tempfile::TempDir>,
    }

    impl TestServer {
        async fn start() -> Self {
            let dir = tempfile::tempdir().expect("tempdir");
            let url = format!("sqlite:{}", dir.path().join("http.db").display());
            let pool = connect(&url, 2).await.expect("connect");
            ensure_schema(&pool).await.expect("schema");
            let mut server = Self::with_repo(Arc::new(SqliteAddressRepo::new(pool)));
            server._dir = Some(dir);
            server
        }

        fn with_repo(repo: Arc<dyn AddressRepo>) -> Self {
            let app = Arc::new(App::new(repo));
            Self {
                router: routes().with_state(app),
                _dir: None,
            }
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            let body = match body {
                Some(json) => {
                    request = request.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            let response = self
                .router
                .clone()
                .oneshot(request.body(body).expect("request"))
                .await
                .expect("response");

            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("body");
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (status, value)
        }

        async fn create(&self, name: &str, latitude: f64, longitude: f64) -> Value {
            let (status, body) = self
                .send(Method::POST, "/addresses", Some(address_json(name, latitude, longitude)))
                .await;
            assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
            body
        }
    }

    fn address_json(name: &str, latitude: f64, longitude: f64) -> Value {
        json!({
            "name": name,
            "street": "1 Main",
            "city": "Springfield",
            "state": "IL",
            "country": "US",
            "latitude": latitude,
            "longitude": longitude,
        })
    }

    #[tokio::test]
    async fn root_reports_running() {
        let server = TestServer::start().await;
        let (status, body) = server.send(Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "App is running" }));
    }

    #[tokio::test]
    async fn db_health_check_reports_connected() {
        let server = TestServer::start().await;
        let (status, body) = server.send(Method::GET, "/health_check/db", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "database": "connected" }));
    }

    #[tokio::test]
    async fn db_health_check_reports_disconnected() {
        let mut repo = MockAddressRepo::new();
        repo.expect_ping()
            .returning(|| Err(RepoError::database("ping", "database is locked")));
        let server = TestServer::with_repo(Arc::new(repo));

        let (status, body) = server.send(Method::GET, "/health_check/db", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "status": "error", "database": "disconnected" }));
    }

    #[tokio::test]
    async fn db_health_check_after_pool_close_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("closed.db").display());
        let pool = connect(&url, 1).await.expect("connect");
        ensure_schema(&pool).await.expect("schema");
        let server = TestServer::with_repo(Arc::new(SqliteAddressRepo::new(pool.clone())));
        pool.close().await;

        let (status, body) = server.send(Method::GET, "/health_check/db", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn storage_failure_is_opaque_internal_error() {
        let mut repo = MockAddressRepo::new();
        repo.expect_list()
            .returning(|| Err(RepoError::database("address.list", "disk I/O error at /var/db")));
        let server = TestServer::with_repo(Arc::new(repo));

        for uri in ["/addresses", "/addresses/nearby?latitude=0&longitude=0&distance_km=1"] {
            let (status, body) = server.send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "GET {uri}");
            assert_eq!(body["code"], "internal_error");
            assert_eq!(body["message"], "Internal error");
            assert!(!body.to_string().contains("disk I/O"), "leaked: {body}");
        }
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let server = TestServer::start().await;
        let created = server.create("Home", 39.78, -89.65).await;
        let id = created["id"].as_str().expect("id");

        let (status, body) = server.send(Method::GET, &format!("/addresses/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
        assert_eq!(body["city"], "Springfield");
    }

    #[tokio::test]
    async fn trailing_slash_collection_path_works() {
        let server = TestServer::start().await;
        let (status, _) = server
            .send(Method::POST, "/addresses/", Some(address_json("A", 1.0, 1.0)))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = server.send(Method::GET, "/addresses/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let server = TestServer::start().await;
        server.create("A", 10.0, 20.0).await;

        let (status, body) = server
            .send(Method::POST, "/addresses", Some(address_json("A", 10.0, 20.0)))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");

        server.create("A", 10.0, 20.01).await;
    }

    #[tokio::test]
    async fn invalid_field_is_unprocessable_and_named() {
        let server = TestServer::start().await;
        let (status, body) = server
            .send(Method::POST, "/addresses", Some(address_json("A", 90.0001, 0.0)))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "validation_error");
        assert_eq!(body["field"], "latitude");

        let (status, body) = server
            .send(Method::POST, "/addresses", Some(address_json("   ", 0.0, 0.0)))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "name");
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let server = TestServer::start().await;
        let (status, body) = server
            .send(Method::POST, "/addresses", Some(json!({ "name": "A" })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = TestServer::start().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/addresses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = server.router.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let server = TestServer::start().await;
        let created = server.create("Home", 10.0, 20.0).await;
        let id = created["id"].as_str().expect("id");

        let (status, body) = server
            .send(
                Method::PUT,
                &format!("/addresses/{id}"),
                Some(json!({ "city": "Shelbyville", "state": null })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "Shelbyville");
        assert_eq!(body["state"], "IL");
        assert_eq!(body["name"], "Home");
        assert_eq!(body["id"], created["id"]);

        let (status, body) = server
            .send(Method::PATCH, &format!("/addresses/{id}"), Some(json!({ "latitude": 11.5 })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["latitude"], 11.5);
        assert_eq!(body["city"], "Shelbyville");
    }

    #[tokio::test]
    async fn update_into_existing_key_is_conflict() {
        let server = TestServer::start().await;
        server.create("A", 10.0, 20.0).await;
        let b = server.create("B", 10.0, 20.0).await;
        let id = b["id"].as_str().expect("id");

        let (status, body) = server
            .send(Method::PUT, &format!("/addresses/{id}"), Some(json!({ "name": "A" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let server = TestServer::start().await;
        let unknown = AddressId::new().to_string();

        for uri in [format!("/addresses/{unknown}"), "/addresses/not-a-uuid".to_string()] {
            let (status, body) = server.send(Method::GET, &uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
            assert_eq!(body["code"], "not_found");

            let (status, _) = server
                .send(Method::PUT, &uri, Some(json!({ "city": "Y" })))
                .await;
            assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");

            let (status, _) = server.send(Method::DELETE, &uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
        }

        let (_, body) = server.send(Method::GET, "/addresses", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn update_of_unknown_id_with_invalid_field_is_not_found() {
        let server = TestServer::start().await;
        let unknown = AddressId::new();

        let (status, body) = server
            .send(
                Method::PUT,
                &format!("/addresses/{unknown}"),
                Some(json!({ "latitude": 500.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn delete_returns_no_content_and_removes() {
        let server = TestServer::start().await;
        let created = server.create("Home", 10.0, 20.0).await;
        let id = created["id"].as_str().expect("id");

        let (status, body) = server.send(Method::DELETE, &format!("/addresses/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = server.send(Method::DELETE, &format!("/addresses/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nearby_returns_hits_with_distances() {
        let server = TestServer::start().await;
        let near = server.create("near", 0.0, 0.5).await;
        server.create("far", 0.0, 5.0).await;

        let (status, body) = server
            .send(
                Method::GET,
                "/addresses/nearby?latitude=0&longitude=0&distance_km=100",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let hits = body.as_array().expect("array");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], near["id"]);
        let distance = hits[0]["distance_km"].as_f64().expect("distance");
        assert!((distance - 55.597).abs() < 0.01, "distance was {distance}");
    }

    #[tokio::test]
    async fn nearby_rejects_bad_parameters() {
        let server = TestServer::start().await;

        let (status, body) = server
            .send(
                Method::GET,
                "/addresses/nearby?latitude=0&longitude=0&distance_km=-1",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "distance_km");

        let (status, body) = server
            .send(
                Method::GET,
                "/addresses/nearby?latitude=91&longitude=0&distance_km=1",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "latitude");

        let (status, _) = server
            .send(Method::GET, "/addresses/nearby?latitude=0&longitude=0", None)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

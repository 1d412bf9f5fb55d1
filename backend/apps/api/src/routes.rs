//! Router Composition
//!
//! Identity routes and the public attendance routes are open; subject,
//! QR session and decrement routes sit behind `require_teacher`.

use attendance::presentation::{
    AttendanceAppState, AttendanceRepositories, public_router, teacher_router,
};
use auth::presentation::{AuthAppState, AuthRepositories, auth_router_with_state, require_teacher};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full application router without CORS
pub fn app_router<A, B>(auth_state: AuthAppState<A>, attendance_state: AttendanceAppState<B>) -> Router
where
    A: AuthRepositories,
    B: AttendanceRepositories,
{
    let teacher_routes = teacher_router(attendance_state.clone()).route_layer(
        middleware::from_fn_with_state(auth_state.clone(), require_teacher::<A>),
    );

    Router::new()
        .route("/health", get(health))
        .merge(auth_router_with_state(auth_state))
        .merge(public_router(attendance_state))
        .merge(teacher_routes)
        .layer(TraceLayer::new_for_http())
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance::{AttendanceConfig, InMemoryAttendanceStore, models::RegistrationNumber};
    use auth::{AuthConfig, InMemoryAuthRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(store: InMemoryAttendanceStore) -> Router {
        app_router(
            AuthAppState::new(InMemoryAuthRepository::new(), AuthConfig::development()),
            AttendanceAppState::new(store, AttendanceConfig::default()),
        )
    }

    fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(InMemoryAttendanceStore::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_teacher_routes_require_bearer() {
        let app = app(InMemoryAttendanceStore::new());

        let response = app
            .clone()
            .oneshot(post("/subjects", None, json!({ "name": "Math" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(post("/attendance/session", Some("garbage"), json!({ "subject": "Math" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_classroom_day() {
        let store = InMemoryAttendanceStore::new();
        store.register_student(RegistrationNumber::new("21CS01").unwrap());
        let app = app(store);

        let response = app
            .clone()
            .oneshot(post(
                "/register",
                None,
                json!({ "email": "ada@school.edu", "password": "correct horse" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post("/subjects", Some(&token), json!({ "name": "Math" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(post("/attendance/session", Some(&token), json!({ "subject": "Math" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let qr_id = json_body(response).await["qrId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post(
                "/attendance/mark",
                None,
                json!({ "regNumber": "21CS01", "subject": "Math", "qrId": qr_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["outcome"], "marked");

        let response = app
            .clone()
            .oneshot(post("/logout", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(post("/attendance/session", Some(&token), json!({ "subject": "Math" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/attendance/21CS01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["totalScore"], 1);
    }
}

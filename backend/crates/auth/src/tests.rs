//! Crate-level tests for the auth crate

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::TeacherId;

    use crate::application::*;
    use crate::domain::entity::teacher_session::TeacherSession;
    use crate::domain::repository::TeacherSessionRepository;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    fn setup() -> (Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryAuthRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    async fn register(
        repo: &Arc<InMemoryAuthRepository>,
        config: &Arc<AuthConfig>,
        email: &str,
    ) -> TeacherSessionOutput {
        RegisterTeacherUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterTeacherInput {
                email: email.to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap()
    }

    async fn login(
        repo: &Arc<InMemoryAuthRepository>,
        config: &Arc<AuthConfig>,
        email: &str,
        password: &str,
    ) -> Result<TeacherSessionOutput, AuthError> {
        LoginTeacherUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(LoginTeacherInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    fn authenticator(
        repo: &Arc<InMemoryAuthRepository>,
        config: &Arc<AuthConfig>,
    ) -> AuthenticateUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        AuthenticateUseCase::new(repo.clone(), repo.clone(), config.clone())
    }

    #[tokio::test]
    async fn test_register_issues_usable_credential() {
        let (repo, config) = setup();
        let output = register(&repo, &config, "Ada@School.edu").await;

        assert_eq!(output.email, "ada@school.edu");
        assert!(output.expires_at_ms > Utc::now().timestamp_millis());

        let teacher = authenticator(&repo, &config)
            .execute(&output.token)
            .await
            .unwrap();
        assert_eq!(teacher.teacher_id, output.teacher_id);
        assert_eq!(teacher.email, "ada@school.edu");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_case_insensitive() {
        let (repo, config) = setup();
        register(&repo, &config, "ada@school.edu").await;

        let err = RegisterTeacherUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterTeacherInput {
                email: "ADA@school.edu".to_string(),
                password: "another pass".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_and_bad_email() {
        let (repo, config) = setup();
        let use_case = RegisterTeacherUseCase::new(repo.clone(), repo.clone(), config.clone());

        let err = use_case
            .execute(RegisterTeacherInput {
                email: "ada@school.edu".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = use_case
            .execute(RegisterTeacherInput {
                email: "not-an-email".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (repo, config) = setup();
        register(&repo, &config, "ada@school.edu").await;

        let wrong_password = login(&repo, &config, "ada@school.edu", "wrong horse")
            .await
            .unwrap_err();
        let unknown_email = login(&repo, &config, "bob@school.edu", "correct horse")
            .await
            .unwrap_err();
        let malformed = login(&repo, &config, "bob", "correct horse")
            .await
            .unwrap_err();

        for err in [wrong_password, unknown_email, malformed] {
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_logout_revokes_only_presented_credential() {
        let (repo, config) = setup();
        register(&repo, &config, "ada@school.edu").await;

        let first = login(&repo, &config, "ada@school.edu", "correct horse")
            .await
            .unwrap();
        let second = login(&repo, &config, "ada@school.edu", "correct horse")
            .await
            .unwrap();
        assert_ne!(first.token, second.token);

        let auth = authenticator(&repo, &config);
        let principal = auth.execute(&first.token).await.unwrap();

        LogoutTeacherUseCase::new(repo.clone())
            .execute(principal.session_id)
            .await
            .unwrap();

        assert!(matches!(
            auth.execute(&first.token).await,
            Err(AuthError::SessionInvalid)
        ));
        assert!(auth.execute(&second.token).await.is_ok());

        // A second logout with the same credential finds nothing to revoke
        assert!(matches!(
            LogoutTeacherUseCase::new(repo.clone())
                .execute(principal.session_id)
                .await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_tampered_or_foreign_credential_rejected() {
        let (repo, config) = setup();
        let output = register(&repo, &config, "ada@school.edu").await;
        let auth = authenticator(&repo, &config);

        let mut tampered = output.token.clone();
        tampered.push('x');
        assert!(matches!(
            auth.execute(&tampered).await,
            Err(AuthError::SessionInvalid)
        ));

        assert!(matches!(
            auth.execute("garbage").await,
            Err(AuthError::SessionInvalid)
        ));

        // Same session id signed with a different secret
        let other_config = Arc::new(AuthConfig::development());
        assert!(matches!(
            authenticator(&repo, &other_config)
                .execute(&output.token)
                .await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_rejected_and_removed() {
        let (repo, config) = setup();
        let output = register(&repo, &config, "ada@school.edu").await;

        let session = TeacherSession::new(output.teacher_id, Duration::milliseconds(-1));
        TeacherSessionRepository::create(repo.as_ref(), &session)
            .await
            .unwrap();
        let token = platform::token::sign_session_token(&session.session_id, &config.session_secret);

        assert!(matches!(
            authenticator(&repo, &config).execute(&token).await,
            Err(AuthError::SessionInvalid)
        ));
        assert!(
            TeacherSessionRepository::find_by_id(repo.as_ref(), session.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_cleanup_expired_keeps_live_sessions() {
        let (repo, _config) = setup();
        let teacher_id = TeacherId::new();
        let live = TeacherSession::new(teacher_id, Duration::days(1));
        let dead = TeacherSession::new(teacher_id, Duration::days(-1));
        TeacherSessionRepository::create(repo.as_ref(), &live).await.unwrap();
        TeacherSessionRepository::create(repo.as_ref(), &dead).await.unwrap();

        let removed = repo
            .cleanup_expired(Utc::now().timestamp_millis())
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_student_register_and_login() {
        let (repo, config) = setup();
        let register = RegisterStudentUseCase::new(repo.clone(), config.clone());
        let login = LoginStudentUseCase::new(repo.clone(), config.clone());

        let reg = register
            .execute(StudentCredentialsInput {
                reg_number: " 21cs01 ".to_string(),
                password: "student pass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reg.as_str(), "21CS01");

        let duplicate = register
            .execute(StudentCredentialsInput {
                reg_number: "21CS01".to_string(),
                password: "student pass".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(duplicate, AuthError::RegistrationNumberTaken));

        let logged_in = login
            .execute(StudentCredentialsInput {
                reg_number: "21cs01".to_string(),
                password: "student pass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in, reg);

        let wrong = login
            .execute(StudentCredentialsInput {
                reg_number: "21CS01".to_string(),
                password: "wrong pass".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));

        let unknown = login
            .execute(StudentCredentialsInput {
                reg_number: "99XX99".to_string(),
                password: "student pass".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::error::app_error::AppError;
    use kernel::error::kind::ErrorKind;
    use platform::token::TokenError;

    use crate::error::AuthError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::RegistrationNumberTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Validation(AppError::bad_request("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_status_and_kind_agree() {
        let errors = [
            AuthError::EmailTaken,
            AuthError::InvalidCredentials,
            AuthError::SessionInvalid,
            AuthError::Validation(AppError::bad_request("bad")),
            AuthError::Internal("boom".to_string()),
            AuthError::Database(sqlx::Error::PoolTimedOut),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_from_app_error_splits_client_and_server() {
        let client: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(client, AuthError::Validation(_)));
        assert_eq!(client.to_string(), "Invalid email format");

        let server: AuthError = AppError::internal("hash failed").into();
        assert!(matches!(server, AuthError::Internal(_)));
        assert_eq!(server.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_from_token_error() {
        assert!(matches!(
            AuthError::from(TokenError::Missing),
            AuthError::MissingCredential
        ));
        assert!(matches!(
            AuthError::from(TokenError::BadSignature),
            AuthError::SessionInvalid
        ));
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let app = AuthError::Internal("secret detail".to_string()).to_app_error();
        assert!(!app.message().contains("secret"));
    }

    #[test]
    fn test_into_response() {
        let response = AuthError::SessionInvalid.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::router::auth_router;

    fn app() -> Router {
        auth_router(InMemoryAuthRepository::new(), AuthConfig::development())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_login_logout_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                json!({"email": "ada@school.edu", "password": "correct horse"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["email"], "ada@school.edu");
        assert!(body["teacherId"].is_string());
        assert!(body["expiresAtMs"].is_i64());

        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                json!({"email": "ada@school.edu", "password": "correct horse"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let logout = |token: String| {
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(logout(token.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.clone().oneshot(logout(token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_without_bearer_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["detail"], "Missing bearer credential");
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = app();
        let request = || {
            post_json(
                "/register",
                json!({"email": "ada@school.edu", "password": "correct horse"}),
            )
        };

        assert_eq!(
            app.clone().oneshot(request()).await.unwrap().status(),
            StatusCode::CREATED
        );
        let response = app.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_student_routes() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/student/register",
                json!({"regNumber": "21cs01", "password": "student pass"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["regNumber"], "21CS01");

        let response = app
            .clone()
            .oneshot(post_json(
                "/student/login",
                json!({"regNumber": "21CS01", "password": "student pass"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["regNumber"], "21CS01");
        assert!(body.get("token").is_none());

        let response = app
            .oneshot(post_json(
                "/student/login",
                json!({"regNumber": "21CS01", "password": "wrong pass"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

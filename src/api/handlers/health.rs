use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, SqlitePool};
use tracing::{debug, error, info_span, Instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses (
        (status = 200, description = "Database is healthy", body = [Health]),
        (status = 503, description = "Database is unhealthy", body = [Health])
    ),
    tag = "health"
)]
// axum handler for health
pub async fn health(method: Method, pool: Extension<SqlitePool>) -> impl IntoResponse {
    let acquire_span = info_span!("db.acquire", db.system = "sqlite", db.operation = "ACQUIRE");
    let result = match pool.0.acquire().instrument(acquire_span).await {
        Ok(mut conn) => {
            let ping_span = info_span!("db.ping", db.system = "sqlite", db.operation = "PING");
            match conn.ping().instrument(ping_span).await {
                Ok(()) => Ok(()),
                Err(error) => {
                    error!("Failed to ping database: {}", error);

                    Err(StatusCode::SERVICE_UNAVAILABLE)
                }
            }
        }

        Err(error) => {
            error!("Failed to acquire database connection: {}", error);

            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if result.is_ok() {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .map_err(|err| {
            error!("Failed to parse X-App header: {}", err);
        });

    let headers = headers.unwrap_or_else(|()| HeaderMap::new());

    if result.is_ok() {
        debug!("Database connection is healthy");

        (StatusCode::OK, headers, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage;

    #[tokio::test]
    async fn test_health_reports_ok_with_live_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("idento.db");
        let pool = storage::connect(path.to_str().expect("utf-8 path"))
            .await
            .expect("connect");

        let response = health(Method::GET, Extension(pool)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let x_app = response
            .headers()
            .get("X-App")
            .expect("X-App header")
            .to_str()
            .expect("ascii header");
        assert!(x_app.starts_with(env!("CARGO_PKG_NAME")));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let health: Health = serde_json::from_slice(&bytes).expect("decode");
        assert_eq!(health.database, "ok");
        assert_eq!(health.name, env!("CARGO_PKG_NAME"));
    }

    #[tokio::test]
    async fn test_health_head_has_empty_body() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("idento.db");
        let pool = storage::connect(path.to_str().expect("utf-8 path"))
            .await
            .expect("connect");

        let response = health(Method::HEAD, Extension(pool)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert!(bytes.is_empty());
    }
}

use axum::Router;

pub mod system;
pub mod v1;
pub mod v2;
pub mod v3;
pub mod v4;
pub mod v5;
pub mod v6;

/// One sub-router per endpoint version, oldest first.
pub fn router() -> Router {
    Router::new()
        .nest("/v1", v1::router())
        .nest("/v2", v2::router())
        .nest("/v3", v3::router())
        .nest("/v4", v4::router())
        .nest("/v5", v5::router())
        .nest("/v6", v6::router())
}

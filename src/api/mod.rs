// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod helpers;
pub mod user;

use poem::Route;
use poem_openapi::OpenApiService;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use user::UserApi;

use crate::app_data::AppData;

/// Compose every API under `/api` with Swagger UI under `/swagger`
///
/// `server_url` is the externally visible base URL advertised in the OpenAPI document.
pub fn build_routes(app_data: &AppData, server_url: &str) -> Route {
    let apis = (
        HealthApi,
        AuthApi::new(app_data.auth_service.clone()),
        UserApi::new(app_data.auth_service.clone()),
    );

    let api_service = OpenApiService::new(apis, "Site User Auth API", env!("CARGO_PKG_VERSION"))
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under MIT License
// See LICENSE file in the project root for full license information.

//! Health check route

/// Basic health check handler
///
/// Returns a simple "OK" response for quick service availability check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running normally", body = String)
    ),
    operation_id = "health_check"
)]
pub async fn health_check() -> &'static str {
    "OK"
}

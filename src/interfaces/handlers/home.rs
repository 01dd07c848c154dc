use actix_web::{get, HttpResponse, Responder};

use crate::entities::response::ApiResponse;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio Web API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "projects": "/api/projects",
            "project_by_id": "/api/projects/{id}",
            "project_by_slug": "/api/projects/{categoria}/{slug}",
            "filter_by_category": "/api/projects?categoria=frontend|uxui|framework",
            "contacts": "/api/contacts"
        }
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::<()>::failure("Route not found"))
}

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::{
        project::{NewProjectRequest, UpdateProjectRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub categoria: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler
        .list_projects(query.categoria.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(projects)))
}

#[instrument(skip(state))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(project)))
}

#[instrument(skip(state))]
pub async fn get_project_by_category_and_slug(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (categoria, slug) = path.into_inner();
    let project = state.project_handler
        .get_project_by_category_and_slug(&categoria, &slug)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(project)))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .create_project(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(
        ApiResponse::data(project).with_message("Project created successfully"),
    ))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::data(project).with_message("Project updated successfully"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Project deleted successfully")))
}

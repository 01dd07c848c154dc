use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{contact::NewContactRequest, response::ApiResponse},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, form))]
pub async fn create_contact(
    state: web::Data<AppState>,
    form: web::Json<NewContactRequest>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .create_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(
        ApiResponse::data(contact).with_message("Thanks for your message! I'll get back to you soon."),
    ))
}

#[instrument(skip(state))]
pub async fn list_contacts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let contacts = state.contact_handler.list_contact_messages().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(contacts)))
}

#[instrument(skip(state))]
pub async fn get_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .get_contact_message_by_id(&contact_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(contact)))
}

#[instrument(skip(state))]
pub async fn delete_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_contact_message(&contact_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Contact message deleted successfully")))
}

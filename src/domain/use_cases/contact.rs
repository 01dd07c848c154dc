use crate::{
    entities::contact::{Contact, ContactInsert, NewContactRequest},
    errors::AppError,
    repositories::contact::ContactRepository,
    utils::parse_id::parse_id,
};
use tracing::error;
use validator::Validate;

const CONTACT_NOT_FOUND: &str = "Contact message not found";

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    /// Handles the creation of a new contact message
    pub async fn create_contact_message(&self, request: NewContactRequest) -> Result<Contact, AppError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let (Some(nombre), Some(email), Some(mensaje)) = (
            present(request.nombre),
            present(request.email),
            present(request.mensaje),
        ) else {
            return Err(AppError::ValidationError(
                "All fields are required: nombre, email, mensaje".to_string(),
            ));
        };

        let insert = ContactInsert { nombre, email, mensaje };
        insert.validate()?;

        let id = self.contact_repo
            .create_contact(&insert)
            .await
            .inspect_err(|e| error!(operation = "create_contact_message", email = %insert.email, error = %e, "Failed to store contact message"))?;

        self.contact_repo
            .get_contact_by_id(id)
            .await
            .inspect_err(|e| error!(operation = "create_contact_message", id, error = %e, "Failed to read back contact message"))?
            .ok_or_else(|| AppError::InternalError(format!("Contact message {} vanished after insert", id)))
    }

    /// Retrieves a contact message by its ID
    pub async fn get_contact_message_by_id(&self, id: &str) -> Result<Contact, AppError> {
        let Some(valid_id) = parse_id(id) else {
            return Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()));
        };

        self.contact_repo
            .get_contact_by_id(valid_id)
            .await
            .inspect_err(|e| error!(operation = "get_contact_message_by_id", id = valid_id, error = %e, "Failed to fetch contact message"))?
            .ok_or_else(|| AppError::NotFound(CONTACT_NOT_FOUND.to_string()))
    }

    /// Lists all contact messages, newest first
    pub async fn list_contact_messages(&self) -> Result<Vec<Contact>, AppError> {
        self.contact_repo
            .get_all_contacts()
            .await
            .inspect_err(|e| error!(operation = "list_contact_messages", error = %e, "Failed to list contact messages"))
    }

    /// Deletes a contact message by its ID
    pub async fn delete_contact_message(&self, id: &str) -> Result<(), AppError> {
        let Some(valid_id) = parse_id(id) else {
            return Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()));
        };

        let deleted = self.contact_repo
            .delete_contact(valid_id)
            .await
            .inspect_err(|e| error!(operation = "delete_contact_message", id = valid_id, error = %e, "Failed to delete contact message"))?;

        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound(CONTACT_NOT_FOUND.to_string()))
        }
    }
}

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service::contact::domain::{Contact, ContactInput};
use service::errors::ServiceError;
use tracing::info;

use crate::{errors::ApiError, metrics, routes::ServerState};

/// Any integer outside the id range names no stored contact.
fn contact_id(raw: i64) -> Result<u32, ServiceError> {
    u32::try_from(raw).map_err(|_| ServiceError::contact_not_found())
}

#[utoipa::path(
    get, path = "/contacts", tag = "contacts",
    responses(
        (status = 200, description = "All stored contacts", body = [crate::openapi::ContactDoc]),
        (status = 404, description = "No contacts found.")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.contacts.list().await?;
    info!(count = contacts.len(), "list contacts");
    Ok(Json(contacts))
}

#[utoipa::path(
    get, path = "/contacts/{id}", tag = "contacts",
    params(("id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ContactDoc),
        (status = 404, description = "Contact not found.")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get(contact_id(id)?).await?))
}

#[utoipa::path(
    post, path = "/contacts", tag = "contacts",
    request_body = crate::openapi::ContactInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ContactDoc),
        (status = 400, description = "Cannot store more than 10 contacts.")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError> {
    match state.contacts.create(input).await {
        Ok(contact) => {
            metrics::CONTACTS_CREATED_TOTAL.inc();
            let location = format!("/contacts/{}", contact.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(contact)))
        }
        Err(e) => {
            if matches!(e, ServiceError::CapacityExceeded { .. }) {
                metrics::CAPACITY_REJECTIONS_TOTAL.inc();
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(
    put, path = "/contacts/{id}", tag = "contacts",
    params(("id" = i64, Path, description = "Contact ID")),
    request_body = crate::openapi::ContactInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ContactDoc),
        (status = 404, description = "Contact not found.")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<ContactInput>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.update(contact_id(id)?, input).await?))
}

#[utoipa::path(
    delete, path = "/contacts/{id}", tag = "contacts",
    params(("id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Contact not found.")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    state.contacts.delete(contact_id(id)?).await?;
    metrics::CONTACTS_DELETED_TOTAL.inc();
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/contacts/{id}/vcard", tag = "contacts",
    params(("id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "vCard download", content_type = "text/vcard"),
        (status = 404, description = "Contact not found.")
    )
)]
pub async fn vcard(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<impl IntoResponse, ApiError> {
    let file = state.contacts.export_vcard(contact_id(id)?).await?;
    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file.file_name)),
    ];
    Ok((headers, file.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_ids_map_to_not_found() {
        assert_eq!(contact_id(7), Ok(7));
        assert_eq!(contact_id(-1), Err(ServiceError::contact_not_found()));
        assert_eq!(contact_id(i64::from(u32::MAX) + 1), Err(ServiceError::contact_not_found()));
    }
}

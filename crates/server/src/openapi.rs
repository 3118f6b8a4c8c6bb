use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ContactDoc {
    pub id: u32,
    pub name: String,
    pub title: Option<String>,
    pub phone: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

/// Request body for create and update; an `id` field is ignored.
#[derive(ToSchema)]
pub struct ContactInputDoc {
    pub name: String,
    pub title: Option<String>,
    pub phone: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::contacts::list,
        crate::routes::contacts::get,
        crate::routes::contacts::create,
        crate::routes::contacts::update,
        crate::routes::contacts::delete,
        crate::routes::contacts::vcard,
        crate::routes::qr::generate,
    ),
    components(
        schemas(
            HealthResponse,
            ContactDoc,
            ContactInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "contacts"),
        (name = "qr")
    )
)]
pub struct ApiDoc;

//! Cover image upload handler.
//!
//! ```text
//! POST /api/admin/books/upload-image   (multipart/form-data, field "image")
//! ```

use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web};
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::{Error, ImageUpload, MAX_IMAGE_BYTES, UploadValidationError, image_url};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerAdmin;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::malformed_body_error;

const IMAGE_FIELD: &str = "image";

/// Public location of a stored image.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[schema(example = "/uploads/1700000000000-123456789.jpg")]
    pub image_url: String,
}

fn upload_error(err: UploadValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

fn multipart_error(err: MultipartError) -> Error {
    malformed_body_error(err.to_string())
}

/// Read the first `image` part, refusing to buffer more than the size cap.
async fn read_image_field(payload: &mut Multipart) -> Result<ImageUpload, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(ToString::to_string);
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            let size = bytes.len() + chunk.len();
            if size > MAX_IMAGE_BYTES {
                return Err(upload_error(UploadValidationError::TooLarge { size }));
            }
            bytes.extend_from_slice(&chunk);
        }
        return ImageUpload::try_new(content_type.as_deref(), file_name.as_deref(), bytes)
            .map_err(upload_error);
    }
    Err(upload_error(UploadValidationError::MissingFile))
}

/// Store a book cover and return its public URL.
#[utoipa::path(
    post,
    path = "/api/admin/books/upload-image",
    request_body(content_type = "multipart/form-data", description = "Form with an `image` file part"),
    responses(
        (status = 200, description = "Stored image", body = UploadResponse),
        (status = 400, description = "Invalid upload", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "uploadBookImage"
)]
#[post("/books/upload-image")]
pub async fn upload_image(
    state: web::Data<HttpState>,
    CallerAdmin(admin): CallerAdmin,
    mut payload: Multipart,
) -> ApiResult<web::Json<UploadResponse>> {
    let upload = read_image_field(&mut payload).await?;
    let stored = state.images.store(&upload).await.map_err(|err| {
        error!(error = %err, "failed to store uploaded image");
        Error::internal(err.to_string())
    })?;
    info!(admin = %admin.username, file = %stored, "stored book image");
    Ok(web::Json(UploadResponse {
        image_url: image_url(&stored),
    }))
}

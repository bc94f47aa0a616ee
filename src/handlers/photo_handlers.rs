use std::fs;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use futures_util::StreamExt;

use crate::api::state::AppState;
use crate::repo::sqlite_repository::SqliteRepository;
use crate::repo::traits::dog_trait::DogTrait;
use crate::utils::errors::ApiError;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub async fn upload_photo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    mut payload: Multipart
) -> impl Responder {
    let id = path.into_inner();

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return ApiError::BadRequest(e.to_string()).error_response(),
        };
        if field.name() != "foto" {
            continue;
        }

        let filename = match field.content_disposition().get_filename() {
            Some(filename) => filename.to_owned(),
            None => {
                return ApiError::BadRequest(
                    "arquivo de foto ausente (campo 'foto')".to_string(),
                )
                .error_response()
            }
        };
        let ext = match allowed_extension(&filename) {
            Some(ext) => ext,
            None => {
                return ApiError::BadRequest(
                    "extensão de arquivo não permitida (use png, jpg, jpeg, gif ou webp)"
                        .to_string(),
                )
                .error_response()
            }
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(e) => return ApiError::BadRequest(e.to_string()).error_response(),
            }
        }
        upload = Some((ext, bytes));
    }

    let (ext, bytes) = match upload {
        Some(upload) => upload,
        None => {
            return ApiError::BadRequest("arquivo de foto ausente (campo 'foto')".to_string())
                .error_response()
        }
    };

    match web::block(move || {
        let mut conn = state.db.connect()?;
        let repo = SqliteRepository::new(&mut conn);
        if repo.get_dog(id)?.is_none() {
            return Err(ApiError::NotFound("não encontrado".to_string()));
        }

        let filename = format!("dog_{id}.{ext}");
        store_photo(&state.uploads_dir, id, &filename, &bytes)?;
        repo.set_photo(id, &format!("/uploads/{filename}"))
    }).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(record),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

/// Lowercased extension of the filename, when it is in the allow-list.
fn allowed_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Writes the photo under its deterministic name, dropping any photo the
/// dog had under a different extension.
fn store_photo(dir: &Path, id: i64, filename: &str, bytes: &[u8]) -> Result<(), ApiError> {
    fs::create_dir_all(dir)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    for ext in ALLOWED_EXTENSIONS {
        let previous = format!("dog_{id}.{ext}");
        if previous == filename {
            continue;
        }
        match fs::remove_file(dir.join(&previous)) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(ApiError::InternalServerError(err.to_string())),
        }
    }

    fs::write(dir.join(filename), bytes)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))
}

use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::api::state::AppState;
use crate::models::owner::OwnerDetail;
use crate::repo::sqlite_repository::SqliteRepository;
use crate::repo::traits::owner_trait::OwnerTrait;
use crate::utils::errors::ApiError;
use crate::utils::humanize;

pub async fn list_owners(
    state: web::Data<AppState>
) -> impl Responder {
    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).list_owners()
    }).await {
        Ok(Ok(owners)) => HttpResponse::Ok().json(owners),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

pub async fn get_owner(
    state: web::Data<AppState>,
    path: web::Path<i64>
) -> impl Responder {
    let id = path.into_inner();

    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).get_owner(id)
    }).await {
        Ok(Ok(Some(record))) => {
            let detail = OwnerDetail {
                id: record.id,
                full_name: record.full_name,
                block: record.block,
                apartment: record.apartment,
                dog_count: record.dog_count,
                created_at: record.created_at,
                registered_ago: humanize::elapsed_since(record.created_at),
            };
            HttpResponse::Ok().json(detail)
        }
        Ok(Ok(None)) => ApiError::NotFound("não encontrado".to_string()).error_response(),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

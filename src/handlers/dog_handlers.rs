use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::api::state::AppState;
use crate::models::dog::{DogReceive, DogUpdate};
use crate::repo::sqlite_repository::SqliteRepository;
use crate::repo::traits::dog_trait::DogTrait;
use crate::utils::errors::ApiError;

pub async fn create_dog(
    state: web::Data<AppState>,
    payload: web::Json<DogReceive>
) -> impl Responder {
    let new_dog = match payload.into_inner().validate() {
        Ok(new_dog) => new_dog,
        Err(e) => return e.error_response(),
    };

    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).create_dog(&new_dog)
    }).await {
        Ok(Ok(record)) => HttpResponse::Created().json(record),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

pub async fn list_dogs(
    state: web::Data<AppState>
) -> impl Responder {
    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).list_dogs()
    }).await {
        Ok(Ok(dogs)) => HttpResponse::Ok().json(dogs),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

pub async fn get_dog(
    state: web::Data<AppState>,
    path: web::Path<i64>
) -> impl Responder {
    let id = path.into_inner();

    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).get_dog(id)
    }).await {
        Ok(Ok(Some(record))) => HttpResponse::Ok().json(record),
        Ok(Ok(None)) => ApiError::NotFound("não encontrado".to_string()).error_response(),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

pub async fn update_dog(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<DogUpdate>
) -> impl Responder {
    let id = path.into_inner();
    let changes = match payload.into_inner().validate() {
        Ok(changes) => changes,
        Err(e) => return e.error_response(),
    };

    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).update_dog(id, &changes)
    }).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(record),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

pub async fn delete_dog(
    state: web::Data<AppState>,
    path: web::Path<i64>
) -> impl Responder {
    let id = path.into_inner();

    match web::block(move || {
        let mut conn = state.db.connect()?;
        SqliteRepository::new(&mut conn).delete_dog(id)
    }).await {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ApiError::from(e).error_response(),
    }
}

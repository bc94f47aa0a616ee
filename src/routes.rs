use actix_web::{web, HttpResponse, Responder};

use crate::handlers::dog_handlers::{create_dog, delete_dog, get_dog, list_dogs, update_dog};
use crate::handlers::owner_handlers::{get_owner, list_owners};
use crate::handlers::photo_handlers::upload_photo;
use crate::utils::errors::ApiError;

pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "versão": env!("CARGO_PKG_VERSION")
    }))
}

pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }));

    cfg.service(
        web::resource("/status")
            .route(web::get().to(status))
    );

    cfg.service(
        web::resource("/cachorros")
            .route(web::post().to(create_dog))
            .route(web::get().to(list_dogs))
    );

    cfg.service(
        web::resource("/cachorros/{id}")
            .route(web::get().to(get_dog))
            .route(web::put().to(update_dog))
            .route(web::delete().to(delete_dog))
    );

    cfg.service(
        web::resource("/cachorros/{id}/foto")
            .route(web::post().to(upload_photo))
    );

    cfg.service(
        web::resource("/donos")
            .route(web::get().to(list_owners))
    );

    cfg.service(
        web::resource("/donos/{id}")
            .route(web::get().to(get_owner))
    );
}

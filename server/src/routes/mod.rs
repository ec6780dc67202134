use actix_web::{web, HttpResponse};

use errors::{Error, ErrorResponse};

pub mod answers;
pub mod index;
pub mod questions;
pub mod users;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| Error::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| Error::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| Error::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| Error::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(index::index))
    .service(
        web::scope("/api")
            .service(
                web::scope("/question")
                    .route("/list", web::get().to(questions::list))
                    .route("/detail/{question_id}", web::get().to(questions::detail))
                    .route("/create", web::post().to(questions::create))
                    .route("/update", web::put().to(questions::update))
                    .route("/delete", web::delete().to(questions::delete))
                    .route("/vote", web::post().to(questions::vote)),
            )
            .service(
                web::scope("/answer")
                    .route("/create/{question_id}", web::post().to(answers::create))
                    .route("/detail/{answer_id}", web::get().to(answers::detail))
                    .route("/update", web::put().to(answers::update))
                    .route("/delete", web::delete().to(answers::delete))
                    .route("/vote", web::post().to(answers::vote)),
            )
            .service(
                web::scope("/user")
                    .route("/create", web::post().to(users::create))
                    .route("/login", web::post().to(users::login)),
            ),
    );
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::from("Not Found"))
}

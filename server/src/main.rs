#[macro_use]
extern crate log;

use std::io;

use actix_web::{
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use dotenv::dotenv;

mod config;
mod routes;
mod tests;
mod validate;

use crate::config::Config;
use crate::routes::{not_found, routes};
use auth::JwtKeys;

fn startup_error<E: std::fmt::Display>(err: E) -> io::Error {
    error!("Failed to start server - {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(startup_error)?;
    let pool = db::new_pool(&config.database_url, config.pool_size).map_err(startup_error)?;
    let keys = Data::new(JwtKeys::from_secret(config.jwt_key.as_bytes()));
    let bind_address = config.bind_address.clone();
    let config = Data::new(config);

    info!("Listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(auth::get_identity_service())
            .app_data(Data::new(pool.clone()))
            .app_data(keys.clone())
            .app_data(config.clone())
            .configure(routes)
            .default_service(web::route().to(not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}

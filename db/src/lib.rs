#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use r2d2::Error as PoolError;

use errors::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type Connection = PooledConnection<ConnectionManager<PgConnection>>;
pub mod models;
pub mod schema;
mod search;

pub fn get_conn(pool: &PgPool) -> Result<Connection, Error> {
    pool.get().map_err(|err: PoolError| {
        error!("Failed to get connection - {}", err.to_string());
        err.into()
    })
}

pub fn new_pool(database_url: &str, max_size: u32) -> Result<PgPool, Error> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|err: PoolError| {
            error!("Failed to create db pool - {}", err.to_string());
            err.into()
        })
}

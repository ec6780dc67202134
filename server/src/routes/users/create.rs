use actix_web::{
    web::{block, Data, Json},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::hash_password;
use db::{
    get_conn,
    models::{NewUser, User},
    PgPool,
};
use errors::Error;

use crate::validate::{not_blank, validate};

#[derive(Deserialize, Serialize, Validate)]
pub struct UserCreate {
    #[validate(custom = "not_blank")]
    pub username: String,
    #[validate(custom = "not_blank")]
    pub password1: String,
    #[validate(
        custom = "not_blank",
        must_match(other = "password1", message = "Passwords do not match")
    )]
    pub password2: String,
    #[validate(custom = "not_blank", email(message = "email is not a valid address"))]
    pub email: String,
}

pub async fn create(pool: Data<PgPool>, params: Json<UserCreate>) -> Result<HttpResponse, Error> {
    validate(&params)?;
    let mut conn = get_conn(&pool)?;

    let params = params.into_inner();
    let user = block(move || {
        if User::find_existing(&mut conn, &params.username, &params.email)?.is_some() {
            return Err(Error::Conflict("User already exists".to_string()));
        }

        let password = hash_password(&params.password1)?;
        User::create(
            &mut conn,
            NewUser {
                username: params.username,
                password,
                email: params.email,
            },
        )
    })
    .await??;

    info!("Registered user {}", user.username);

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{
    web::{block, Data, Form, Json},
    Result,
};
use serde::{Deserialize, Serialize};

use auth::{create_jwt, verify_password, JwtKeys, PrivateClaim};
use db::{get_conn, models::User, PgPool};
use errors::Error;

const INCORRECT_LOGIN: &str = "Incorrect username or password";

#[derive(Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub username: String,
}

pub async fn login(
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    form: Form<LoginForm>,
) -> Result<Json<LoginResponse>, Error> {
    let mut conn = get_conn(&pool)?;
    let form = form.into_inner();

    let user = block(move || {
        match User::find_by_username(&mut conn, &form.username)? {
            Some(user) if verify_password(&user.password, &form.password)? => Ok(user),
            _ => {
                warn!("Rejected login for {}", form.username);
                Err(Error::Unauthorized(INCORRECT_LOGIN.to_string()))
            }
        }
    })
    .await??;

    let access_token = create_jwt(&keys, &PrivateClaim::new(user.username.clone()))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        username: user.username,
    }))
}

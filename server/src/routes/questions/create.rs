use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{get_claim_from_identity, JwtKeys};
use db::{
    get_conn,
    models::{Question, User},
    PgPool,
};
use errors::Error;

use crate::validate::{not_blank, validate};

#[derive(Deserialize, Serialize, Validate)]
pub struct QuestionCreate {
    #[validate(custom = "not_blank")]
    pub subject: String,
    #[validate(custom = "not_blank")]
    pub content: String,
}

pub async fn create(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<QuestionCreate>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    validate(&params)?;
    let mut conn = get_conn(&pool)?;

    let params = params.into_inner();
    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        Question::create(&mut conn, Some(user.id), params.subject, params.content)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

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
    models::{Answer, Owned, User},
    PgPool,
};
use errors::Error;

use crate::validate::{not_blank, validate};

#[derive(Deserialize, Serialize, Validate)]
pub struct AnswerUpdate {
    pub answer_id: i32,
    #[validate(custom = "not_blank")]
    pub content: String,
}

pub async fn update(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<AnswerUpdate>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    validate(&params)?;
    let mut conn = get_conn(&pool)?;

    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        let answer = Answer::find_by_id(&mut conn, params.answer_id)?;
        answer.ensure_owned_by(&user, "Only the author can update this answer")?;

        Answer::update(&mut conn, answer.id, &params.content)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

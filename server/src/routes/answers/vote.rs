use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};

use auth::{get_claim_from_identity, JwtKeys};
use db::{
    get_conn,
    models::{Answer, User},
    PgPool,
};
use errors::Error;

#[derive(Deserialize, Serialize)]
pub struct AnswerVote {
    pub answer_id: i32,
}

pub async fn vote(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<AnswerVote>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    let mut conn = get_conn(&pool)?;

    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        let answer = Answer::find_by_id(&mut conn, params.answer_id)?;

        Answer::vote(&mut conn, answer.id, user.id)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};

use auth::{get_claim_from_identity, JwtKeys};
use db::{
    get_conn,
    models::{Answer, Owned, User},
    PgPool,
};
use errors::Error;

#[derive(Deserialize, Serialize)]
pub struct AnswerDelete {
    pub answer_id: i32,
}

pub async fn delete(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<AnswerDelete>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    let mut conn = get_conn(&pool)?;

    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        let answer = Answer::find_by_id(&mut conn, params.answer_id)?;
        answer.ensure_owned_by(&user, "Only the author can delete this answer")?;

        Answer::delete(&mut conn, answer.id)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};

use auth::{get_claim_from_identity, JwtKeys};
use db::{
    get_conn,
    models::{Owned, Question, User},
    PgPool,
};
use errors::Error;

#[derive(Deserialize, Serialize)]
pub struct QuestionDelete {
    pub question_id: i32,
}

pub async fn delete(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<QuestionDelete>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    let mut conn = get_conn(&pool)?;

    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        let question = Question::find_by_id(&mut conn, params.question_id)?;
        question.ensure_owned_by(&user, "Only the author can delete this question")?;

        Question::delete(&mut conn, question.id)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

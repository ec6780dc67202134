use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use db::{
    get_conn,
    models::{Answer, AnswerDetails},
    PgPool,
};
use errors::Error;

pub async fn detail(pool: Data<PgPool>, answer_id: Path<i32>) -> Result<Json<AnswerDetails>, Error> {
    let answer_id = answer_id.into_inner();
    let mut conn = get_conn(&pool)?;

    let answer = block(move || Answer::details(&mut conn, answer_id)).await??;

    Ok(Json(answer))
}

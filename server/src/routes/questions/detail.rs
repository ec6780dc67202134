use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use db::{
    get_conn,
    models::{Question, QuestionDetails},
    PgPool,
};
use errors::Error;

pub async fn detail(pool: Data<PgPool>, question_id: Path<i32>) -> Result<Json<QuestionDetails>, Error> {
    let question_id = question_id.into_inner();
    let mut conn = get_conn(&pool)?;

    let question = block(move || Question::details(&mut conn, question_id)).await??;

    Ok(Json(question))
}

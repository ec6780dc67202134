use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::{get_conn, models::Question, models::QuestionList, PgPool};
use errors::Error;

use crate::validate::validate;

fn default_size() -> i64 {
    10
}

#[derive(Deserialize, Serialize, Validate)]
pub struct ListParams {
    #[serde(default)]
    #[validate(range(min = 0, message = "page must not be negative"))]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 0, message = "size must not be negative"))]
    pub size: i64,
    #[serde(default)]
    pub keyword: String,
}

pub async fn list(pool: Data<PgPool>, params: Query<ListParams>) -> Result<Json<QuestionList>, Error> {
    validate(&params)?;
    let skip = params
        .page
        .checked_mul(params.size)
        .ok_or_else(|| Error::BadRequest("page is out of range".to_string()))?;
    let mut conn = get_conn(&pool)?;

    let list = block(move || Question::list_paged(&mut conn, skip, params.size, &params.keyword))
        .await??;

    Ok(Json(list))
}

use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json, Path},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{get_claim_from_identity, JwtKeys};
use db::{
    get_conn,
    models::{Answer, User},
    PgPool,
};
use errors::Error;

use crate::validate::{not_blank, validate};

#[derive(Deserialize, Serialize, Validate)]
pub struct AnswerCreate {
    #[validate(custom = "not_blank")]
    pub content: String,
}

pub async fn create(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    question_id: Path<i32>,
    params: Json<AnswerCreate>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    validate(&params)?;
    let question_id = question_id.into_inner();
    let mut conn = get_conn(&pool)?;

    let params = params.into_inner();
    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        Answer::create(&mut conn, question_id, Some(user.id), params.content)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::Method;
    use chrono::{Duration, Utc};

    use auth::PrivateClaim;
    use db::models::{AnswerDetails, Question};
    use errors::ErrorResponse;

    use super::AnswerCreate;
    use crate::tests::helpers::tests::{
        auth_token, clear_data, create_user, get_conn, test_json, test_status, token_for,
    };

    #[actix_rt::test]
    async fn test_create_answer() {
        let mut conn = get_conn();
        clear_data(&mut conn);
        let user = create_user(&mut conn, "helper", "password");
        let question =
            Question::create(&mut conn, None, "Subject".to_string(), "Content".to_string())
                .unwrap();

        let status = test_status(
            Method::POST,
            &format!("/api/answer/create/{}", question.id),
            AnswerCreate {
                content: "Read the book".to_string(),
            },
            Some(auth_token("helper")),
        )
        .await;
        assert_eq!(status, 204);

        let answers = AnswerDetails::find_by_questions(&mut conn, &[question.id]).unwrap();
        let answers = &answers[&question.id];
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].content, "Read the book");
        assert_eq!(answers[0].user.as_ref().unwrap().id, user.id);

        clear_data(&mut conn);
    }

    #[actix_rt::test]
    async fn test_create_answer_for_missing_question() {
        let mut conn = get_conn();
        clear_data(&mut conn);
        create_user(&mut conn, "helper", "password");

        let (status, body): (u16, ErrorResponse) = test_json(
            Method::POST,
            "/api/answer/create/999999",
            AnswerCreate {
                content: "Anyone there?".to_string(),
            },
            Some(auth_token("helper")),
        )
        .await;
        assert_eq!(status, 404);
        assert_eq!(body.errors, vec!["Question not found".to_string()]);

        clear_data(&mut conn);
    }

    #[actix_rt::test]
    async fn test_create_answer_rejects_blank_content() {
        let (status, body): (u16, ErrorResponse) = test_json(
            Method::POST,
            "/api/answer/create/1",
            AnswerCreate {
                content: "".to_string(),
            },
            Some(auth_token("helper")),
        )
        .await;
        assert_eq!(status, 422);
        assert_eq!(body.errors, vec!["content is required".to_string()]);
    }

    #[actix_rt::test]
    async fn test_expired_token_wins_over_blank_content() {
        let mut claim = PrivateClaim::new("helper".to_string());
        claim.set_exp((Utc::now() - Duration::minutes(1)).timestamp());

        let (status, body): (u16, ErrorResponse) = test_json(
            Method::POST,
            "/api/answer/create/1",
            AnswerCreate {
                content: "".to_string(),
            },
            Some(token_for(&claim)),
        )
        .await;
        assert_eq!(status, 401);
        assert_eq!(body.errors, vec!["Could not validate credentials".to_string()]);
    }
}

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
    models::{Owned, Question, User},
    PgPool,
};
use errors::Error;

use crate::validate::{not_blank, validate};

#[derive(Deserialize, Serialize, Validate)]
pub struct QuestionUpdate {
    pub question_id: i32,
    #[validate(custom = "not_blank")]
    pub subject: String,
    #[validate(custom = "not_blank")]
    pub content: String,
}

pub async fn update(
    id: Identity,
    pool: Data<PgPool>,
    keys: Data<JwtKeys>,
    params: Json<QuestionUpdate>,
) -> Result<HttpResponse, Error> {
    let claim = get_claim_from_identity(&id, &keys)?;
    validate(&params)?;
    let mut conn = get_conn(&pool)?;

    block(move || {
        let user = User::from_claim(&mut conn, &claim)?;
        let question = Question::find_by_id(&mut conn, params.question_id)?;
        question.ensure_owned_by(&user, "Only the author can update this question")?;

        Question::update(&mut conn, question.id, &params.subject, &params.content)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::Method;

    use db::models::Question;
    use errors::ErrorResponse;

    use super::QuestionUpdate;
    use crate::tests::helpers::tests::{
        auth_token, clear_data, create_user, get_conn, test_json, test_status,
    };

    #[actix_rt::test]
    async fn test_owner_updates_question() {
        let mut conn = get_conn();
        clear_data(&mut conn);
        let user = create_user(&mut conn, "author", "password");
        let question = Question::create(
            &mut conn,
            Some(user.id),
            "Old subject".to_string(),
            "Old content".to_string(),
        )
        .unwrap();

        let status = test_status(
            Method::PUT,
            "/api/question/update",
            QuestionUpdate {
                question_id: question.id,
                subject: "New subject".to_string(),
                content: "New content".to_string(),
            },
            Some(auth_token("author")),
        )
        .await;
        assert_eq!(status, 204);

        let updated = Question::find_by_id(&mut conn, question.id).unwrap();
        assert_eq!(updated.subject, "New subject");
        assert_eq!(updated.content, "New content");
        assert!(updated.modify_date.is_some());

        clear_data(&mut conn);
    }

    #[actix_rt::test]
    async fn test_other_user_cannot_update() {
        let mut conn = get_conn();
        clear_data(&mut conn);
        let author = create_user(&mut conn, "author", "password");
        create_user(&mut conn, "intruder", "password");
        let question = Question::create(
            &mut conn,
            Some(author.id),
            "Subject".to_string(),
            "Content".to_string(),
        )
        .unwrap();

        let (status, body): (u16, ErrorResponse) = test_json(
            Method::PUT,
            "/api/question/update",
            QuestionUpdate {
                question_id: question.id,
                subject: "Hijacked".to_string(),
                content: "Hijacked".to_string(),
            },
            Some(auth_token("intruder")),
        )
        .await;
        assert_eq!(status, 403);
        assert_eq!(
            body.errors,
            vec!["Only the author can update this question".to_string()]
        );

        let unchanged = Question::find_by_id(&mut conn, question.id).unwrap();
        assert_eq!(unchanged.subject, "Subject");

        clear_data(&mut conn);
    }

    #[actix_rt::test]
    async fn test_update_missing_question() {
        let mut conn = get_conn();
        clear_data(&mut conn);
        create_user(&mut conn, "author", "password");

        let status = test_status(
            Method::PUT,
            "/api/question/update",
            QuestionUpdate {
                question_id: 999_999,
                subject: "Subject".to_string(),
                content: "Content".to_string(),
            },
            Some(auth_token("author")),
        )
        .await;
        assert_eq!(status, 404);

        clear_data(&mut conn);
    }
}

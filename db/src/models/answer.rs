use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::result::{DatabaseErrorKind, Error as DBError};
use diesel::{self, ExpressionMethods, NullableExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{not_found, AnswerVoter, Owned, Question, UserDetails};
use crate::schema::{answers, users};

#[derive(Clone, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[diesel(table_name = answers)]
pub struct Answer {
    pub id: i32,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub question_id: i32,
    pub user_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = answers)]
pub struct NewAnswer {
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub question_id: i32,
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnswerDetails {
    pub id: i32,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub user: Option<UserDetails>,
    pub question_id: i32,
    pub voter: Vec<UserDetails>,
}

impl Owned for Answer {
    fn owner_id(&self) -> Option<i32> {
        self.user_id
    }
}

impl Answer {
    /// Fails with not found when the question does not exist.
    pub fn create(
        conn: &mut PgConnection,
        question_id: i32,
        user_id: Option<i32>,
        content: String,
    ) -> Result<Answer, Error> {
        Question::find_by_id(conn, question_id)?;

        Answer::insert(
            conn,
            NewAnswer {
                content,
                create_date: Utc::now(),
                question_id,
                user_id,
            },
        )
    }

    /// The question can disappear between the lookup and the insert; the
    /// foreign key then reports it as missing.
    fn insert(conn: &mut PgConnection, new_answer: NewAnswer) -> Result<Answer, Error> {
        diesel::insert_into(answers::table)
            .values(new_answer)
            .get_result(conn)
            .map_err(|err| match err {
                DBError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    Error::NotFound("Question not found".to_string())
                }
                err => err.into(),
            })
    }

    pub fn find_by_id(conn: &mut PgConnection, answer_id: i32) -> Result<Answer, Error> {
        answers::table
            .find(answer_id)
            .first::<Answer>(conn)
            .map_err(not_found("Answer not found"))
    }

    pub fn update(conn: &mut PgConnection, answer_id: i32, content: &str) -> Result<(), Error> {
        diesel::update(answers::table.find(answer_id))
            .set((
                answers::content.eq(content),
                answers::modify_date.eq(Some(Utc::now())),
            ))
            .execute(conn)?;

        Ok(())
    }

    pub fn delete(conn: &mut PgConnection, answer_id: i32) -> Result<(), Error> {
        diesel::delete(answers::table.find(answer_id)).execute(conn)?;

        Ok(())
    }

    pub fn vote(conn: &mut PgConnection, answer_id: i32, user_id: i32) -> Result<(), Error> {
        AnswerVoter::add(conn, user_id, answer_id)
    }

    pub fn details(conn: &mut PgConnection, answer_id: i32) -> Result<AnswerDetails, Error> {
        let row = answers::table
            .left_join(users::table)
            .filter(answers::id.eq(answer_id))
            .select((
                answers::all_columns,
                (users::id, users::username, users::email).nullable(),
            ))
            .first::<(Answer, Option<UserDetails>)>(conn)
            .map_err(not_found("Answer not found"))?;

        let mut voters = AnswerVoter::find_by_answers(conn, &[answer_id])?;
        let voter = voters.remove(&answer_id).unwrap_or_default();

        Ok(AnswerDetails::from_row(row, voter))
    }
}

impl AnswerDetails {
    fn from_row((answer, user): (Answer, Option<UserDetails>), voter: Vec<UserDetails>) -> Self {
        AnswerDetails {
            id: answer.id,
            content: answer.content,
            create_date: answer.create_date,
            modify_date: answer.modify_date,
            user,
            question_id: answer.question_id,
            voter,
        }
    }

    /// Answers of each question, oldest first, keyed by question id.
    pub fn find_by_questions(
        conn: &mut PgConnection,
        question_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<AnswerDetails>>, Error> {
        let rows = answers::table
            .left_join(users::table)
            .filter(answers::question_id.eq_any(question_ids.to_vec()))
            .select((
                answers::all_columns,
                (users::id, users::username, users::email).nullable(),
            ))
            .order((answers::create_date.asc(), answers::id.asc()))
            .load::<(Answer, Option<UserDetails>)>(conn)?;

        let answer_ids: Vec<i32> = rows.iter().map(|(answer, _)| answer.id).collect();
        let mut voters = AnswerVoter::find_by_answers(conn, &answer_ids)?;

        let mut grouped: HashMap<i32, Vec<AnswerDetails>> = HashMap::new();
        for row in rows {
            let voter = voters.remove(&row.0.id).unwrap_or_default();
            let details = AnswerDetails::from_row(row, voter);
            grouped.entry(details.question_id).or_default().push(details);
        }

        Ok(grouped)
    }
}

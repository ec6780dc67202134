use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::{
    self, pg::Pg, BoolExpressionMethods, ExpressionMethods, PgConnection,
    PgTextExpressionMethods, QueryDsl, RunQueryDsl,
};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{not_found, AnswerDetails, Owned, QuestionVoter, UserDetails};
use crate::schema::{answers, questions, users};
use crate::search::like_pattern;

#[derive(Clone, Debug, Deserialize, Identifiable, Queryable, Serialize)]
#[diesel(table_name = questions)]
pub struct Question {
    pub id: i32,
    pub subject: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub user_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestion {
    pub subject: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub user_id: Option<i32>,
}

/// A question together with its author, answers and voters.
#[derive(Debug, Deserialize, Serialize)]
pub struct QuestionDetails {
    pub id: i32,
    pub subject: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub user: Option<UserDetails>,
    pub answers: Vec<AnswerDetails>,
    pub voter: Vec<UserDetails>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuestionList {
    pub total: i64,
    pub question_list: Vec<QuestionDetails>,
}

impl Owned for Question {
    fn owner_id(&self) -> Option<i32> {
        self.user_id
    }
}

impl Question {
    pub fn create(
        conn: &mut PgConnection,
        user_id: Option<i32>,
        subject: String,
        content: String,
    ) -> Result<Question, Error> {
        let question = diesel::insert_into(questions::table)
            .values(NewQuestion {
                subject,
                content,
                create_date: Utc::now(),
                user_id,
            })
            .get_result(conn)?;

        Ok(question)
    }

    pub fn find_by_id(conn: &mut PgConnection, question_id: i32) -> Result<Question, Error> {
        questions::table
            .find(question_id)
            .first::<Question>(conn)
            .map_err(not_found("Question not found"))
    }

    pub fn update(
        conn: &mut PgConnection,
        question_id: i32,
        subject: &str,
        content: &str,
    ) -> Result<(), Error> {
        diesel::update(questions::table.find(question_id))
            .set((
                questions::subject.eq(subject),
                questions::content.eq(content),
                questions::modify_date.eq(Some(Utc::now())),
            ))
            .execute(conn)?;

        Ok(())
    }

    /// Answers and votes go with the question through cascading foreign keys.
    pub fn delete(conn: &mut PgConnection, question_id: i32) -> Result<(), Error> {
        diesel::delete(questions::table.find(question_id)).execute(conn)?;

        Ok(())
    }

    pub fn vote(conn: &mut PgConnection, question_id: i32, user_id: i32) -> Result<(), Error> {
        QuestionVoter::add(conn, user_id, question_id)
    }

    pub fn details(conn: &mut PgConnection, question_id: i32) -> Result<QuestionDetails, Error> {
        let question = Question::find_by_id(conn, question_id)?;
        let mut details = Question::with_relations(conn, vec![question])?;

        details
            .pop()
            .ok_or_else(|| Error::NotFound("Question not found".to_string()))
    }

    /// One page of questions, newest first. A non-blank keyword restricts the
    /// page to questions whose subject, content, author name, or any answer's
    /// content or author name contains it, ignoring case. `total` counts every
    /// match, not just the page.
    pub fn list_paged(
        conn: &mut PgConnection,
        skip: i64,
        limit: i64,
        keyword: &str,
    ) -> Result<QuestionList, Error> {
        let keyword = keyword.trim();
        let related_ids = if keyword.is_empty() {
            Vec::new()
        } else {
            Question::ids_matching_relations(conn, keyword)?
        };

        let total = filtered(keyword, &related_ids)
            .count()
            .get_result::<i64>(conn)?;

        let questions = filtered(keyword, &related_ids)
            .order((questions::create_date.desc(), questions::id.desc()))
            .offset(skip)
            .limit(limit)
            .load::<Question>(conn)?;

        Ok(QuestionList {
            total,
            question_list: Question::with_relations(conn, questions)?,
        })
    }

    /// Ids of questions whose author, or one of whose answers (content or
    /// author), matches the keyword. Each id appears once.
    fn ids_matching_relations(conn: &mut PgConnection, keyword: &str) -> Result<Vec<i32>, Error> {
        let pattern = like_pattern(keyword);

        let mut ids = questions::table
            .inner_join(users::table)
            .filter(users::username.ilike(pattern.clone()))
            .select(questions::id)
            .load::<i32>(conn)?;

        let by_answers = answers::table
            .left_join(users::table)
            .filter(
                answers::content
                    .ilike(pattern.clone())
                    .or(users::username.ilike(pattern)),
            )
            .select(answers::question_id)
            .load::<i32>(conn)?;

        ids.extend(by_answers);
        ids.sort_unstable();
        ids.dedup();

        Ok(ids)
    }

    fn with_relations(
        conn: &mut PgConnection,
        questions: Vec<Question>,
    ) -> Result<Vec<QuestionDetails>, Error> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids: Vec<i32> = questions.iter().map(|q| q.id).collect();
        let author_ids: Vec<i32> = questions.iter().filter_map(|q| q.user_id).collect();

        let authors: HashMap<i32, UserDetails> = users::table
            .filter(users::id.eq_any(author_ids))
            .select((users::id, users::username, users::email))
            .load::<UserDetails>(conn)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        let mut answers = AnswerDetails::find_by_questions(conn, &question_ids)?;
        let mut voters = QuestionVoter::find_by_questions(conn, &question_ids)?;

        Ok(questions
            .into_iter()
            .map(|question| QuestionDetails {
                user: question.user_id.and_then(|id| authors.get(&id).cloned()),
                answers: answers.remove(&question.id).unwrap_or_default(),
                voter: voters.remove(&question.id).unwrap_or_default(),
                id: question.id,
                subject: question.subject,
                content: question.content,
                create_date: question.create_date,
                modify_date: question.modify_date,
            })
            .collect())
    }
}

fn filtered<'a>(keyword: &str, related_ids: &[i32]) -> questions::BoxedQuery<'a, Pg> {
    let mut query = questions::table.into_boxed();
    if !keyword.is_empty() {
        let pattern = like_pattern(keyword);
        query = query.filter(
            questions::subject
                .ilike(pattern.clone())
                .or(questions::content.ilike(pattern))
                .or(questions::id.eq_any(related_ids.to_vec())),
        );
    }

    query
}

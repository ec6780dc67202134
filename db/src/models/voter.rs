use std::collections::HashMap;

use diesel::{self, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};

use errors::Error;

use crate::models::UserDetails;
use crate::schema::{answer_voter, question_voter, users};

#[derive(Debug, Identifiable, Insertable, Queryable)]
#[diesel(table_name = question_voter)]
#[diesel(primary_key(user_id, question_id))]
pub struct QuestionVoter {
    pub user_id: i32,
    pub question_id: i32,
}

#[derive(Debug, Identifiable, Insertable, Queryable)]
#[diesel(table_name = answer_voter)]
#[diesel(primary_key(user_id, answer_id))]
pub struct AnswerVoter {
    pub user_id: i32,
    pub answer_id: i32,
}

impl QuestionVoter {
    /// Records a vote. The composite primary key makes a repeated vote a no-op.
    pub fn add(conn: &mut PgConnection, user_id: i32, question_id: i32) -> Result<(), Error> {
        diesel::insert_into(question_voter::table)
            .values(QuestionVoter {
                user_id,
                question_id,
            })
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    /// Voters of each question, keyed by question id.
    pub fn find_by_questions(
        conn: &mut PgConnection,
        question_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<UserDetails>>, Error> {
        let rows = question_voter::table
            .inner_join(users::table)
            .filter(question_voter::question_id.eq_any(question_ids.to_vec()))
            .select((
                question_voter::question_id,
                (users::id, users::username, users::email),
            ))
            .order(users::id.asc())
            .load::<(i32, UserDetails)>(conn)?;

        Ok(group_by_key(rows))
    }
}

impl AnswerVoter {
    pub fn add(conn: &mut PgConnection, user_id: i32, answer_id: i32) -> Result<(), Error> {
        diesel::insert_into(answer_voter::table)
            .values(AnswerVoter { user_id, answer_id })
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    pub fn find_by_answers(
        conn: &mut PgConnection,
        answer_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<UserDetails>>, Error> {
        let rows = answer_voter::table
            .inner_join(users::table)
            .filter(answer_voter::answer_id.eq_any(answer_ids.to_vec()))
            .select((
                answer_voter::answer_id,
                (users::id, users::username, users::email),
            ))
            .order(users::id.asc())
            .load::<(i32, UserDetails)>(conn)?;

        Ok(group_by_key(rows))
    }
}

pub(crate) fn group_by_key<T>(rows: Vec<(i32, T)>) -> HashMap<i32, Vec<T>> {
    let mut grouped: HashMap<i32, Vec<T>> = HashMap::new();
    for (key, value) in rows {
        grouped.entry(key).or_default().push(value);
    }

    grouped
}

use diesel::{
    self, BoolExpressionMethods, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl,
    RunQueryDsl,
};
use serde::{Deserialize, Serialize};

use auth::PrivateClaim;
use errors::{Error, INVALID_CREDENTIALS};

use crate::schema::users;

#[derive(Debug, Identifiable, Queryable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// argon2 PHC string, never the plain password
    pub password: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Public view of a user, safe to send to clients.
#[derive(Clone, Debug, Deserialize, PartialEq, Queryable, Serialize)]
pub struct UserDetails {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn create(conn: &mut PgConnection, new_user: NewUser) -> Result<User, Error> {
        let user = diesel::insert_into(users::table)
            .values(new_user)
            .get_result(conn)?;

        Ok(user)
    }

    pub fn find_by_username(conn: &mut PgConnection, username: &str) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::{username as username_field, users as users_table};

        let user = users_table
            .filter(username_field.eq(username))
            .first::<User>(conn)
            .optional()?;

        Ok(user)
    }

    /// Finds a user that already holds either the username or the email.
    pub fn find_existing(
        conn: &mut PgConnection,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::{email as email_field, username as username_field, users as users_table};

        let user = users_table
            .filter(username_field.eq(username).or(email_field.eq(email)))
            .first::<User>(conn)
            .optional()?;

        Ok(user)
    }

    /// Resolves the subject of a validated token. A token for a user that no
    /// longer exists is treated like any other bad token.
    pub fn from_claim(conn: &mut PgConnection, claim: &PrivateClaim) -> Result<User, Error> {
        User::find_by_username(conn, &claim.sub)?
            .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

use diesel::result::Error as DBError;

use errors::Error;

mod answer;
mod question;
mod user;
mod voter;

pub use self::answer::*;
pub use self::question::*;
pub use self::user::*;
pub use self::voter::*;

/// Resources that can only be changed by the user who wrote them.
pub trait Owned {
    fn owner_id(&self) -> Option<i32>;

    fn is_owned_by(&self, user: &User) -> bool {
        self.owner_id() == Some(user.id)
    }

    /// Rejects with `Forbidden` unless `user` owns the resource. Resources
    /// without an owner can't be changed by anyone.
    fn ensure_owned_by(&self, user: &User, message: &str) -> Result<(), Error> {
        if self.is_owned_by(user) {
            Ok(())
        } else {
            Err(Error::Forbidden(message.to_string()))
        }
    }
}

pub(crate) fn not_found(message: &'static str) -> impl Fn(DBError) -> Error {
    move |err| match err {
        DBError::NotFound => Error::NotFound(message.to_string()),
        err => err.into(),
    }
}

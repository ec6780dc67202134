mod create;
mod delete;
mod detail;
mod list;
mod update;
mod vote;

pub use self::create::*;
pub use self::delete::*;
pub use self::detail::*;
pub use self::list::*;
pub use self::update::*;
pub use self::vote::*;

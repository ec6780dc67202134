mod create;
mod login;

pub use self::create::*;
pub use self::login::*;

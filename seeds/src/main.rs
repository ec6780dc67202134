#[macro_use]
extern crate log;

use std::env;
use std::process;

use dotenv::dotenv;

use auth::hash_password;
use db::{
    get_conn,
    models::{NewUser, Question, User},
    new_pool,
};
use errors::Error;

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo-password";
const QUESTION_COUNT: usize = 300;

fn seed(database_url: &str) -> Result<(), Error> {
    let pool = new_pool(database_url, 1)?;
    let mut conn = get_conn(&pool)?;

    let user = match User::find_by_username(&mut conn, DEMO_USERNAME)? {
        Some(user) => user,
        None => User::create(
            &mut conn,
            NewUser {
                username: DEMO_USERNAME.to_string(),
                password: hash_password(DEMO_PASSWORD)?,
                email: format!("{}@example.com", DEMO_USERNAME),
            },
        )?,
    };

    for i in 1..=QUESTION_COUNT {
        Question::create(
            &mut conn,
            Some(user.id),
            format!("Sample question [{:03}]", i),
            "Seeded content for paging through the question list.".to_string(),
        )?;
    }

    info!("Seeded {} questions for {}", QUESTION_COUNT, user.username);
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init();

    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            error!("DATABASE_URL must be set");
            process::exit(1);
        }
    };

    if let Err(err) = seed(&database_url) {
        error!("Seeding failed - {}", err);
        process::exit(1);
    }
}

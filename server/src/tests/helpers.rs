#[cfg(test)]
pub mod tests {
    use std::env;

    use actix_http::Request;
    use actix_service::Service;
    use actix_web::{
        body::MessageBody,
        dev::ServiceResponse,
        error::Error,
        http::Method,
        test,
        web::{self, Bytes, Data},
        App,
    };
    use diesel::{self, Connection, PgConnection, RunQueryDsl};
    use dotenv::dotenv;
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json;

    use auth::{create_jwt, get_identity_service, hash_password, JwtKeys, PrivateClaim};
    use db::{
        models::{NewUser, User},
        new_pool,
        schema::{answer_voter, answers, question_voter, questions, users},
    };

    use crate::config::Config;
    use crate::routes::{not_found, routes};

    pub const TEST_JWT_KEY: &str = "forum-test-secret";

    pub fn test_config() -> Config {
        dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_key: TEST_JWT_KEY.to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            pool_size: 2,
            index_file: "frontend/dist/index.html".to_string(),
        }
    }

    pub async fn get_service_with(
        config: Config,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        let pool = new_pool(&config.database_url, config.pool_size).unwrap();
        let keys = JwtKeys::from_secret(config.jwt_key.as_bytes());

        test::init_service(
            App::new()
                .wrap(get_identity_service())
                .app_data(Data::new(pool))
                .app_data(Data::new(keys))
                .app_data(Data::new(config))
                .configure(routes)
                .default_service(web::route().to(not_found)),
        )
        .await
    }

    /// Sends a request through a fresh app and returns status and raw body.
    pub async fn send(req: test::TestRequest) -> (u16, Bytes) {
        send_with(test_config(), req).await
    }

    pub async fn send_with(config: Config, req: test::TestRequest) -> (u16, Bytes) {
        let app = get_service_with(config).await;
        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;

        (status, body)
    }

    fn parse_body<R: DeserializeOwned>(status: u16, body: Bytes) -> R {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        })
    }

    fn with_token(mut req: test::TestRequest, token: Option<String>) -> test::TestRequest {
        if let Some(token) = token {
            req = req.insert_header(("Authorization", token));
        }

        req
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(route: &str, token: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let req = with_token(test::TestRequest::get().uri(route), token);
        let (status, body) = send(req).await;

        (status, parse_body(status, body))
    }

    /// Helper for JSON body requests that answer with a JSON body
    pub async fn test_json<T: Serialize, R>(
        method: Method,
        route: &str,
        params: T,
        token: Option<String>,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let req = test::TestRequest::default()
            .method(method)
            .uri(route)
            .set_json(&params);
        let (status, body) = send(with_token(req, token)).await;

        (status, parse_body(status, body))
    }

    /// Helper for JSON body requests where only the status matters
    pub async fn test_status<T: Serialize>(
        method: Method,
        route: &str,
        params: T,
        token: Option<String>,
    ) -> u16 {
        let req = test::TestRequest::default()
            .method(method)
            .uri(route)
            .set_json(&params);

        send(with_token(req, token)).await.0
    }

    pub async fn test_login<R>(username: &str, password: &str) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_form(&[("username", username), ("password", password)]);
        let (status, body) = send(req).await;

        (status, parse_body(status, body))
    }

    pub fn get_conn() -> PgConnection {
        PgConnection::establish(&test_config().database_url).unwrap()
    }

    pub fn create_user(conn: &mut PgConnection, username: &str, password: &str) -> User {
        User::create(
            conn,
            NewUser {
                username: username.to_string(),
                password: hash_password(password).unwrap(),
                email: format!("{}@example.com", username),
            },
        )
        .unwrap()
    }

    /// `Authorization` header value for a freshly issued token.
    pub fn auth_token(username: &str) -> String {
        token_for(&PrivateClaim::new(username.to_string()))
    }

    pub fn token_for(claim: &PrivateClaim) -> String {
        let keys = JwtKeys::from_secret(TEST_JWT_KEY.as_bytes());
        format!("Bearer {}", create_jwt(&keys, claim).unwrap())
    }

    pub fn clear_data(conn: &mut PgConnection) {
        diesel::delete(answer_voter::table).execute(conn).unwrap();
        diesel::delete(question_voter::table).execute(conn).unwrap();
        diesel::delete(answers::table).execute(conn).unwrap();
        diesel::delete(questions::table).execute(conn).unwrap();
        diesel::delete(users::table).execute(conn).unwrap();
    }
}

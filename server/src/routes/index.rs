use std::fs;

use actix_web::{
    http::header::ContentType,
    web::{block, Data},
    HttpResponse,
};

use errors::Error;

use crate::config::Config;

/// Serves the frontend's entry page.
pub async fn index(config: Data<Config>) -> Result<HttpResponse, Error> {
    let path = config.index_file.clone();
    let page = block(move || fs::read_to_string(&path))
        .await?
        .map_err(|err| {
            error!("Failed to read index file {} - {}", config.index_file, err);
            Error::NotFound("Not Found".to_string())
        })?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use actix_web::test::TestRequest;
    use errors::ErrorResponse;

    use crate::tests::helpers::tests::{send_with, test_config, test_get};

    #[actix_rt::test]
    async fn test_serves_index_file() {
        let path = env::temp_dir().join("forum-index-test.html");
        fs::write(&path, "<html><body>forum</body></html>").unwrap();

        let mut config = test_config();
        config.index_file = path.to_string_lossy().to_string();

        let (status, body) = send_with(config, TestRequest::get().uri("/")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "<html><body>forum</body></html>");

        fs::remove_file(&path).unwrap();
    }

    #[actix_rt::test]
    async fn test_missing_index_file() {
        let mut config = test_config();
        config.index_file = "does/not/exist.html".to_string();

        let (status, _) = send_with(config, TestRequest::get().uri("/")).await;
        assert_eq!(status, 404);
    }

    #[actix_rt::test]
    async fn test_unknown_route() {
        let (status, body): (u16, ErrorResponse) = test_get("/api/nothing/here", None).await;
        assert_eq!(status, 404);
        assert_eq!(body.errors, vec!["Not Found".to_string()]);
    }
}

//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiErrorDetail, ApiErrorResponse, ApiErrorType};

/// Drop-in for `axum::Json` that reports bad bodies as `ApiErrorResponse`
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Rejection for unreadable request bodies
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ApiErrorDetail {
                message: self.message,
                error_type: ApiErrorType::InvalidRequestError,
                code: Some("invalid_body".to_string()),
            },
        };

        (self.status, AxumJson(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| JsonRejection {
                status: rejection.status(),
                message: describe(&rejection),
            })
    }
}

/// Messages are fixed text. serde's own errors quote the offending value.
fn describe(rejection: &AxumJsonRejection) -> String {
    match rejection {
        AxumJsonRejection::JsonDataError(_) => {
            "Invalid JSON data: a field is missing or has the wrong type".to_string()
        }
        AxumJsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        AxumJsonRejection::MissingJsonContentType(_) => {
            "Expected 'Content-Type: application/json'".to_string()
        }
        _ => "Unreadable request body".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Credentials {
        username: String,
        password: String,
    }

    fn post(body: &'static str, content_type: Option<&str>) -> Request {
        let mut builder = Request::builder().method("POST").uri("/auth/login");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = post(
            r#"{"username":"alice","password":"Passw0rd!"}"#,
            Some("application/json"),
        );

        let Json(credentials) = Json::<Credentials>::from_request(request, &()).await.unwrap();
        assert_eq!(credentials.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let request = post(r#"{"username":"alice"}"#, Some("application/json"));

        let rejection = Json::<Credentials>::from_request(request, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(rejection.message.starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_wrong_type_does_not_echo_value() {
        let request = post(
            r#"{"username":"alice","password":12345678}"#,
            Some("application/json"),
        );

        let rejection = Json::<Credentials>::from_request(request, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(rejection.message.starts_with("Invalid JSON data"));
        assert!(!rejection.message.contains("12345678"));
    }

    #[tokio::test]
    async fn test_syntax_error_does_not_echo_body() {
        let request = post(r#"{"password":"Passw0rd!""#, Some("application/json"));

        let rejection = Json::<Credentials>::from_request(request, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert!(!rejection.message.contains("Passw0rd!"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let request = post(r#"{"username":"alice","password":"x"}"#, None);

        let rejection = Json::<Credentials>::from_request(request, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_rejection_into_response() {
        let rejection = JsonRejection {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Invalid JSON data".to_string(),
        };

        assert_eq!(
            rejection.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}

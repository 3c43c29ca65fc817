//! JSON body extractor whose rejections use the API error format

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiError, ApiErrorType};

const PARSE_ERROR_CODE: &str = "json_parse_error";
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// `axum::Json` with rejections turned into [`ApiError`]. A body that parses
/// but does not fit the submission names the offending field in `param`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(ApiError::from)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let error = match &rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(&text);
                let error = ApiError::new(
                    status,
                    ApiErrorType::InvalidRequestError,
                    format!("Invalid travel plan: {}", detail),
                );
                match rejected_field(detail) {
                    Some(field) => error.with_param(field),
                    None => error,
                }
            }
            JsonRejection::JsonSyntaxError(err) => ApiError::new(
                status,
                ApiErrorType::InvalidRequestError,
                format!("Invalid JSON syntax: {}", err.body_text()),
            ),
            JsonRejection::MissingJsonContentType(_) => ApiError::new(
                status,
                ApiErrorType::InvalidRequestError,
                "Missing Content-Type header. Expected 'application/json'.",
            ),
            other => ApiError::new(status, ApiErrorType::InvalidRequestError, other.body_text()),
        };

        error.with_code(PARSE_ERROR_CODE)
    }
}

/// Field named by a deserialization error: either a missing field or the
/// path prefix of a value that failed to parse
fn rejected_field(detail: &str) -> Option<&str> {
    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest.split('`').next();
    }

    detail
        .split_once(": ")
        .map(|(path, _)| path)
        .filter(|path| !path.is_empty() && !path.contains(' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::types::TravelPlanSubmission;

    async fn echo_destination(Json(body): Json<TravelPlanSubmission>) -> Json<String> {
        Json(body.destination)
    }

    async fn post_body(content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let app = Router::new().route("/", post(echo_destination));
        let mut request = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        let response = app
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_rejected_field() {
        assert_eq!(
            rejected_field("missing field `budget` at line 1 column 70"),
            Some("budget")
        );
        assert_eq!(
            rejected_field("startDate: input contains invalid characters at line 1 column 40"),
            Some("startDate")
        );
        assert_eq!(rejected_field("invalid type: integer `1`, expected a string"), None);
    }

    #[tokio::test]
    async fn test_valid_submission_is_extracted() {
        let body = r#"{"destination":"Oslo, Norway","startDate":"2025-07-01",
            "endDate":"2025-07-04","budget":1500}"#;

        let (status, json) = post_body(Some("application/json"), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, "Oslo, Norway");
    }

    #[tokio::test]
    async fn test_missing_budget_names_the_field() {
        let body = r#"{"destination":"Oslo, Norway","startDate":"2025-07-01",
            "endDate":"2025-07-04"}"#;

        let (status, json) = post_body(Some("application/json"), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["param"], "budget");
        assert_eq!(json["error"]["code"], "json_parse_error");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid travel plan: missing field `budget`"));
    }

    #[tokio::test]
    async fn test_bad_date_names_the_field() {
        let body = r#"{"destination":"Oslo, Norway","startDate":"July 1st",
            "endDate":"2025-07-04","budget":1500}"#;

        let (status, json) = post_body(Some("application/json"), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["param"], "startDate");
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let (status, json) = post_body(Some("application/json"), r#"{"destination":"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "json_parse_error");
        assert!(json["error"].get("param").is_none());
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let (status, json) = post_body(None, "{}").await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("application/json"));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Successful gallery response: the body fields plus `"error": "okay"`
#[derive(Debug)]
pub struct Okay<T: Serialize> {
    pub body: T,
}

impl<T: Serialize> Okay<T> {
    pub fn new(body: T) -> Self {
        Self { body }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    error: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

impl<T: Serialize> IntoResponse for Okay<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            error: "okay",
            body: &self.body,
        };

        match serde_json::to_value(&envelope) {
            Ok(value) => (StatusCode::OK, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "error",
                        "message": "Failed to serialize response data"
                    })),
                )
                    .into_response()
            }
        }
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<Okay<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Serialize)]
    struct Body {
        url: String,
    }

    #[test]
    fn envelope_flattens_body_next_to_error() {
        let envelope = Envelope {
            error: "okay",
            body: &Body {
                url: "/project/1/".to_string(),
            },
        };
        let value: Value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"error": "okay", "url": "/project/1/"}));
    }

    #[test]
    fn okay_always_answers_200() {
        let response = Okay::new(Body {
            url: "/project/1/".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

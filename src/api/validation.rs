use actix_web::{error::InternalError, web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    /// Error with a single `fields.message` entry
    pub fn message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message }),
        }
    }
}

fn bad_request(error_response: ErrorResponse) -> actix_web::Error {
    InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| {
            let mut fields = serde_json::Map::new();

            match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    for (field, errors) in validation_errors.field_errors() {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
                            })
                            .collect();
                        fields.insert(
                            field.to_string(),
                            serde_json::json!({"errors": messages})
                        );
                    }

                    bad_request(ErrorResponse {
                        error: "Validation failed".to_string(),
                        fields: serde_json::Value::Object(fields),
                    })
                }
                actix_web_validator::Error::Deserialize(de_err) => {
                    let err_string = de_err.to_string();

                    let message = if err_string.contains("EOF while parsing") {
                        "Request body is empty. Expected JSON payload"
                    } else if err_string.contains("unknown variant") {
                        "Invalid enum value. Check allowed values for this field"
                    } else if err_string.contains("missing field") {
                        "Please provide all values"
                    } else {
                        "Invalid JSON format"
                    };

                    bad_request(ErrorResponse::message("Request validation failed", message))
                }
                _ => bad_request(ErrorResponse::message("Validation failed", "Validation error")),
            }
        })
}

/// Query-string extraction failures become a 400 with the standard body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        bad_request(ErrorResponse::message(
            "Request validation failed",
            &format!("Invalid query string: {}", err),
        ))
    })
}

/// An `{id}` that is not a valid id cannot name anything the caller owns,
/// so it is reported the same way as a missing row
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, req| {
        let segment = req.match_info().get("id").unwrap_or_default().to_string();
        InternalError::from_response(
            "",
            HttpResponse::NotFound().json(ErrorResponse::message(
                "Not found",
                &format!("No item found with id {}", segment),
            )),
        )
        .into()
    })
}

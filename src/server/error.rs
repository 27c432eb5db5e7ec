use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request field is missing
    #[error("Missing {0}")]
    ClientInput(&'static str),

    /// The operation needs a session that went through the public token exchange
    #[error("Access token is missing")]
    SessionState,

    /// Plaid or something else on our side failed
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::ClientInput(_) | ApiError::SessionState => Status::BadRequest,
            ApiError::Upstream(_) => Status::InternalServerError,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let message = match &self {
            ApiError::Upstream(err) => {
                log::error!("{} {} failed: {err:#}", request.method(), request.uri());
                "An error occurred while talking to Plaid".to_string()
            }
            _ => {
                log::warn!("{} {} rejected: {self}", request.method(), request.uri());
                self.to_string()
            }
        };
        (self.status(), Json(ErrorBody { error: message })).respond_to(request)
    }
}

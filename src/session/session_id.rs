use std::convert::Infallible;

use rocket::http::{Cookie, SameSite};
use rocket::request::{FromRequest, Outcome, Request};

pub const SESSION_COOKIE: &str = "sid";

const SESSION_ID_BYTES: usize = 16;

/// Opaque identifier of a browser session, carried in the [`SESSION_COOKIE`] cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new_random() -> Self {
        let bytes: [u8; SESSION_ID_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    /// Returns None if `value` can't have been created by [`SessionId::new_random`]
    pub fn parse(value: &str) -> Option<Self> {
        let decoded = hex::decode(value).ok()?;
        if decoded.len() != SESSION_ID_BYTES {
            return None;
        }
        Some(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Every request gets a session. If the browser didn't send a valid session cookie, a new
/// session id is created and set as a cookie on the response.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionId {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let jar = request.cookies();
        if let Some(id) = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| SessionId::parse(cookie.value()))
        {
            return Outcome::Success(id);
        }

        let id = SessionId::new_random();
        log::debug!("Starting new session");
        jar.add(
            Cookie::build((SESSION_COOKIE, id.as_str().to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        );
        Outcome::Success(id)
    }
}

use rocket::data::{self, Data, FromData};
use rocket::form::{Form, FromForm};
use rocket::outcome::Outcome;
use rocket::serde::json::Json;
use rocket::Request;
use serde::Deserialize;

/// Request body that is parsed as an url-encoded form if the request says so, and as JSON otherwise.
pub struct Body<T>(pub T);

impl<T> Body<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[rocket::async_trait]
impl<'r, T> FromData<'r> for Body<T>
where
    T: Deserialize<'r> + FromForm<'r> + Send + 'r,
{
    type Error = ();

    async fn from_data(request: &'r Request<'_>, data: Data<'r>) -> data::Outcome<'r, Self> {
        let is_form = request
            .content_type()
            .is_some_and(|content_type| content_type.is_form());
        if is_form {
            match Form::<T>::from_data(request, data).await {
                Outcome::Success(form) => Outcome::Success(Body(form.into_inner())),
                Outcome::Error((status, _)) => Outcome::Error((status, ())),
                Outcome::Forward(forward) => Outcome::Forward(forward),
            }
        } else {
            match Json::<T>::from_data(request, data).await {
                Outcome::Success(json) => Outcome::Success(Body(json.into_inner())),
                Outcome::Error((status, _)) => Outcome::Error((status, ())),
                Outcome::Forward(forward) => Outcome::Forward(forward),
            }
        }
    }
}

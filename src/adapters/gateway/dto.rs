//! Wire types for the FlickPick REST API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Movie;
use crate::domain::foundation::MovieId;
use crate::domain::user::{FavoriteSet, Profile};
use crate::ports::{Credentials, Registration};

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            name: credentials.name.as_str(),
            password: credentials.password(),
        }
    }
}

/// Response of `POST /login`.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponseBody {
    pub token: String,
    pub user: Profile,
}

/// Body of `POST /users`.
#[derive(Debug, Serialize)]
pub(super) struct RegisterRequest<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl<'a> From<&'a Registration> for RegisterRequest<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            name: registration.name.as_str(),
            password: registration.password(),
            email: &registration.email,
            birthday: registration.birthday.map(format_date),
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Lookups by name may answer with a single record or with every match.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// First match wins; `None` for an empty list.
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.into_iter().next(),
        }
    }
}

/// Response of `GET /users/{name}/movies`: bare ids or full movie records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum FavoritesBody {
    Ids(Vec<MovieId>),
    Movies(Vec<Movie>),
}

impl FavoritesBody {
    pub fn into_set(self) -> FavoriteSet {
        match self {
            FavoritesBody::Ids(ids) => ids.into_iter().collect(),
            FavoritesBody::Movies(movies) => movies.into_iter().map(|m| m.id).collect(),
        }
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Handles `{"message": ...}`, `{"error": ...}`, express-validator's
/// `{"errors": [{"msg": ...}]}` and plain text.
pub(super) fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|m| m.as_str()) {
                return text.to_string();
            }
        }
        if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Genre;
    use crate::domain::foundation::UserName;

    #[test]
    fn login_request_uses_api_field_names() {
        let credentials = Credentials::new(UserName::new("ana").unwrap(), "pw");
        let body = serde_json::to_value(LoginRequest::from(&credentials)).unwrap();
        assert_eq!(body, serde_json::json!({ "Name": "ana", "Password": "pw" }));
    }

    #[test]
    fn register_request_formats_birthday() {
        let registration = Registration::new(UserName::new("ana").unwrap(), "pw", "a@b.c")
            .with_birthday(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
        let body = serde_json::to_value(RegisterRequest::from(&registration)).unwrap();
        assert_eq!(body["Birthday"], "1990-04-12");
        assert_eq!(body["Email"], "a@b.c");
    }

    #[test]
    fn one_or_many_takes_first_match() {
        let many: OneOrMany<Genre> =
            serde_json::from_str(r#"[{"Name":"Drama"},{"Name":"Drama"}]"#).unwrap();
        assert_eq!(many.into_first().map(|g| g.name), Some("Drama".to_string()));

        let one: OneOrMany<Genre> = serde_json::from_str(r#"{"Name":"Horror"}"#).unwrap();
        assert_eq!(one.into_first().map(|g| g.name), Some("Horror".to_string()));

        let none: OneOrMany<Genre> = serde_json::from_str("[]").unwrap();
        assert!(none.into_first().is_none());
    }

    #[test]
    fn favorites_body_accepts_ids_or_movies() {
        let expected: FavoriteSet = [MovieId::new("m1").unwrap(), MovieId::new("m2").unwrap()]
            .into_iter()
            .collect();

        let ids: FavoritesBody = serde_json::from_str(r#"["m1","m2"]"#).unwrap();
        assert_eq!(ids.into_set(), expected);

        let movies: FavoritesBody = serde_json::from_str(
            r#"[
                {"_id":"m1","Title":"Cléo","Director":{"Name":"Agnès Varda"},"Genre":{"Name":"Drama"}},
                {"_id":"m2","Title":"Vagabond","Director":{"Name":"Agnès Varda"},"Genre":{"Name":"Drama"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(movies.into_set(), expected);
    }

    #[test]
    fn error_message_reads_common_shapes() {
        assert_eq!(error_message(r#"{"message":"Incorrect password"}"#), "Incorrect password");
        assert_eq!(
            error_message(r#"{"errors":[{"msg":"Email is invalid"},{"msg":"Name too short"}]}"#),
            "Email is invalid; Name too short"
        );
        assert_eq!(error_message("  ana already exists \n"), "ana already exists");
    }
}

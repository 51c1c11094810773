//! Profile aggregate and the profile-edit patch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MovieId, UserName};

use super::FavoriteSet;

/// The logged-in user's profile, as stored under the `user` key.
///
/// Favorites are only changed through [`Profile::replace_favorites`], which
/// the session store calls on behalf of the favorites synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(rename = "Name")]
    name: UserName,

    /// Echoed back by the server (hashed); never shown.
    #[serde(rename = "Password", default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,

    #[serde(rename = "Email", default)]
    email: String,

    #[serde(
        rename = "Birthday",
        default,
        with = "birthday_format",
        skip_serializing_if = "Option::is_none"
    )]
    birthday: Option<NaiveDate>,

    #[serde(rename = "FavoriteMovies", default)]
    favorite_movie_ids: FavoriteSet,
}

impl Profile {
    /// Creates a profile with no favorites.
    pub fn new(name: UserName, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name,
            password: None,
            email: email.into(),
            birthday: None,
            favorite_movie_ids: FavoriteSet::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_favorites(mut self, favorites: FavoriteSet) -> Self {
        self.favorite_movie_ids = favorites;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn favorite_movie_ids(&self) -> &FavoriteSet {
        &self.favorite_movie_ids
    }

    /// The single decision point for favorite status.
    pub fn is_favorite(&self, movie_id: &MovieId) -> bool {
        self.favorite_movie_ids.contains(movie_id)
    }

    /// Merges the non-favorite fields of `patch` into this profile.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(password) = &patch.password {
            self.password = Some(password.clone());
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(birthday) = patch.birthday {
            self.birthday = Some(birthday);
        }
    }

    /// Swaps the whole favorites set in one step.
    pub(crate) fn replace_favorites(&mut self, favorites: FavoriteSet) {
        self.favorite_movie_ids = favorites;
    }
}

/// Partial update of the non-favorite profile fields.
///
/// Serialized as the body of `PUT /users/{name}`; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,

    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(
        rename = "Birthday",
        with = "birthday_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: UserName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }

    /// Builds a patch carrying every non-favorite field of `profile`.
    ///
    /// Used to merge a server-returned profile without touching favorites.
    /// An empty email means the response left it out and is not copied.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            password: profile.password.clone(),
            email: (!profile.email.is_empty()).then(|| profile.email.clone()),
            birthday: profile.birthday,
        }
    }
}

/// Birthday dates are sent as `YYYY-MM-DD`; the server may answer with a full
/// RFC 3339 timestamp, which is truncated to its date.
mod birthday_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
        }
    }

    fn parse(value: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(value, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.date_naive())
            .map_err(|_| format!("unrecognized birthday '{}'", value))
    }
}

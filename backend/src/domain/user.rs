//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    EmptyUsername,
    EmptyEmail,
    InvalidEmail,
}

impl UserValidationError {
    /// Constraint code reported alongside the message.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::EmptyUsername | Self::EmptyEmail => "NotBlank",
            Self::InvalidEmail => "Email",
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyUsername => "username",
            Self::EmptyEmail | Self::InvalidEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::EmptyUsername | Self::EmptyEmail => write!(f, "can't be empty"),
            Self::InvalidEmail => write!(f, "should be an email"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque user identifier.
///
/// Identifiers minted by this service are UUID v4 strings, but any non-blank
/// string read back from storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public handle of a user; unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact address of a user; unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email.validate_email() {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Partial profile change applied by [`User::update`].
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<Email>,
    pub username: Option<Username>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Registered account.
///
/// ## Invariants
/// - `id` never changes after registration.
/// - `username` and `email` are non-blank; their uniqueness is enforced by
///   the repository and the user service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    bio: String,
    image: String,
}

impl User {
    /// Build a user with empty profile fields.
    pub fn new(id: UserId, username: Username, email: Email) -> Self {
        Self {
            id,
            username,
            email,
            bio: String::new(),
            image: String::new(),
        }
    }

    /// Mint a user with a fresh random id.
    pub fn register(username: Username, email: Email) -> Self {
        Self::new(UserId::random(), username, email)
    }

    /// Validate raw strings and build a user.
    ///
    /// # Examples
    /// ```
    /// use conduit_backend::domain::User;
    ///
    /// let user = User::try_from_strings("u-1", "jake", "jake@example.com")
    ///     .expect("valid user");
    /// assert_eq!(user.username().as_ref(), "jake");
    /// assert!(user.bio().is_empty());
    /// ```
    pub fn try_from_strings(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Username::new(username)?,
            Email::new(email)?,
        ))
    }

    /// Replace the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Replace the avatar image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Apply a partial update in place.
    pub fn update(&mut self, changes: UserChanges) {
        let UserChanges {
            email,
            username,
            bio,
            image,
        } = changes;
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(username) = username {
            self.username = username;
        }
        if let Some(bio) = bio {
            self.bio = bio;
        }
        if let Some(image) = image {
            self.image = image;
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn bio(&self) -> &str {
        self.bio.as_str()
    }

    pub fn image(&self) -> &str {
        self.image.as_str()
    }
}

#[cfg(test)]
mod tests;

use thiserror::Error;

/// Input rejected before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Course name is required")]
    EmptyName,

    #[error("Course link is required")]
    EmptyUrl,

    #[error("Link is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("'{0}' is a section header, pick a category below it")]
    PlaceholderCategory(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Enter a valid e-mail address")]
    InvalidEmail,

    #[error("Password must have at least {0} characters")]
    PasswordTooShort(usize),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database connection error: {0}")]
    Connection(#[from] tokio_rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Course store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Course {0} not found")]
    NotFound(i64),

    #[error("Sign in to manage your courses")]
    NotSignedIn,

    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

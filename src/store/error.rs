use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for the user and chat-history store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown email or wrong password; the two are deliberately not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated (e.g. email already registered)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database unreachable or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL errors
    #[error("Database error: {0}")]
    Database(String),

    /// Connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// Operation exceeded its deadline
    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    /// Password hashing failures
    #[error("Password hashing error: {0}")]
    Hashing(String),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            if db_error.code() == &tokio_postgres::error::SqlState::UNIQUE_VIOLATION {
                return StoreError::Conflict(db_error.message().to_string());
            }
            return StoreError::Database(format!("{}: {}", db_error.code().code(), db_error.message()));
        }

        StoreError::Database(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Validation(format!("JSON error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(err: bcrypt::BcryptError) -> Self {
        StoreError::Hashing(err.to_string())
    }
}

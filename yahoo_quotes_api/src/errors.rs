//! Error types for the quotes client.

/// Errors that can occur when calling the quotes or profile endpoints.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (bad URL, network error, timeout, unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

/// Errors returned by every client method.
///
/// The sentinel variants (`EmptyResult`, `PageNotFound`, `UserNotFound`)
/// describe well-formed responses that carried no usable data; they are
/// distinct from transport, status, and decode failures so callers can
/// match on them directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request construction or network failure, including timeouts.
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. The raw body is kept
    /// verbatim; no decoding is attempted.
    #[error("status: '{status}' body: '{body}'")]
    HttpStatus { status: u16, body: String },

    /// Malformed or unexpected JSON in a 2xx response.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed response with zero usable items.
    #[error("empty response result")]
    EmptyResult,

    /// The batch query succeeded but the requested title was missing or
    /// never returned.
    #[error("page not found")]
    PageNotFound,

    /// The batch query succeeded but the requested user id was flagged
    /// missing or never returned.
    #[error("user not found")]
    UserNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

//! Axum extractors for request bodies and query strings.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::{get, post}};
//! use intake::{Bind, Form, Query};
//!
//! #[derive(Debug, Bind, serde::Deserialize)]
//! struct Search {
//!     #[bind(query = "q,required")]
//!     q: String,
//!     #[bind(query = "page")]
//!     page: u64,
//! }
//!
//! #[derive(Debug, Bind, serde::Deserialize)]
//! struct Login {
//!     #[bind(form = "username,required")]
//!     username: String,
//!     remember: bool,
//! }
//!
//! async fn search(Query(search): Query<Search>) -> String {
//!     format!("searching for '{}' on page {}", search.q, search.page)
//! }
//!
//! async fn login(Form(login): Form<Login>) -> String {
//!     format!("hello {}", login.username)
//! }
//!
//! let app = Router::new()
//!     .route("/search", get(search))
//!     .route("/login", post(login));
//! ```
//!
//! # Configuration
//!
//! Both extractors decode with the [`DecodeConfig`] found in the request
//! extensions, or the default one when there is none. Install a config for
//! a whole router with `axum::Extension`:
//!
//! ```ignore
//! let config = intake::DecodeConfig::default()
//!     .with_time_zone_name("Europe/Paris")?;
//! let app = app.layer(axum::Extension(config));
//! ```

use core::fmt;

use axum_core::{
    extract::{FromRequest, FromRequestParts, Request},
    response::{IntoResponse, Response},
};
use http::{Extensions, StatusCode, header, request::Parts};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::{Body, DecodeConfig, DecodeError, Decoder, ErrorKind, Format, Introspect};

/// Extracts a `T` from a JSON, XML or URL-encoded request body.
///
/// The format follows the request's `Content-Type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Form<T>(pub T);

/// Extracts a `T` from the query string, reading keys from the `query` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

/// Why a [`Form`] could not be extracted.
#[derive(Debug)]
pub struct FormRejection {
    kind: FormRejectionKind,
}

#[derive(Debug)]
enum FormRejectionKind {
    /// Failed to buffer the request body.
    Body(axum_core::Error),
    /// Multipart bodies need field extraction this crate does not do.
    Multipart,
    /// The decoder refused the body.
    Decode(DecodeError),
}

impl FormRejection {
    /// The status code this rejection responds with.
    pub fn status(&self) -> StatusCode {
        match &self.kind {
            FormRejectionKind::Body(_) => StatusCode::BAD_REQUEST,
            FormRejectionKind::Multipart => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FormRejectionKind::Decode(err) => match err.kind() {
                ErrorKind::InvalidContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorKind::RequiredFieldMissing | ErrorKind::ParseFailure => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ErrorKind::InvalidTargetShape | ErrorKind::UnsupportedFieldType => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// The decode error behind this rejection, if any.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match &self.kind {
            FormRejectionKind::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for FormRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FormRejectionKind::Body(err) => write!(f, "Failed to read request body: {err}"),
            FormRejectionKind::Multipart => {
                write!(f, "Multipart bodies are not supported by this extractor")
            }
            FormRejectionKind::Decode(err) => write!(f, "Failed to decode request body: {err}"),
        }
    }
}

impl std::error::Error for FormRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FormRejectionKind::Body(err) => Some(err),
            FormRejectionKind::Multipart => None,
            FormRejectionKind::Decode(err) => Some(err),
        }
    }
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        let body = self.to_string();
        let status = self.status();
        (status, body).into_response()
    }
}

impl From<axum_core::Error> for FormRejection {
    fn from(err: axum_core::Error) -> Self {
        FormRejection {
            kind: FormRejectionKind::Body(err),
        }
    }
}

impl From<DecodeError> for FormRejection {
    fn from(err: DecodeError) -> Self {
        FormRejection {
            kind: FormRejectionKind::Decode(err),
        }
    }
}

/// Why a [`Query`] could not be extracted.
#[derive(Debug)]
pub struct QueryRejection {
    error: DecodeError,
}

impl QueryRejection {
    /// The status code this rejection responds with.
    pub fn status(&self) -> StatusCode {
        match self.error.kind() {
            ErrorKind::InvalidTargetShape | ErrorKind::UnsupportedFieldType => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// The decode error behind this rejection.
    pub fn decode_error(&self) -> &DecodeError {
        &self.error
    }
}

impl fmt::Display for QueryRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode query parameters: {}", self.error)
    }
}

impl std::error::Error for QueryRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl IntoResponse for QueryRejection {
    fn into_response(self) -> Response {
        let body = self.to_string();
        let status = self.status();
        (status, body).into_response()
    }
}

impl From<DecodeError> for QueryRejection {
    fn from(error: DecodeError) -> Self {
        QueryRejection { error }
    }
}

/// The decoder configured through the request extensions, if any.
fn decoder_for(extensions: &Extensions) -> Decoder {
    let config = extensions.get::<DecodeConfig>().cloned().unwrap_or_default();
    crate::trace!(tag = %config.tag, "decoder configured for request");
    Decoder::new(config)
}

impl<T, S> FromRequest<S> for Form<T>
where
    T: Introspect + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        // A missing or non-ASCII header classifies as unsupported below.
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if Format::from_content_type(&content_type) == Some(Format::Multipart) {
            return Err(FormRejection {
                kind: FormRejectionKind::Multipart,
            });
        }

        let decoder = decoder_for(req.extensions());
        let bytes = req
            .into_body()
            .collect()
            .await
            .map_err(axum_core::Error::new)?
            .to_bytes();

        let mut value = T::zero();
        decoder.decode_body(&content_type, Body::Bytes(&bytes), &mut value)?;
        Ok(Form(value))
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: Introspect,
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let mut value = T::zero();
        decoder_for(&parts.extensions).decode_query_str(query, &mut value)?;
        Ok(Query(value))
    }
}

impl<T> core::ops::Deref for Form<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> core::ops::DerefMut for Form<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> core::ops::Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> core::ops::DerefMut for Query<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

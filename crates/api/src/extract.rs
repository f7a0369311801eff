//! Extractors whose rejections render as [`AppError`] JSON bodies.
//!
//! Axum's stock `Json` and `Path` reject malformed input with plain-text
//! 422/400 responses; these wrappers route the rejection through
//! [`AppError`] so every error a client sees has the same shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor. Malformed or mistyped bodies become a 400
/// `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor. Unparseable ids become a 400 `BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

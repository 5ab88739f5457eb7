//! HTTP transport.
//!
//! This module provides the HTTP client and wire types for the employee API.

mod client;
mod endpoints;

pub(crate) use client::{ApiClient, ApiResponse};
pub(crate) use endpoints::*;

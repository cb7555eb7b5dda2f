//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the request handlers: content types,
//! request-target decoding, dates and response builders.

pub mod date;
pub mod mime;
pub mod path;
pub mod response;

pub use response::{
    build_404_response, build_501_response, build_file_response, build_health_response,
    build_listing_response, build_redirect_response, stamp_response,
};

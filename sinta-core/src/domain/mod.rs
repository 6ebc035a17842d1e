//! Core domain types
//!
//! These types describe the single server-side scraping job as the backend
//! reports it. They are shared between the HTTP client (decoding) and the
//! monitor (interpreting).

pub mod category;
pub mod job;
pub mod output;

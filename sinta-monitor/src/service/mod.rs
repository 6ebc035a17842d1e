//! Service layer
//!
//! Services bind the poll scheduler to the lifecycle of a scraping job. They
//! depend on the client traits rather than the HTTP client so they can be
//! driven by scripted backends in tests.

mod controller;

pub use controller::JobController;

//! Sinta Core
//!
//! Core types shared by the SINTA scrape monitor crates.
//!
//! This crate contains:
//! - Domain types: the scraping job as reported by the backend (status, result, outcome)
//! - DTOs: request and response bodies of the scraper web API
//! - Lecturer list parsing

pub mod domain;
pub mod dto;
pub mod lecturer;

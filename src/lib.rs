//! posterfetch library root
//!
//! Exposes the layers so integration tests can drive the fetch loop with a
//! stub lookup service.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

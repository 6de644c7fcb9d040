//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Test identifier, project, and token resolution tests
//! - `catalog_source`: Catalog source selection tests
//! - `cli_loading`: Loading from command-line arguments

mod helpers;
mod precedence;

//! Facetprep - dataset preparation tools for FACET/COCO-style data
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod darken;
pub mod partition;

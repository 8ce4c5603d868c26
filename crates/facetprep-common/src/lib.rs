//! Facetprep-Common: shared error type and path utilities.
//!
//! - **Error Handling**: one error enum whose variants let callers tell an
//!   unreadable file apart from a corrupt image or a malformed annotation file
//! - **Path Utilities**: extension checks used when selecting source images
//!
//! # Examples
//!
//! ```
//! use facetprep_common::{Error, Result};
//! use facetprep_common::paths::is_source_image;
//! use std::path::Path;
//!
//! assert!(is_source_image(Path::new("frame_0001.JPG")));
//!
//! fn example() -> Result<()> {
//!     Err(Error::decode("frame_0001.jpg: invalid JPEG marker"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};

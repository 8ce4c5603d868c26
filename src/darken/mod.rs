//! Batch darkening of image directories for low-light robustness tests.
//!
//! Every sample of every source image is multiplied by a darkness factor and
//! written to `darkness_<factor>/` under the output base directory, one
//! directory per level.

mod batch;
mod level;
mod transform;

pub use batch::{
    collect_source_images, run_batch, select_levels, BatchSummary, DarkenJob, FileFailure,
    PlannedOutput,
};
pub use level::DarknessLevel;
pub use transform::{darken, darken_file, decode_image, save_image, scale_sample, EncodeOptions};

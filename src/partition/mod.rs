//! Gender-presentation partitioning of COCO/FACET annotation collections.
//!
//! An annotation collection is split into two derived collections, one per
//! [`GenderGroup`]. Membership is a non-exclusive filter on the annotation's
//! `gender_presentation_masc` / `gender_presentation_fem` scores, so the same
//! annotation (and image) may land in both outputs.

mod model;
mod split;

pub use model::{
    Annotation, AnnotationCollection, Attributes, Category, GroupCollection, ImageRecord, Info,
};
pub use split::{partition, write_partition, GenderGroup, GroupReport, Partition};

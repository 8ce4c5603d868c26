//! Serde model of the annotation documents read and written by the partitioner.
//!
//! Only the fields the partitioner inspects are typed. Everything else on an
//! image, annotation or attribute mapping is carried through untouched in a
//! flattened `extra` map.

use std::path::Path;

use facetprep_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Input annotation collection (`instances_*.json`).
///
/// Top-level keys other than `images`, `annotations` and `categories` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnnotationCollection {
    pub images: Vec<ImageRecord>,

    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub categories: Vec<Value>,
}

impl AnnotationCollection {
    /// Read and parse an annotation collection from disk.
    ///
    /// Fails with [`Error::Io`](facetprep_common::Error::Io) when the file cannot
    /// be read and [`Error::Json`](facetprep_common::Error::Json) when it is not a
    /// collection with `images` and `annotations` arrays.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// An entry of `images`. Only `id` is interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageRecord {
    pub id: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of `annotations`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Annotation {
    pub id: i64,

    pub image_id: i64,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-annotation attribute mapping.
///
/// Absent (or `null`) scores read as zero. Scores stay [`Number`]s so integer
/// and float values are written back exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_presentation_masc: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_presentation_fem: Option<Number>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    pub fn masc(&self) -> f64 {
        score(self.gender_presentation_masc.as_ref())
    }

    pub fn fem(&self) -> f64 {
        score(self.gender_presentation_fem.as_ref())
    }
}

fn score(value: Option<&Number>) -> f64 {
    value.and_then(Number::as_f64).unwrap_or(0.0)
}

/// Output collection for a single group.
///
/// Field order is the key order of the written JSON.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GroupCollection {
    pub info: Info,

    pub licenses: Vec<Value>,

    pub images: Vec<ImageRecord>,

    pub annotations: Vec<Annotation>,

    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Info {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub supercategory: String,
}

impl Category {
    /// The single synthetic category every output collection carries.
    pub fn person() -> Self {
        Self {
            id: 1,
            name: "person".to_string(),
            supercategory: "person".to_string(),
        }
    }
}

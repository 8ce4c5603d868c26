use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use facetprep_common::Result;
use tracing::{debug, warn};

use super::model::{Annotation, AnnotationCollection, Category, GroupCollection, Info};

/// Minimum score for an annotation to belong to a group.
const MEMBERSHIP_THRESHOLD: f64 = 1.0;

/// Output group of the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderGroup {
    Men,
    Women,
}

impl GenderGroup {
    /// Both groups, in output order.
    pub const ALL: [GenderGroup; 2] = [GenderGroup::Men, GenderGroup::Women];

    /// File name of the group's output collection.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Men => "gender_men.json",
            Self::Women => "gender_women.json",
        }
    }

    /// `info.description` of the group's output collection.
    pub fn description(self) -> &'static str {
        match self {
            Self::Men => "FACET Gender Group - Men",
            Self::Women => "FACET Gender Group - Women",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }

    /// Whether the annotation's score for this group reaches the threshold.
    pub fn contains(self, annotation: &Annotation) -> bool {
        let score = match self {
            Self::Men => annotation.attributes.masc(),
            Self::Women => annotation.attributes.fem(),
        };
        score >= MEMBERSHIP_THRESHOLD
    }
}

impl fmt::Display for GenderGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two derived collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub men: GroupCollection,
    pub women: GroupCollection,
}

impl Partition {
    pub fn group(&self, group: GenderGroup) -> &GroupCollection {
        match group {
            GenderGroup::Men => &self.men,
            GenderGroup::Women => &self.women,
        }
    }
}

/// Split a collection into the men and women groups.
///
/// Groups are not exclusive: an annotation scoring at least 1 on both
/// attributes is included in both, along with its image. Input order of
/// images and annotations is preserved.
pub fn partition(collection: &AnnotationCollection) -> Partition {
    Partition {
        men: build_group(collection, GenderGroup::Men),
        women: build_group(collection, GenderGroup::Women),
    }
}

fn build_group(collection: &AnnotationCollection, group: GenderGroup) -> GroupCollection {
    let mut annotations = Vec::new();
    let mut image_ids = HashSet::new();

    for annotation in &collection.annotations {
        if group.contains(annotation) {
            image_ids.insert(annotation.image_id);
            annotations.push(annotation.clone());
        }
    }

    let images: Vec<_> = collection
        .images
        .iter()
        .filter(|image| image_ids.contains(&image.id))
        .cloned()
        .collect();

    let present: HashSet<i64> = images.iter().map(|image| image.id).collect();
    let dangling = image_ids.difference(&present).count();
    if dangling > 0 {
        warn!(
            "{} group references {} image id(s) missing from the images list",
            group, dangling
        );
    }

    debug!(
        "{} group: {} images, {} annotations",
        group,
        images.len(),
        annotations.len()
    );

    GroupCollection {
        info: Info {
            description: group.description().to_string(),
        },
        licenses: Vec::new(),
        images,
        annotations,
        categories: vec![Category::person()],
    }
}

/// Summary of one written group file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub group: GenderGroup,
    pub path: PathBuf,
    pub images: usize,
    pub annotations: usize,
}

impl fmt::Display for GroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Group → {} (images={}, anns={})",
            self.group,
            self.path.display(),
            self.images,
            self.annotations
        )
    }
}

/// Write both groups into `output_dir`, creating it if needed.
///
/// Returns one report per group in [`GenderGroup::ALL`] order.
pub fn write_partition(
    partition: &Partition,
    output_dir: &Path,
    pretty: bool,
) -> Result<Vec<GroupReport>> {
    std::fs::create_dir_all(output_dir)?;

    let mut reports = Vec::with_capacity(GenderGroup::ALL.len());
    for group in GenderGroup::ALL {
        let collection = partition.group(group);
        let path = output_dir.join(group.file_name());
        write_collection(collection, &path, pretty)?;

        reports.push(GroupReport {
            group,
            path,
            images: collection.images.len(),
            annotations: collection.annotations.len(),
        });
    }

    Ok(reports)
}

fn write_collection(collection: &GroupCollection, path: &Path, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, collection)?;
    } else {
        serde_json::to_writer(&mut writer, collection)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> AnnotationCollection {
        serde_json::from_value(json!({
            "images": [
                { "id": 1, "file_name": "a.jpg" },
                { "id": 2, "file_name": "b.jpg" },
                { "id": 3, "file_name": "c.jpg" },
                { "id": 4, "file_name": "d.jpg" }
            ],
            "annotations": [
                { "id": 10, "image_id": 1, "attributes": { "gender_presentation_masc": 1 } },
                { "id": 11, "image_id": 2, "attributes": { "gender_presentation_fem": 1 } },
                { "id": 12, "image_id": 3, "attributes": {
                    "gender_presentation_masc": 1, "gender_presentation_fem": 1 } },
                { "id": 13, "image_id": 4, "attributes": {} },
                { "id": 14, "image_id": 1, "attributes": { "gender_presentation_masc": 0 } },
                { "id": 15, "image_id": 1, "attributes": { "gender_presentation_masc": 2 } }
            ],
            "categories": [{ "id": 1, "name": "person" }, { "id": 2, "name": "dog" }]
        }))
        .unwrap()
    }

    fn ids(collection: &GroupCollection) -> (Vec<i64>, Vec<i64>) {
        (
            collection.images.iter().map(|i| i.id).collect(),
            collection.annotations.iter().map(|a| a.id).collect(),
        )
    }

    #[test]
    fn test_membership() {
        let result = partition(&collection());
        assert_eq!(ids(&result.men), (vec![1, 3], vec![10, 12, 15]));
        assert_eq!(ids(&result.women), (vec![2, 3], vec![11, 12]));
    }

    #[test]
    fn test_groups_overlap() {
        let result = partition(&collection());
        let in_men = result.men.annotations.iter().any(|a| a.id == 12);
        let in_women = result.women.annotations.iter().any(|a| a.id == 12);
        assert!(in_men && in_women);
    }

    #[test]
    fn test_images_match_referenced_ids() {
        let result = partition(&collection());
        for group in GenderGroup::ALL {
            let output = result.group(group);
            let referenced: HashSet<i64> = output.annotations.iter().map(|a| a.image_id).collect();
            let present: HashSet<i64> = output.images.iter().map(|i| i.id).collect();
            assert_eq!(referenced, present, "{group}");
        }
    }

    #[test]
    fn test_fractional_scores_below_threshold() {
        let input: AnnotationCollection = serde_json::from_value(json!({
            "images": [{ "id": 1 }],
            "annotations": [
                { "id": 1, "image_id": 1, "attributes": {
                    "gender_presentation_masc": 0.99, "gender_presentation_fem": 1.0 } }
            ]
        }))
        .unwrap();
        let result = partition(&input);
        assert!(result.men.annotations.is_empty());
        assert!(result.men.images.is_empty());
        assert_eq!(result.women.annotations.len(), 1);
    }

    #[test]
    fn test_synthetic_metadata() {
        let result = partition(&collection());
        assert_eq!(result.men.info.description, "FACET Gender Group - Men");
        assert_eq!(result.women.info.description, "FACET Gender Group - Women");
        for group in GenderGroup::ALL {
            let output = result.group(group);
            assert_eq!(output.categories, vec![Category::person()]);
            assert!(output.licenses.is_empty());
        }
    }

    #[test]
    fn test_empty_collection() {
        let result = partition(&AnnotationCollection::default());
        assert!(result.men.images.is_empty());
        assert!(result.women.annotations.is_empty());
    }

    #[test]
    fn test_dangling_image_reference_keeps_annotation() {
        let input: AnnotationCollection = serde_json::from_value(json!({
            "images": [],
            "annotations": [
                { "id": 1, "image_id": 99, "attributes": { "gender_presentation_fem": 1 } }
            ]
        }))
        .unwrap();
        let result = partition(&input);
        assert_eq!(result.women.annotations.len(), 1);
        assert!(result.women.images.is_empty());
    }

    #[test]
    fn test_group_names() {
        assert_eq!(GenderGroup::Men.file_name(), "gender_men.json");
        assert_eq!(GenderGroup::Women.file_name(), "gender_women.json");
        assert_eq!(GenderGroup::Women.to_string(), "Women");
    }

    #[test]
    fn test_write_partition() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("annotations");
        let result = partition(&collection());

        let reports = write_partition(&result, &out, false).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].group, GenderGroup::Men);
        assert_eq!(reports[0].path, out.join("gender_men.json"));
        assert_eq!((reports[0].images, reports[0].annotations), (2, 3));
        assert_eq!((reports[1].images, reports[1].annotations), (2, 2));

        let written: GroupCollection =
            serde_json::from_slice(&std::fs::read(out.join("gender_women.json")).unwrap())
                .unwrap();
        assert_eq!(written, result.women);
    }

    #[test]
    fn test_written_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let result = partition(&collection());
        write_partition(&result, dir.path(), false).unwrap();

        let text = std::fs::read_to_string(dir.path().join("gender_men.json")).unwrap();
        let keys = ["info", "licenses", "images", "annotations", "categories"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| text.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_report_display() {
        let report = GroupReport {
            group: GenderGroup::Men,
            path: PathBuf::from("/out/gender_men.json"),
            images: 3,
            annotations: 5,
        };
        assert_eq!(
            report.to_string(),
            "Men Group → /out/gender_men.json (images=3, anns=5)"
        );
    }

    #[test]
    fn test_non_ascii_written_unescaped() {
        let input: AnnotationCollection = serde_json::from_value(json!({
            "images": [{ "id": 1, "file_name": "사진.jpg" }],
            "annotations": [
                { "id": 1, "image_id": 1, "attributes": { "gender_presentation_masc": 1 } }
            ]
        }))
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        write_partition(&partition(&input), dir.path(), true).unwrap();
        let text = std::fs::read_to_string(dir.path().join("gender_men.json")).unwrap();
        assert!(text.contains("사진.jpg"));
    }
}

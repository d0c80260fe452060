use crate::error::{CorpusError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names accepted as the document identifier, in lookup order.
const ID_FIELDS: [&str; 2] = ["pmc_id", "id"];
const TITLE_FIELD: &str = "title";
const TAGS_FIELD: &str = "tags";

/// Label used for leaves whose document has neither a title nor an identifier.
pub const UNTITLED_LABEL: &str = "Untitled";

/// A tagged document as loaded from the data source.
///
/// Tags are trimmed, non-empty and distinct (exact string comparison), kept in
/// first-seen order. Every other field of the raw record is carried in
/// `details` and never inspected by the navigation logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: String,
    title: String,
    tags: Vec<String>,
    #[serde(flatten)]
    details: Map<String, Value>,
}

impl Document {
    pub fn new<I, S>(id: impl Into<String>, title: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            tags: normalize_tags(tags),
            details: Map::new(),
        }
    }

    /// Attach an inert descriptive field (authors, journal, summary, link, ...).
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// Parse one raw record. `position` is only used for diagnostics.
    pub(crate) fn from_record(position: usize, record: &Value) -> Result<Self> {
        let Value::Object(fields) = record else {
            return Err(CorpusError::malformed(format!(
                "record {position} is {}, expected an object",
                value_kind(record)
            )));
        };

        let id = ID_FIELDS
            .iter()
            .find_map(|key| fields.get(*key).filter(|value| !value.is_null()));
        let id = match id {
            None => {
                log::debug!("Record {position} has no identifier");
                String::new()
            }
            Some(value) => match scalar_text(value) {
                Some(id) => id.trim().to_string(),
                None => {
                    log::warn!(
                        "Record {position} identifier is {}, treating as empty",
                        value_kind(value)
                    );
                    String::new()
                }
            },
        };

        let title = match fields.get(TITLE_FIELD) {
            None | Some(Value::Null) => String::new(),
            Some(value) => scalar_text(value).unwrap_or_else(|| {
                log::warn!(
                    "Record {position} ({id}) title is {}, treating as empty",
                    value_kind(value)
                );
                String::new()
            }),
        };

        let tags = match fields.get(TAGS_FIELD) {
            Some(Value::Array(items)) => {
                normalize_tags(items.iter().filter_map(Value::as_str))
            }
            None | Some(Value::Null) => {
                log::debug!("Record {position} ({id}) has no tags field");
                Vec::new()
            }
            Some(other) => {
                log::warn!(
                    "Record {position} ({id}) tags field is {}, treating as empty",
                    value_kind(other)
                );
                Vec::new()
            }
        };

        let details = fields
            .iter()
            .filter(|(key, _)| {
                let key = key.as_str();
                key != TITLE_FIELD && key != TAGS_FIELD && !ID_FIELDS.contains(&key)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            title,
            tags,
            details,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// Display label: title, then identifier, then [`UNTITLED_LABEL`].
    pub fn label(&self) -> &str {
        if !self.title.trim().is_empty() {
            &self.title
        } else if !self.id.is_empty() {
            &self.id
        } else {
            UNTITLED_LABEL
        }
    }

    /// Exact, case-sensitive membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when the document's tag set is a superset of `path`.
    pub fn has_all_tags<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.iter().all(|tag| self.has_tag(tag.as_ref()))
    }
}

fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Text of a string or number field; `None` for every other kind.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn record_tags_are_trimmed_and_deduplicated() {
        let record = json!({
            "pmc_id": "PMC1",
            "title": "Bone loss in microgravity",
            "tags": [" bone ", "bone", "", "   ", 7, "Bone", "spaceflight"],
        });

        let doc = Document::from_record(0, &record).expect("document");
        assert_eq!(doc.id(), "PMC1");
        assert_eq!(doc.tags(), ["bone", "Bone", "spaceflight"]);
    }

    #[test]
    fn missing_tags_field_is_tolerated() {
        let doc = Document::from_record(3, &json!({"pmc_id": "PMC3", "title": "x"}))
            .expect("document");
        assert!(doc.tags().is_empty());

        let doc = Document::from_record(4, &json!({"pmc_id": "PMC4", "tags": "oops"}))
            .expect("document");
        assert!(doc.tags().is_empty());
    }

    #[test]
    fn non_object_record_is_malformed() {
        let err = Document::from_record(2, &json!(["PMC1"])).unwrap_err();
        assert!(matches!(err, CorpusError::MalformedCorpus { .. }));
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn odd_identifier_and_title_types_are_tolerated() {
        let record = json!({"pmc_id": "D2", "title": 42, "tags": ["a"]});
        let doc = Document::from_record(1, &record).expect("document");
        assert_eq!(doc.title(), "42");
        assert_eq!(doc.tags(), ["a"]);

        let record = json!({"pmc_id": true, "title": ["t"], "tags": ["a"]});
        let doc = Document::from_record(2, &record).expect("document");
        assert_eq!(doc.id(), "");
        assert_eq!(doc.title(), "");
        assert_eq!(doc.label(), UNTITLED_LABEL);

        let doc = Document::from_record(3, &json!({"pmc_id": {"v": 1}, "tags": ["a"]}))
            .expect("document");
        assert_eq!(doc.id(), "");
    }

    #[test]
    fn null_primary_identifier_falls_back_to_id() {
        let record = json!({"pmc_id": null, "id": "D9", "title": "t", "tags": ["a"]});
        let doc = Document::from_record(0, &record).expect("document");
        assert_eq!(doc.id(), "D9");
        assert!(doc.detail("pmc_id").is_none());
    }

    #[test]
    fn descriptive_fields_are_kept_as_payload() {
        let record = json!({
            "id": "D9",
            "title": "Plants",
            "tags": ["botany"],
            "journal": "Nature",
            "authors": ["A", "B"],
        });

        let doc = Document::from_record(0, &record).expect("document");
        assert_eq!(doc.id(), "D9");
        assert_eq!(doc.detail("journal"), Some(&json!("Nature")));
        assert_eq!(doc.details().len(), 2);
        assert!(doc.detail("tags").is_none());
    }

    #[test]
    fn label_falls_back_to_id_then_untitled() {
        assert_eq!(Document::new("PMC1", "Title", ["a"]).label(), "Title");
        assert_eq!(Document::new("PMC1", "  ", ["a"]).label(), "PMC1");
        assert_eq!(Document::new("", "", ["a"]).label(), UNTITLED_LABEL);
    }

    #[test]
    fn tag_membership_is_case_sensitive() {
        let doc = Document::new("D1", "t", ["COVID", "lungs"]);
        assert!(doc.has_all_tags(&["COVID", "lungs"]));
        assert!(!doc.has_tag("covid"));
        assert!(doc.has_all_tags::<&str>(&[]));
    }
}

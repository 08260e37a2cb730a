//! Input records as they arrive in the JSON document.
//!
//! Decoding is lenient: a collection that is missing or not an array reads
//! as empty, and array items that cannot be understood are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::category::Category;

/// One paper and the entities extracted from it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PaperRecord {
	/// Node id of the paper. Empty ids get no node.
	#[serde(default, deserialize_with = "lenient_string")]
	pub paper_id: String,
	/// Paper title.
	#[serde(default, deserialize_with = "lenient_string")]
	pub title: String,
	/// DOI, bare or as a URL.
	#[serde(default, deserialize_with = "lenient_string")]
	pub doi: String,
	/// Author names in order.
	#[serde(default, deserialize_with = "lenient_strings")]
	pub authors: Vec<String>,
	/// Free-text subject area, shown in the details panel.
	#[serde(default, deserialize_with = "lenient_string")]
	pub category: String,
	/// Methods or models used.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub methods: Vec<EntityMention>,
	/// Tasks addressed.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub tasks: Vec<EntityMention>,
	/// Imaging modalities.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub imaging_modalities: Vec<EntityMention>,
	/// Datasets evaluated on.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub datasets: Vec<EntityMention>,
	/// Anatomical structures studied.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub anatomical_structures: Vec<EntityMention>,
	/// Evaluation metrics, optionally with a value.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub metrics: Vec<EntityMention>,
	/// Claimed innovations, usually described rather than named.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub innovations: Vec<EntityMention>,
	/// Edges contributed by this paper.
	#[serde(default, deserialize_with = "lenient_vec")]
	pub relations: Vec<Relation>,
}

/// A directed, labelled relation between two identifiers. Either end may be
/// a paper id or an entity name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Relation {
	/// Source id.
	pub from: String,
	/// Target id.
	pub to: String,
	/// Relation type, read from the `type` key.
	#[serde(rename = "type", default, deserialize_with = "lenient_string")]
	pub kind: String,
}

/// One item of a typed entity array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum EntityMention {
	/// A bare string.
	PlainName(String),
	/// An object with a `name`.
	NamedEntity {
		/// The `name` key.
		name: String,
		/// The `description` key, if present.
		description: Option<String>,
		/// The `value` key, rendered as text.
		value: Option<String>,
	},
	/// An object with only a `description`.
	DescribedEntity {
		/// The `description` key.
		description: String,
	},
}

impl TryFrom<Value> for EntityMention {
	type Error = String;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(name) => Ok(EntityMention::PlainName(name)),
			Value::Object(map) => {
				let text = |key: &str| {
					map.get(key)
						.and_then(Value::as_str)
						.filter(|s| !s.is_empty())
						.map(str::to_owned)
				};
				let value = map.get("value").and_then(|v| match v {
					Value::Null => None,
					Value::String(s) => Some(s.clone()),
					other => Some(other.to_string()),
				});
				match (text("name"), text("description")) {
					(Some(name), description) => Ok(EntityMention::NamedEntity {
						name,
						description,
						value,
					}),
					(None, Some(description)) => Ok(EntityMention::DescribedEntity { description }),
					(None, None) => Err("entity has neither name nor description".into()),
				}
			}
			other => Err(format!("unsupported entity item: {other}")),
		}
	}
}

impl EntityMention {
	/// Name used to label this mention when it belongs to `kind`.
	/// Innovations are known by their description, everything else by name.
	pub fn label_for(&self, kind: EntityKind) -> Option<&str> {
		let label = match (self, kind) {
			(EntityMention::PlainName(name), _) => name.as_str(),
			(EntityMention::NamedEntity { description, .. }, EntityKind::Innovation) => {
				description.as_deref()?
			}
			(EntityMention::NamedEntity { name, .. }, _) => name.as_str(),
			(EntityMention::DescribedEntity { description }, _) => description.as_str(),
		};
		(!label.is_empty()).then_some(label)
	}

	/// The `name` of the mention; plain strings are their own name.
	pub fn name(&self) -> Option<&str> {
		match self {
			EntityMention::PlainName(name) | EntityMention::NamedEntity { name, .. } => {
				Some(name.as_str())
			}
			EntityMention::DescribedEntity { .. } => None,
		}
	}

	/// The `description` of the mention; plain strings are their own
	/// description.
	pub fn description(&self) -> Option<&str> {
		match self {
			EntityMention::PlainName(text) => Some(text.as_str()),
			EntityMention::NamedEntity { description, .. } => description.as_deref(),
			EntityMention::DescribedEntity { description } => Some(description.as_str()),
		}
	}

	/// Whether this mention refers to the entity called `label`. Objects
	/// compare their description when they have one, otherwise their name.
	pub fn refers_to(&self, label: &str) -> bool {
		match self {
			EntityMention::PlainName(name) => name == label,
			EntityMention::NamedEntity {
				description: Some(description),
				..
			} => description == label,
			EntityMention::NamedEntity { name, .. } => name == label,
			EntityMention::DescribedEntity { description } => description == label,
		}
	}

	/// `name: value` for metrics, or just the name.
	pub fn with_value(&self) -> Option<String> {
		match self {
			EntityMention::NamedEntity {
				name,
				value: Some(value),
				..
			} => Some(format!("{name}: {value}")),
			other => other.name().map(str::to_owned),
		}
	}
}

/// The typed entity arrays of a [`PaperRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
	/// `methods`
	Method,
	/// `tasks`
	Task,
	/// `imaging_modalities`
	Modality,
	/// `datasets`
	Dataset,
	/// `anatomical_structures`
	AnatomicalStructure,
	/// `metrics`
	Metric,
	/// `innovations`
	Innovation,
}

impl EntityKind {
	/// Every kind, in the order the arrays are scanned.
	pub const ALL: [EntityKind; 7] = [
		EntityKind::Method,
		EntityKind::Task,
		EntityKind::Modality,
		EntityKind::Dataset,
		EntityKind::AnatomicalStructure,
		EntityKind::Metric,
		EntityKind::Innovation,
	];

	/// Graph category for entities listed under this kind.
	pub fn category(self) -> Category {
		match self {
			EntityKind::Method => Category::Method,
			EntityKind::Task => Category::Task,
			EntityKind::Modality => Category::Modality,
			EntityKind::Dataset => Category::Dataset,
			EntityKind::AnatomicalStructure => Category::AnatomicalStructure,
			EntityKind::Metric => Category::Metric,
			EntityKind::Innovation => Category::Innovation,
		}
	}
}

impl PaperRecord {
	/// The entity array for `kind`.
	pub fn mentions(&self, kind: EntityKind) -> &[EntityMention] {
		match kind {
			EntityKind::Method => &self.methods,
			EntityKind::Task => &self.tasks,
			EntityKind::Modality => &self.imaging_modalities,
			EntityKind::Dataset => &self.datasets,
			EntityKind::AnatomicalStructure => &self.anatomical_structures,
			EntityKind::Metric => &self.metrics,
			EntityKind::Innovation => &self.innovations,
		}
	}

	/// Labels of every usable mention of `kind`, in array order.
	pub fn labels(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
		self.mentions(kind).iter().filter_map(move |m| m.label_for(kind))
	}
}

/// Decode a whole document. Only a non-array top level is an error;
/// individual records that are not objects are skipped.
pub fn parse_records(text: &str) -> Result<Vec<PaperRecord>, serde_json::Error> {
	let items: Vec<Value> = serde_json::from_str(text)?;
	let total = items.len();
	let records: Vec<PaperRecord> = items
		.into_iter()
		.filter_map(|item| serde_json::from_value(item).ok())
		.collect();
	if records.len() < total {
		log::debug!("skipped {} unreadable records", total - records.len());
	}
	Ok(records)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => s,
		Value::Number(n) => n.to_string(),
		_ => String::new(),
	})
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Array(items) => items
			.into_iter()
			.filter_map(|item| match item {
				Value::String(s) => Some(s),
				_ => None,
			})
			.collect(),
		_ => Vec::new(),
	})
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Array(items) => items
			.into_iter()
			.filter_map(|item| serde_json::from_value(item).ok())
			.collect(),
		_ => Vec::new(),
	})
}

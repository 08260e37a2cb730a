//! Node categories and name-based classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The nine node categories shown in the graph legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	/// A paper record.
	Paper,
	/// A method or model.
	Method,
	/// A task such as segmentation.
	Task,
	/// An imaging modality.
	Modality,
	/// A dataset or challenge.
	Dataset,
	/// An anatomical structure.
	AnatomicalStructure,
	/// A claimed innovation.
	Innovation,
	/// An evaluation metric.
	Metric,
	/// Anything the classifier could not place.
	Unknown,
}

impl Category {
	/// Legend order.
	pub const ALL: [Category; 9] = [
		Category::Paper,
		Category::Method,
		Category::Task,
		Category::Modality,
		Category::Dataset,
		Category::AnatomicalStructure,
		Category::Innovation,
		Category::Metric,
		Category::Unknown,
	];

	/// Human-readable label.
	pub fn label(&self) -> &'static str {
		match self {
			Category::Paper => "Paper",
			Category::Method => "Method",
			Category::Task => "Task",
			Category::Modality => "Modality",
			Category::Dataset => "Dataset",
			Category::AnatomicalStructure => "Anatomical Structure",
			Category::Innovation => "Innovation",
			Category::Metric => "Metric",
			Category::Unknown => "Unknown",
		}
	}

	/// Palette colour. Both the full render and every overlay resolve
	/// category colours through here.
	pub fn color(&self) -> &'static str {
		match self {
			Category::Paper => "#5470c6",
			Category::Method => "#91cc75",
			Category::Task => "#fac858",
			Category::Modality => "#ee6666",
			Category::Dataset => "#73c0de",
			Category::AnatomicalStructure => "#2f4554",
			Category::Innovation => "#3ba272",
			Category::Metric => "#fc8452",
			Category::Unknown => "#999999",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

// Checked in this order; the first list with a hit wins.
const MODALITY_KEYWORDS: &[&str] = &[
	"mri", "ct", "x-ray", "x光", "ultrasound", "超声", "pet", "spect", "oct", "eeg", "光",
];
const TASK_KEYWORDS: &[&str] = &[
	"segmentation",
	"分割",
	"classification",
	"分类",
	"detection",
	"检测",
	"registration",
	"配准",
	"reconstruction",
	"重建",
	"定位",
];
const METRIC_KEYWORDS: &[&str] = &[
	"accuracy",
	"准确率",
	"dice",
	"iou",
	"sensitivity",
	"敏感度",
	"precision",
	"精度",
	"f1",
	"auc",
	"psnr",
	"ssim",
];
const DATASET_KEYWORDS: &[&str] = &["dataset", "数据集", "challenge", "adni", "mimic", "chest"];
const INNOVATION_KEYWORDS: &[&str] = &["innov", "创新", "proposed", "提出"];

const RULES: &[(Category, &[&str])] = &[
	(Category::Modality, MODALITY_KEYWORDS),
	(Category::Task, TASK_KEYWORDS),
	(Category::Metric, METRIC_KEYWORDS),
	(Category::Dataset, DATASET_KEYWORDS),
	(Category::Innovation, INNOVATION_KEYWORDS),
];

/// Guess a category from an entity name by keyword substring match.
///
/// Matching is case-insensitive and covers English and Chinese keywords.
/// Returns [`Category::Unknown`] for empty names or when nothing matches.
pub fn infer_category(name: &str) -> Category {
	if name.is_empty() {
		return Category::Unknown;
	}
	let name = name.to_lowercase();
	RULES
		.iter()
		.find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
		.map(|(category, _)| *category)
		.unwrap_or(Category::Unknown)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_name_is_unknown() {
		assert_eq!(infer_category(""), Category::Unknown);
	}

	#[test]
	fn classifies_common_names() {
		assert_eq!(infer_category("MRI scan"), Category::Modality);
		assert_eq!(infer_category("Dice coefficient"), Category::Metric);
		assert_eq!(infer_category("Image Segmentation"), Category::Task);
		assert_eq!(infer_category("BraTS Challenge"), Category::Dataset);
		assert_eq!(infer_category("Proposed attention block"), Category::Innovation);
		assert_eq!(infer_category("UNet"), Category::Unknown);
	}

	#[test]
	fn modality_takes_priority_over_task() {
		assert_eq!(infer_category("MRI segmentation"), Category::Modality);
		// "detection" contains "ct"
		assert_eq!(infer_category("lesion detection"), Category::Modality);
	}

	#[test]
	fn matches_chinese_keywords() {
		assert_eq!(infer_category("超声图像"), Category::Modality);
		assert_eq!(infer_category("病灶分割"), Category::Task);
		assert_eq!(infer_category("准确率"), Category::Metric);
		assert_eq!(infer_category("公开数据集"), Category::Dataset);
		assert_eq!(infer_category("主要创新"), Category::Innovation);
	}

	#[test]
	fn palette_is_distinct_per_category() {
		let mut colors: Vec<_> = Category::ALL.iter().map(|c| c.color()).collect();
		colors.sort();
		colors.dedup();
		assert_eq!(colors.len(), Category::ALL.len());
	}
}

//! Runtime settings, provided to the component tree as context.

use force_graph::SimulationParameters;
use serde::Deserialize;

/// Where the dataset comes from and how the page presents it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Relative URL of the paper document, fetched once at startup.
	pub data_url: String,
	/// Most papers shown in the list at once.
	pub list_limit: usize,
	/// Draw node names next to nodes.
	pub show_labels: bool,
	/// Physics tuning for the canvas.
	pub simulation: SimulationSettings,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: "./data/standard_cut.json".into(),
			list_limit: 50,
			show_labels: true,
			simulation: SimulationSettings::default(),
		}
	}
}

impl AppConfig {
	/// Query parameter that overrides [`AppConfig::data_url`].
	pub const DATA_PARAM: &'static str = "data";

	/// This config with the data URL replaced when `data_url` is set.
	pub fn with_data_url(mut self, data_url: Option<String>) -> Self {
		if let Some(url) = data_url.filter(|u| !u.trim().is_empty()) {
			self.data_url = url;
		}
		self
	}
}

/// Mirrors [`SimulationParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
	/// Node repulsion.
	pub force_charge: f32,
	/// Edge spring stiffness.
	pub force_spring: f32,
	/// Cap on the force applied per step.
	pub force_max: f32,
	/// Cap on node velocity.
	pub node_speed: f32,
	/// Velocity kept between steps.
	pub damping_factor: f32,
}

impl Default for SimulationSettings {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl From<SimulationSettings> for SimulationParameters {
	fn from(s: SimulationSettings) -> Self {
		SimulationParameters {
			force_charge: s.force_charge,
			force_spring: s.force_spring,
			force_max: s.force_max,
			node_speed: s.node_speed,
			damping_factor: s.damping_factor,
		}
	}
}

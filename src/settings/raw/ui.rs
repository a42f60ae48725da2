use serde::Deserialize;

use indx_search::UiLabels;

use crate::cli::CliArgs;

/// Terminal interface options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) placeholder: Option<String>,
	pub(super) dataset_description: Option<String>,
	pub(super) show_meta: Option<bool>,
	pub(super) initial_query: Option<String>,
}

impl UiSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.show_meta {
			self.show_meta = Some(value);
		}
	}

	pub(super) fn labels(&self) -> UiLabels {
		let mut labels = UiLabels::default();
		if let Some(placeholder) = &self.placeholder {
			labels = labels.with_placeholder(placeholder.clone());
		}
		if let Some(description) = &self.dataset_description {
			labels = labels.with_dataset_description(description.clone());
		}
		labels
	}
}

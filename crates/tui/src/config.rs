/// Text shown around the prompt and in the header.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Placeholder displayed while the query is empty.
	pub placeholder: String,
	/// Free-form description of the dataset being searched.
	pub dataset_description: String,
	/// Fixed title at the start of the header line.
	pub title: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			placeholder: "Type here to search".to_string(),
			dataset_description: "My search demo".to_string(),
			title: "INDX SEARCH SYSTEM".to_string(),
		}
	}
}

impl UiLabels {
	#[must_use]
	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	#[must_use]
	pub fn with_dataset_description(mut self, description: impl Into<String>) -> Self {
		self.dataset_description = description.into();
		self
	}
}

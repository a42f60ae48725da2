use anyhow::Result;
use indx_search::{Confidence, SearchOutcome, SearchResultView};
use serde_json::{Value, json};

use crate::workflow::QueryReport;

/// Everything the binary can print before exiting.
pub(crate) enum Report {
	/// The record picked in the interactive interface.
	Selection(SearchOutcome),
	/// A one-shot search.
	Results(QueryReport),
	Datasets(Vec<String>),
}

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &Report) {
	print!("{}", format_plain(report));
}

fn format_plain(report: &Report) -> String {
	match report {
		Report::Selection(outcome) => {
			if !outcome.accepted {
				return format!("Search cancelled (query: '{}')\n", outcome.query);
			}
			match &outcome.selection {
				Some(record) => format!("{}\n", record.document_text),
				None => "No selection\n".to_string(),
			}
		}
		Report::Results(report) => {
			let mut out = String::new();
			if let Some(failure) = &report.failure {
				out.push_str(&format!("Search failed: {failure}\n"));
			}
			if report.view.is_empty() {
				out.push_str("No results\n");
				return out;
			}
			for line in result_lines(&report.view, report.show_meta) {
				out.push_str(&line);
				out.push('\n');
			}
			out
		}
		Report::Datasets(datasets) => {
			if datasets.is_empty() {
				return "No datasets\n".to_string();
			}
			datasets.iter().map(|name| format!("{name}\n")).collect()
		}
	}
}

fn result_lines(view: &SearchResultView, show_meta: bool) -> Vec<String> {
	view.annotated()
		.enumerate()
		.map(|(index, (record, confidence))| {
			let marker = match confidence {
				Confidence::Confident => ' ',
				Confidence::LastConfident => '_',
				Confidence::BelowConfidence => '~',
			};
			let mut line = format!(
				"{marker}{:>3} {:>4}  {}",
				index + 1,
				record.metric_score,
				record.document_text
			);
			if show_meta {
				line.push_str(&format!(
					"  [{}.{}]",
					record.document_key, record.segment_number
				));
			}
			line
		})
		.collect()
}

/// Format the report as a JSON string.
pub(crate) fn format_report_json(report: &Report) -> Result<String> {
	let payload = match report {
		Report::Selection(outcome) => json!({
			"accepted": outcome.accepted,
			"query": outcome.query,
			"selection": outcome.selection,
		}),
		Report::Results(report) => json!({
			"query": report.query,
			"status": report.session.status.to_string(),
			"failure": report.failure,
			"truncationIndex": report.view.truncation_index(),
			"records": records_json(&report.view),
		}),
		Report::Datasets(datasets) => json!({ "datasets": datasets }),
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

fn records_json(view: &SearchResultView) -> Vec<Value> {
	view.annotated()
		.map(|(record, confidence)| {
			json!({
				"metricScore": record.metric_score,
				"documentTextToBeIndexed": record.document_text,
				"documentKey": record.document_key,
				"segmentNumber": record.segment_number,
				"belowConfidence": confidence.is_below(),
			})
		})
		.collect()
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}

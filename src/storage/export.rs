//! Tabular export of topics and subjects.
//!
//! Records carry the same field names as the stored data, so the output can
//! be opened in a spreadsheet or fed to another tool.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Subject, Topic};

/// Supported export formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Format {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// A pretty-printed JSON array of records.
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// An error raised while exporting.
#[derive(Debug, thiserror::Error)]
#[error("failed to render export: {0}")]
pub struct ExportError(#[from] serde_json::Error);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicRecord<'a> {
    subject: &'a str,
    topic: &'a str,
    created_on: NaiveDate,
    review_dates: &'a [NaiveDate; 4],
}

impl<'a> From<&'a Topic> for TopicRecord<'a> {
    fn from(topic: &'a Topic) -> Self {
        Self {
            subject: topic.subject(),
            topic: topic.topic(),
            created_on: topic.created_on(),
            review_dates: topic.review_dates(),
        }
    }
}

/// Render topics, one record per topic in insertion order.
///
/// CSV output has the columns `subject`, `topic`, `createdOn` and
/// `review1` to `review4`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn export_topics(topics: &[Topic], format: Format) -> Result<String, ExportError> {
    match format {
        Format::Json => {
            let records: Vec<TopicRecord> = topics.iter().map(TopicRecord::from).collect();
            Ok(serde_json::to_string_pretty(&records)?)
        }
        Format::Csv => {
            let header = ["subject", "topic", "createdOn", "review1", "review2", "review3", "review4"];
            let rows = topics.iter().map(|topic| {
                let mut row = vec![
                    topic.subject().to_string(),
                    topic.topic().to_string(),
                    topic.created_on().to_string(),
                ];
                row.extend(topic.review_dates().iter().map(ToString::to_string));
                row
            });
            Ok(render_csv(&header, rows))
        }
    }
}

/// Render subjects, one record per row in insertion order.
///
/// CSV output has the columns `name`, `difficulty` and `allocatedHours`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn export_subjects(subjects: &[Subject], format: Format) -> Result<String, ExportError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(subjects)?),
        Format::Csv => {
            let header = ["name", "difficulty", "allocatedHours"];
            let rows = subjects.iter().map(|subject| {
                vec![
                    subject.name.clone(),
                    subject.difficulty.to_string(),
                    subject.allocated_hours.to_string(),
                ]
            });
            Ok(render_csv(&header, rows))
        }
    }
}

fn render_csv(header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut out = header
        .iter()
        .map(|column| csv_escape(column))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');

    for row in rows {
        let line = row
            .iter()
            .map(|value| csv_escape(value))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn topic() -> Topic {
        Topic::new("Maths", "Algebra", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap()
    }

    #[test]
    fn topics_csv() {
        let csv = export_topics(&[topic()], Format::Csv).unwrap();
        assert_eq!(
            csv,
            "subject,topic,createdOn,review1,review2,review3,review4\n\
             Maths,Algebra,2024-01-01,2024-01-02,2024-01-08,2024-01-16,2024-01-31\n"
        );
    }

    #[test]
    fn topics_json_uses_field_names() {
        let json = export_topics(&[topic()], Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["subject"], "Maths");
        assert_eq!(value[0]["createdOn"], "2024-01-01");
        assert_eq!(value[0]["reviewDates"][3], "2024-01-31");
        assert!(value[0].get("id").is_none());
    }

    #[test]
    fn subjects_csv_keeps_duplicates_in_order() {
        let subjects = [
            Subject::new("Maths", 3, 30).unwrap(),
            Subject::new("Art", 1, 10).unwrap(),
            Subject::new("Maths", 2, 20).unwrap(),
        ];

        let csv = export_subjects(&subjects, Format::Csv).unwrap();

        assert_eq!(
            csv,
            "name,difficulty,allocatedHours\nMaths,3,30\nArt,1,10\nMaths,2,20\n"
        );
    }

    #[test]
    fn subjects_json() {
        let json = export_subjects(&[Subject::new("Art", 1, 10).unwrap()], Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "name": "Art", "difficulty": 1, "allocatedHours": 10 }])
        );
    }

    #[test]
    fn empty_export_has_header_only() {
        assert_eq!(
            export_subjects(&[], Format::Csv).unwrap(),
            "name,difficulty,allocatedHours\n"
        );
    }

    #[test_case("plain", "plain"; "plain value")]
    #[test_case("a,b", "\"a,b\""; "comma")]
    #[test_case("say \"hi\"", "\"say \"\"hi\"\"\""; "quotes")]
    #[test_case("two\nlines", "\"two\nlines\""; "newline")]
    fn csv_escaping(input: &str, expected: &str) {
        assert_eq!(csv_escape(input), expected);
    }
}

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Days after creation on which a topic comes up for review.
pub const INTERVALS: [u64; 4] = [1, 7, 15, 30];

/// A study item with a fixed spaced-repetition schedule.
///
/// The review dates are computed once, when the topic is created, and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TopicRecord")]
pub struct Topic {
    id: Uuid,
    subject: String,
    topic: String,
    created_on: NaiveDate,
    review_dates: [NaiveDate; 4],
}

impl Topic {
    /// Create a topic studied on `created_on`.
    ///
    /// Both names are trimmed. A fresh UUID is generated, so identical
    /// subject/topic pairs remain distinct topics.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is blank, or if a review date would
    /// overflow the calendar.
    pub fn new(subject: &str, topic: &str, created_on: NaiveDate) -> Result<Self, ValidationError> {
        let subject = subject.trim();
        let topic = topic.trim();
        if subject.is_empty() {
            return Err(ValidationError::EmptyField("subject"));
        }
        if topic.is_empty() {
            return Err(ValidationError::EmptyField("topic"));
        }

        let review_dates = review_dates(created_on)?;

        Ok(Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            created_on,
            review_dates,
        })
    }

    /// Stable identifier of this topic.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The subject the topic belongs to.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The topic name.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The day the topic was first studied.
    #[must_use]
    pub const fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    /// The review dates, in order.
    #[must_use]
    pub const fn review_dates(&self) -> &[NaiveDate; 4] {
        &self.review_dates
    }

    /// Whether one of the reviews falls on `date`.
    #[must_use]
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.review_dates.contains(&date)
    }

    /// Which review (numbered from 1) falls on `date`, if any.
    #[must_use]
    pub fn review_number(&self, date: NaiveDate) -> Option<usize> {
        self.review_dates
            .iter()
            .position(|&d| d == date)
            .map(|i| i + 1)
    }

    /// The first review on or after `today`.
    ///
    /// Returns `None` once every review is in the past.
    #[must_use]
    pub fn next_review(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.review_dates.iter().copied().find(|&d| d >= today)
    }
}

/// A topic as stored, before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicRecord {
    id: Uuid,
    subject: String,
    topic: String,
    created_on: NaiveDate,
    review_dates: [NaiveDate; 4],
}

impl TryFrom<TopicRecord> for Topic {
    type Error = ValidationError;

    fn try_from(record: TopicRecord) -> Result<Self, Self::Error> {
        let topic = Self::new(&record.subject, &record.topic, record.created_on)?;
        if topic.review_dates != record.review_dates {
            return Err(ValidationError::ReviewDatesMismatch(record.created_on));
        }
        Ok(Self {
            id: record.id,
            ..topic
        })
    }
}

fn review_dates(created_on: NaiveDate) -> Result<[NaiveDate; 4], ValidationError> {
    let mut dates = [created_on; 4];
    for (date, days) in dates.iter_mut().zip(INTERVALS) {
        *date = created_on
            .checked_add_days(Days::new(days))
            .ok_or(ValidationError::DateOutOfRange(created_on))?;
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn review_dates_follow_intervals() {
        let topic = Topic::new("Maths", "Fractions", date(2024, 1, 1)).unwrap();
        assert_eq!(
            topic.review_dates(),
            &[
                date(2024, 1, 2),
                date(2024, 1, 8),
                date(2024, 1, 16),
                date(2024, 1, 31)
            ]
        );
    }

    #[test]
    fn review_dates_cross_month_and_year() {
        let topic = Topic::new("History", "Rome", date(2024, 12, 20)).unwrap();
        assert_eq!(
            topic.review_dates(),
            &[
                date(2024, 12, 21),
                date(2024, 12, 27),
                date(2025, 1, 4),
                date(2025, 1, 19)
            ]
        );
    }

    #[test]
    fn names_are_trimmed() {
        let topic = Topic::new("  Maths ", "\tAlgebra\n", date(2024, 1, 1)).unwrap();
        assert_eq!(topic.subject(), "Maths");
        assert_eq!(topic.topic(), "Algebra");
    }

    #[test_case("", "Algebra", "subject"; "empty subject")]
    #[test_case("   ", "Algebra", "subject"; "blank subject")]
    #[test_case("Maths", "", "topic"; "empty topic")]
    #[test_case("Maths", " \t ", "topic"; "blank topic")]
    fn blank_names_are_rejected(subject: &str, topic: &str, field: &'static str) {
        let error = Topic::new(subject, topic, date(2024, 1, 1)).unwrap_err();
        assert_eq!(error, ValidationError::EmptyField(field));
    }

    #[test]
    fn identical_topics_get_distinct_ids() {
        let a = Topic::new("Maths", "Algebra", date(2024, 1, 1)).unwrap();
        let b = Topic::new("Maths", "Algebra", date(2024, 1, 1)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn overflowing_dates_are_rejected() {
        let error = Topic::new("Maths", "Algebra", NaiveDate::MAX).unwrap_err();
        assert_eq!(error, ValidationError::DateOutOfRange(NaiveDate::MAX));
    }

    #[test_case(date(2024, 1, 1), None; "creation day")]
    #[test_case(date(2024, 1, 2), Some(1); "first review")]
    #[test_case(date(2024, 1, 16), Some(3); "third review")]
    #[test_case(date(2024, 1, 31), Some(4); "last review")]
    #[test_case(date(2024, 1, 3), None; "between reviews")]
    fn review_number(on: NaiveDate, expected: Option<usize>) {
        let topic = Topic::new("Maths", "Algebra", date(2024, 1, 1)).unwrap();
        assert_eq!(topic.review_number(on), expected);
    }

    fn record(subject: &str, topic: &str, review_dates: [NaiveDate; 4]) -> TopicRecord {
        TopicRecord {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            created_on: date(2024, 1, 1),
            review_dates,
        }
    }

    #[test]
    fn stored_topic_keeps_its_id() {
        let original = Topic::new("Maths", "Algebra", date(2024, 1, 1)).unwrap();
        let stored = record("Maths", "Algebra", *original.review_dates());
        let id = stored.id;

        let topic = Topic::try_from(stored).unwrap();

        assert_eq!(topic.id(), id);
        assert_eq!(topic.review_dates(), original.review_dates());
    }

    #[test]
    fn stored_topic_with_blank_name_is_rejected() {
        let dates = *Topic::new("Maths", "Algebra", date(2024, 1, 1))
            .unwrap()
            .review_dates();
        assert_eq!(
            Topic::try_from(record("Maths", "  ", dates)),
            Err(ValidationError::EmptyField("topic"))
        );
    }

    #[test]
    fn stored_topic_with_shifted_dates_is_rejected() {
        let dates = [date(2030, 1, 1); 4];
        assert_eq!(
            Topic::try_from(record("Maths", "Algebra", dates)),
            Err(ValidationError::ReviewDatesMismatch(date(2024, 1, 1)))
        );
    }

    #[test]
    fn next_review_skips_past_dates() {
        let topic = Topic::new("Maths", "Algebra", date(2024, 1, 1)).unwrap();
        assert_eq!(topic.next_review(date(2024, 1, 1)), Some(date(2024, 1, 2)));
        assert_eq!(topic.next_review(date(2024, 1, 8)), Some(date(2024, 1, 8)));
        assert_eq!(topic.next_review(date(2024, 1, 9)), Some(date(2024, 1, 16)));
        assert_eq!(topic.next_review(date(2024, 2, 1)), None);
    }
}

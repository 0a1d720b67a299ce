//! Spaced-repetition review scheduling.

use chrono::NaiveDate;

use super::{Topic, ValidationError};

/// An append-only collection of scheduled topics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewScheduler {
    topics: Vec<Topic>,
}

impl ReviewScheduler {
    /// Create a scheduler over previously scheduled topics.
    #[must_use]
    pub const fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Schedule reviews for a topic studied `today` and append it.
    ///
    /// No de-duplication takes place: scheduling the same subject and topic
    /// twice tracks two independent topics.
    ///
    /// # Errors
    ///
    /// Returns an error if `subject` or `topic` is blank after trimming. The
    /// collection is unchanged in that case.
    pub fn schedule(
        &mut self,
        subject: &str,
        topic: &str,
        today: NaiveDate,
    ) -> Result<&Topic, ValidationError> {
        let topic = Topic::new(subject, topic, today)?;
        tracing::debug!(
            subject = topic.subject(),
            topic = topic.topic(),
            reviews = ?topic.review_dates(),
            "scheduled topic"
        );
        self.topics.push(topic);
        Ok(&self.topics[self.topics.len() - 1])
    }

    /// Topics with a review on `today`, in the order they were scheduled.
    #[must_use]
    pub fn due_today(&self, today: NaiveDate) -> Vec<&Topic> {
        due_today(&self.topics, today)
    }

    /// All topics, in the order they were scheduled.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Consume the scheduler, returning its topics.
    #[must_use]
    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }
}

/// Topics with a review falling exactly on `today`, preserving input order.
#[must_use]
pub fn due_today(topics: &[Topic], today: NaiveDate) -> Vec<&Topic> {
    topics.iter().filter(|topic| topic.is_due_on(today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn schedule_appends_topic() {
        let mut scheduler = ReviewScheduler::default();
        let topic = scheduler
            .schedule("Maths", "Algebra", date(2024, 3, 1))
            .unwrap()
            .clone();

        assert_eq!(scheduler.topics(), &[topic]);
    }

    #[test]
    fn schedule_allows_duplicates() {
        let mut scheduler = ReviewScheduler::default();
        scheduler.schedule("Maths", "Algebra", date(2024, 3, 1)).unwrap();
        scheduler.schedule("Maths", "Algebra", date(2024, 3, 1)).unwrap();

        assert_eq!(scheduler.topics().len(), 2);
    }

    #[test]
    fn rejected_topic_is_not_appended() {
        let mut scheduler = ReviewScheduler::default();
        assert!(scheduler.schedule("Maths", " ", date(2024, 3, 1)).is_err());
        assert!(scheduler.topics().is_empty());
    }

    #[test]
    fn due_today_matches_exact_dates_in_order() {
        let mut scheduler = ReviewScheduler::default();
        scheduler.schedule("A", "first", date(2024, 3, 1)).unwrap();
        scheduler.schedule("B", "second", date(2024, 3, 2)).unwrap();
        scheduler.schedule("C", "third", date(2024, 2, 22)).unwrap();

        // 2024-03-08 is review 2 of "first" and review 3 of "third"
        let due: Vec<_> = scheduler
            .due_today(date(2024, 3, 8))
            .into_iter()
            .map(Topic::topic)
            .collect();
        assert_eq!(due, ["first", "third"]);

        // the day after creation only matches the first interval
        let due: Vec<_> = scheduler
            .due_today(date(2024, 3, 3))
            .into_iter()
            .map(Topic::topic)
            .collect();
        assert_eq!(due, ["second"]);
    }

    #[test]
    fn nothing_is_due_on_creation_day_or_between_reviews() {
        let mut scheduler = ReviewScheduler::default();
        scheduler.schedule("A", "first", date(2024, 3, 1)).unwrap();

        assert!(scheduler.due_today(date(2024, 3, 1)).is_empty());
        assert!(scheduler.due_today(date(2024, 3, 5)).is_empty());
        assert!(scheduler.due_today(date(2024, 4, 1)).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(due_today(&[], date(2024, 3, 1)).is_empty());
    }
}

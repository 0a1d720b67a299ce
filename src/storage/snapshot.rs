use serde::{Deserialize, Serialize};

use crate::domain::{
    AllocationEngine, Checklist, ReviewScheduler, Session, SessionKey, Subject, Topic,
};

/// The stored state of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Snapshot {
    /// Scheduled topics, in insertion order.
    pub topics: Vec<Topic>,
    /// Subjects of the monthly plan, in insertion order.
    pub subjects: Vec<Subject>,
    /// Completion state of allocated hours.
    pub checklist: Checklist,
}

impl Snapshot {
    /// Rebuild the session stored under `key`.
    #[must_use]
    pub fn into_session(self, key: SessionKey) -> Session {
        let mut session = Session::new(key);
        session.reviews = ReviewScheduler::new(self.topics);
        session.plan = AllocationEngine::new(self.subjects, self.checklist);
        session
    }
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            topics: session.reviews.topics().to_vec(),
            subjects: session.plan.subjects().to_vec(),
            checklist: session.plan.checklist().clone(),
        }
    }
}

/// The serialized versions of a session snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        topics: Vec<Topic>,

        #[serde(default)]
        subjects: Vec<Subject>,

        #[serde(default)]
        checklist: Checklist,
    },
}

impl From<Versions> for Snapshot {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                topics,
                subjects,
                checklist,
            } => Self {
                topics,
                subjects,
                checklist,
            },
        }
    }
}

impl From<Snapshot> for Versions {
    fn from(snapshot: Snapshot) -> Self {
        Self::V1 {
            topics: snapshot.topics,
            subjects: snapshot.subjects,
            checklist: snapshot.checklist,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn session_survives_snapshot() {
        let key: SessionKey = "alice".parse().unwrap();
        let mut session = Session::new(key.clone());
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        session.reviews.schedule("Maths", "Algebra", today).unwrap();
        session.plan.add_subject("Maths", 2, 4).unwrap();
        session.plan.toggle_hour("Maths", 3, true).unwrap();

        let restored = Snapshot::from(&session).into_session(key);

        assert_eq!(restored, session);
    }

    #[test]
    fn version_only_document_is_empty() {
        let snapshot: Snapshot = serde_yaml::from_str("_version: '1'\n").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn fields_use_data_model_names() {
        let snapshot = Snapshot {
            topics: vec![
                Topic::new("Maths", "Algebra", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                    .unwrap(),
            ],
            subjects: vec![Subject::new("Maths", 2, 10).unwrap()],
            checklist: Checklist::default(),
        };

        let yaml = serde_yaml::to_string(&snapshot).unwrap();

        assert!(yaml.starts_with("_version:"));
        for field in ["createdOn:", "reviewDates:", "allocatedHours:", "difficulty:"] {
            assert!(yaml.contains(field), "{field} missing from:\n{yaml}");
        }
    }

    fn document(topic: &str, review_dates: &str) -> String {
        format!(
            "_version: '1'
topics:
- id: 67e55044-10b1-426f-9247-bb680e5fe0c8
  subject: Maths
  topic: '{topic}'
  createdOn: 2024-01-01
  reviewDates: {review_dates}
"
        )
    }

    #[test]
    fn stored_topics_are_validated() {
        let dates = "[2024-01-02, 2024-01-08, 2024-01-16, 2024-01-31]";
        let snapshot: Snapshot = serde_yaml::from_str(&document("Algebra", dates)).unwrap();
        assert_eq!(snapshot.topics[0].topic(), "Algebra");

        assert!(serde_yaml::from_str::<Snapshot>(&document("", dates)).is_err());

        let shifted = "[2030-01-01, 2030-01-01, 2030-01-01, 2030-01-01]";
        assert!(serde_yaml::from_str::<Snapshot>(&document("Algebra", shifted)).is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert!(serde_yaml::from_str::<Snapshot>("_version: '99'\n").is_err());
    }
}

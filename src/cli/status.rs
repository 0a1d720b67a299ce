use chrono::NaiveDate;
use clap::Parser;
use studyplan::Session;
use tracing::instrument;

use super::{
    OutputFormat, Workspace, date_or_today,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show reviews due today and progress through the monthly plan")]
pub struct Status {
    /// The day to report on (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

struct Summary {
    session: String,
    topics: usize,
    due: Vec<(String, String)>,
    subjects: Vec<(String, u32, u32)>,
}

impl Summary {
    fn new(session: &Session, today: NaiveDate) -> Self {
        let due = session
            .reviews
            .due_today(today)
            .into_iter()
            .map(|topic| (topic.subject().to_string(), topic.topic().to_string()))
            .collect();

        let mut subjects: Vec<(String, u32, u32)> = Vec::new();
        for subject in session.plan.subjects() {
            if subjects.iter().any(|(name, _, _)| *name == subject.name) {
                continue;
            }
            if let Some(progress) = session.plan.progress(&subject.name) {
                subjects.push((subject.name.clone(), progress.completed, progress.total));
            }
        }

        Self {
            session: session.key().to_string(),
            topics: session.reviews.topics().len(),
            due,
            subjects,
        }
    }

    fn is_empty(&self) -> bool {
        self.topics == 0 && self.subjects.is_empty()
    }

    fn hours(&self) -> (u32, u32) {
        self.subjects
            .iter()
            .fold((0_u32, 0_u32), |(done, total), (_, d, t)| {
                (done.saturating_add(*d), total.saturating_add(*t))
            })
    }
}

impl Status {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let today = date_or_today(self.date);
        let summary = Summary::new(&session, today);

        match self.output {
            OutputFormat::Json => Self::output_json(&summary, today)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&summary),
            OutputFormat::Table if summary.is_empty() => println!(
                "Nothing planned yet. Start with 'study review add' or 'study subject add'."
            ),
            OutputFormat::Table => Self::output_table(&summary, today),
        }
        Ok(())
    }

    fn output_json(summary: &Summary, today: NaiveDate) -> anyhow::Result<()> {
        println!("{}", Self::render_json(summary, today)?);
        Ok(())
    }

    fn render_json(summary: &Summary, today: NaiveDate) -> serde_json::Result<String> {
        use serde_json::json;

        let due: Vec<_> = summary
            .due
            .iter()
            .map(|(subject, topic)| json!({ "subject": subject, "topic": topic }))
            .collect();
        let subjects: Vec<_> = summary
            .subjects
            .iter()
            .map(|(name, completed, total)| {
                json!({ "name": name, "completedHours": completed, "allocatedHours": total })
            })
            .collect();
        let (done, total) = summary.hours();

        let output = json!({
            "session": summary.session,
            "date": today,
            "topics": summary.topics,
            "due": due,
            "subjects": subjects,
            "hours": { "completed": done, "allocated": total },
        });

        serde_json::to_string_pretty(&output)
    }

    fn output_quiet(summary: &Summary) {
        let (done, total) = summary.hours();
        println!(
            "topics={} due={} subjects={} hours={done}/{total}",
            summary.topics,
            summary.due.len(),
            summary.subjects.len()
        );
    }

    fn output_table(summary: &Summary, today: NaiveDate) {
        let narrow = is_narrow();

        println!("{}", format!("Session {}", summary.session).info());
        println!("{}", "──────────────────".dim());
        println!("Topics scheduled: {}", summary.topics);

        if summary.due.is_empty() {
            println!("Reviews due {today}: {} 🎉", "0".success());
        } else {
            println!(
                "Reviews due {today}: {}",
                summary.due.len().to_string().warning()
            );
            for (subject, topic) in &summary.due {
                println!("  • {subject} - {topic}");
            }
        }

        println!();

        if summary.subjects.is_empty() {
            println!("{}", "No subjects in the monthly plan.".dim());
            return;
        }

        if narrow {
            for (name, done, total) in &summary.subjects {
                println!("{name}: {done}/{total}h");
            }
        } else {
            println!("{:<20} {:>8}", "Subject", "Done");
            for (name, done, total) in &summary.subjects {
                println!("{name:<20} {:>8}", format!("{done}/{total}h"));
            }
        }

        let (done, total) = summary.hours();
        if total > 0 && done >= total {
            println!("Total: {} ✅", format!("{done}/{total}h").success());
        } else {
            println!("Total: {done}/{total}h");
        }
    }
}

#[cfg(test)]
mod tests {
    use studyplan::SessionKey;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn empty_session_still_renders_json() {
        let session = Session::new("alice".parse::<SessionKey>().unwrap());
        let summary = Summary::new(&session, today());
        assert!(summary.is_empty());

        let output = Status::render_json(&summary, today()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["session"], "alice");
        assert_eq!(value["topics"], 0);
        assert_eq!(value["due"], serde_json::json!([]));
        assert_eq!(value["hours"]["allocated"], 0);
    }

}

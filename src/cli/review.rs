use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use regex::Regex;
use serde::Serialize;
use studyplan::Topic;
use tracing::instrument;

use super::{
    OutputFormat, Workspace, date_or_today,
    terminal::{Colorize, print_table},
};

#[derive(Debug, Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ReviewCommand,
}

#[derive(Debug, Parser)]
enum ReviewCommand {
    /// Record a topic studied today and schedule its reviews
    ///
    /// Reviews fall 1, 7, 15 and 30 days after the study date.
    Add(Add),

    /// List topics with a review due today
    Due(Due),

    /// List every scheduled topic
    List(List),
}

impl Command {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: Workspace) -> anyhow::Result<()> {
        match self.command {
            ReviewCommand::Add(add) => add.run(workspace),
            ReviewCommand::Due(due) => due.run(&workspace),
            ReviewCommand::List(list) => list.run(&workspace),
        }
    }
}

#[derive(Debug, Parser)]
struct Add {
    /// The subject the topic belongs to
    subject: String,

    /// The topic studied
    topic: String,

    /// The study date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl Add {
    fn run(self, mut workspace: Workspace) -> anyhow::Result<()> {
        let mut session = workspace.load()?;
        let today = date_or_today(self.date);

        let topic = session
            .reviews
            .schedule(&self.subject, &self.topic, today)?
            .clone();
        workspace.save(&session)?;

        println!(
            "{}",
            format!(
                "📚 Scheduled '{}' - '{}'",
                topic.subject(),
                topic.topic()
            )
            .success()
        );
        let dates: Vec<String> = topic.review_dates().iter().map(ToString::to_string).collect();
        println!("{}", format!("   Reviews: {}", dates.join(", ")).dim());
        Ok(())
    }
}

#[derive(Debug, Parser)]
struct Due {
    /// The day to check (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Due {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let today = date_or_today(self.date);
        let due = session.reviews.due_today(today);

        match self.output {
            OutputFormat::Json => print_json(&due, today),
            OutputFormat::Table => {
                if due.is_empty() {
                    println!("🎉 No reviews due on {today}");
                    return Ok(());
                }

                println!("📆 Reviews due on {today}:");
                let rows: Vec<[String; 3]> = due
                    .iter()
                    .map(|topic| {
                        let review = topic
                            .review_number(today)
                            .map_or_else(String::new, |n| format!("#{n}"));
                        [topic.subject().to_string(), topic.topic().to_string(), review]
                    })
                    .collect();
                print_table(["Subject", "Topic", "Review"], &rows);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
struct List {
    /// Regular expression matched against subject and topic
    #[arg(long)]
    regex: Option<String>,

    /// The day next reviews are counted from (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let today = date_or_today(self.date);

        let pattern = self
            .regex
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --regex")?;

        let topics: Vec<&Topic> = session
            .reviews
            .topics()
            .iter()
            .filter(|topic| {
                pattern.as_ref().is_none_or(|re| {
                    re.is_match(topic.subject()) || re.is_match(topic.topic())
                })
            })
            .collect();

        match self.output {
            OutputFormat::Json => print_json(&topics, today),
            OutputFormat::Table => {
                if topics.is_empty() {
                    println!("No topics scheduled yet. Add one with 'study review add'.");
                    return Ok(());
                }

                let rows: Vec<[String; 3]> = topics
                    .iter()
                    .map(|topic| {
                        let next = topic
                            .next_review(today)
                            .map_or_else(|| "done".to_string(), |d| d.to_string());
                        [topic.subject().to_string(), topic.topic().to_string(), next]
                    })
                    .collect();
                print_table(["Subject", "Topic", "Next review"], &rows);
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicRow<'a> {
    subject: &'a str,
    topic: &'a str,
    created_on: NaiveDate,
    review_dates: &'a [NaiveDate; 4],
    next_review: Option<NaiveDate>,
}

fn print_json(topics: &[&Topic], today: NaiveDate) -> anyhow::Result<()> {
    let rows: Vec<TopicRow> = topics
        .iter()
        .map(|topic| TopicRow {
            subject: topic.subject(),
            topic: topic.topic(),
            created_on: topic.created_on(),
            review_dates: topic.review_dates(),
            next_review: topic.next_review(today),
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&rows).context("failed to render json output")?
    );
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use studyplan::{AllocationError, PlanError, Session};
use tracing::instrument;

use super::{
    OutputFormat, Workspace,
    terminal::{Colorize, print_table},
};

#[derive(Debug, Parser)]
pub struct Command {
    #[command(subcommand)]
    command: SubjectCommand,
}

#[derive(Debug, Parser)]
enum SubjectCommand {
    /// Add a subject to the monthly plan
    Add(Add),

    /// Remove every subject with the given name
    Remove(Remove),

    /// List the subjects of the monthly plan
    List(List),
}

impl Command {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: Workspace) -> anyhow::Result<()> {
        match self.command {
            SubjectCommand::Add(add) => add.run(workspace),
            SubjectCommand::Remove(remove) => remove.run(workspace),
            SubjectCommand::List(list) => list.run(&workspace),
        }
    }
}

#[derive(Debug, Parser)]
struct Add {
    /// The subject name (case-sensitive)
    name: String,

    /// Relative difficulty, from 1 (easy) to 3 (hard)
    #[arg(long, short)]
    difficulty: u8,

    /// Initial monthly hours, replaced by the next allocation
    #[arg(long, default_value_t = 0)]
    hours: u32,
}

impl Add {
    fn run(self, mut workspace: Workspace) -> anyhow::Result<()> {
        let mut session = workspace.load()?;
        let subject = session
            .plan
            .add_subject(&self.name, self.difficulty, self.hours)?
            .clone();
        workspace.save(&session)?;

        println!(
            "{}",
            format!(
                "✅ Added '{}' with difficulty {}",
                subject.name, subject.difficulty
            )
            .success()
        );
        let duplicates = session
            .plan
            .subjects()
            .iter()
            .filter(|s| s.name == subject.name)
            .count();
        if duplicates > 1 {
            println!(
                "{}",
                format!(
                    "⚠️  {duplicates} subjects are named '{}'; they share one checklist",
                    subject.name
                )
                .warning()
            );
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
struct Remove {
    /// The exact name of the subject to remove
    name: String,
}

impl Remove {
    fn run(self, mut workspace: Workspace) -> anyhow::Result<()> {
        let mut session = workspace.load()?;
        let removed = session.plan.remove_subject(&self.name);

        if removed == 0 {
            println!("{}", format!("No subject named '{}'", self.name).dim());
            return Ok(());
        }

        workspace.save(&session)?;
        println!(
            "{}",
            format!("🗑️  Removed {removed} subject(s) named '{}'", self.name).success()
        );
        Ok(())
    }
}

#[derive(Debug, Parser)]
struct List {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRow<'a> {
    name: &'a str,
    difficulty: u8,
    allocated_hours: u32,
    completed_hours: u32,
}

impl List {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let rows = subject_rows(&session);

        match self.output {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&rows).context("failed to render json output")?
                );
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    println!("No subjects yet. Add one with 'study subject add'.");
                    return Ok(());
                }
                let table: Vec<[String; 4]> = rows
                    .iter()
                    .map(|row| {
                        [
                            row.name.to_string(),
                            row.difficulty.to_string(),
                            row.allocated_hours.to_string(),
                            row.completed_hours.to_string(),
                        ]
                    })
                    .collect();
                print_table(["Subject", "Difficulty", "Hours", "Done"], &table);
            }
        }
        Ok(())
    }
}

fn subject_rows(session: &Session) -> Vec<SubjectRow<'_>> {
    session
        .plan
        .subjects()
        .iter()
        .map(|subject| SubjectRow {
            name: &subject.name,
            difficulty: subject.difficulty,
            allocated_hours: subject.allocated_hours,
            completed_hours: session
                .plan
                .checklist()
                .completed(&subject.name, subject.allocated_hours),
        })
        .collect()
}

#[derive(Debug, Parser)]
pub struct Allocate {
    /// The monthly study budget in hours
    hours: u32,
}

impl Allocate {
    #[instrument(skip(workspace))]
    pub fn run(self, mut workspace: Workspace) -> anyhow::Result<()> {
        let mut session = workspace.load()?;

        match session.plan.allocate(self.hours) {
            Ok(_) => {}
            Err(PlanError::Allocation(error)) => {
                let hint = match error {
                    AllocationError::NoSubjects => "Add one with 'study subject add'.",
                    AllocationError::ZeroWeight => "Give subjects a difficulty from 1 to 3.",
                };
                eprintln!("{}", format!("⚠️  {error}. {hint}").warning());
                return Ok(());
            }
            Err(PlanError::Validation(error)) => return Err(error.into()),
        }
        workspace.save(&session)?;

        let table: Vec<[String; 3]> = session
            .plan
            .subjects()
            .iter()
            .map(|subject| {
                [
                    subject.name.clone(),
                    subject.difficulty.to_string(),
                    subject.allocated_hours.to_string(),
                ]
            })
            .collect();
        print_table(["Subject", "Difficulty", "Hours"], &table);

        let unallocated = session.plan.unallocated_hours(self.hours);
        println!();
        if unallocated == 0 {
            println!("{}", format!("✅ All {}h allocated", self.hours).success());
        } else {
            println!(
                "{}",
                format!(
                    "{}h of {}h allocated; {unallocated}h lost to rounding down",
                    self.hours - unallocated,
                    self.hours
                )
                .info()
            );
        }
        Ok(())
    }
}

use std::collections::HashSet;

use clap::Parser;
use studyplan::AllocationEngine;
use tracing::instrument;

use super::{
    Workspace,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
pub struct Check {
    /// The subject the hours belong to
    subject: String,

    /// The hours to mark, numbered from 1
    #[arg(num_args = 1.., required = true)]
    hours: Vec<u32>,
}

impl Check {
    #[instrument(skip(workspace))]
    pub fn run(self, mut workspace: Workspace, completed: bool) -> anyhow::Result<()> {
        let mut session = workspace.load()?;
        for &hour in &self.hours {
            session.plan.toggle_hour(&self.subject, hour, completed)?;
        }
        workspace.save(&session)?;

        if let Some(progress) = session.plan.progress(&self.subject) {
            let message = format!("{}: {progress} hours done", self.subject);
            if progress.is_finished() {
                println!("{}", format!("🎉 {message}").success());
            } else {
                println!("{message}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Show {
    /// Only show this subject
    subject: Option<String>,
}

impl Show {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let plan = &session.plan;

        let names = match self.subject {
            Some(name) => {
                if plan.allocated_hours(&name).is_none() {
                    anyhow::bail!("No subject named '{name}'");
                }
                vec![name]
            }
            None => unique_names(plan),
        };

        if names.is_empty() {
            println!("No subjects yet. Add one with 'study subject add'.");
            return Ok(());
        }

        let columns = terminal::checklist_columns(workspace.config().checklist_columns());
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_checklist(plan, name, columns);
        }
        Ok(())
    }
}

fn unique_names(plan: &AllocationEngine) -> Vec<String> {
    let mut seen = HashSet::new();
    plan.subjects()
        .iter()
        .filter(|subject| seen.insert(subject.name.as_str()))
        .map(|subject| subject.name.clone())
        .collect()
}

fn print_checklist(plan: &AllocationEngine, name: &str, columns: usize) {
    let Some(progress) = plan.progress(name) else {
        return;
    };

    println!("📖 {name} {}", format!("({progress})").dim());
    if progress.total == 0 {
        println!("{}", "   No hours allocated. Run 'study allocate'.".dim());
        return;
    }

    let hours: Vec<u32> = (1..=progress.total).collect();
    for row in hours.chunks(columns) {
        let cells: Vec<String> = row
            .iter()
            .map(|&hour| terminal::checkbox(hour, plan.is_complete(name, hour)))
            .collect();
        println!("   {}", cells.join(""));
    }
}

#[derive(Debug, Parser)]
pub struct Reset {
    /// Only reset this subject
    subject: Option<String>,

    /// Skip the confirmation prompt when resetting every subject
    #[arg(long, short)]
    yes: bool,
}

impl Reset {
    #[instrument(skip(workspace))]
    pub fn run(self, mut workspace: Workspace) -> anyhow::Result<()> {
        let mut session = workspace.load()?;

        if let Some(name) = self.subject {
            session.plan.reset_subject(&name);
            workspace.save(&session)?;
            println!("{}", format!("Checklist for '{name}' reset").success());
            return Ok(());
        }

        if !self.yes {
            let confirmed = dialoguer::Confirm::new()
                .with_prompt("Reset the checklist of every subject?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        session.plan.reset_all();
        workspace.save(&session)?;
        println!("{}", "All checklists reset".success());
        Ok(())
    }
}

use std::{fmt, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use studyplan::storage::{Format, export_subjects, export_topics};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Export {
    /// What to export
    #[arg(value_enum)]
    table: Table,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: ExportFormat,

    /// Write to this file instead of standard output
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Table {
    /// Scheduled topics and their review dates
    Topics,
    /// Subjects and their allocated hours
    Subjects,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl From<ExportFormat> for Format {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Json => Self::Json,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topics => "topics",
            Self::Subjects => "subjects",
        })
    }
}

impl Export {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.load()?;
        let format = Format::from(self.format);

        let rendered = match self.table {
            Table::Topics => export_topics(session.reviews.topics(), format)?,
            Table::Subjects => export_subjects(session.plan.subjects(), format)?,
        };

        match self.out {
            None => {
                print!("{rendered}");
                if !rendered.ends_with('\n') {
                    println!();
                }
            }
            Some(path) => {
                std::fs::write(&path, &rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!(
                    "{}",
                    format!("📥 Exported {} as {format} to {}", self.table, path.display())
                        .success()
                );
            }
        }
        Ok(())
    }
}

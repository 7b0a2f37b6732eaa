use checklist_core::model::Filter;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: checklist add "Buy milk"
    Add {
        text: Option<String>,
    },
    /// Toggle a task between pending and completed
    ///
    /// Example: checklist toggle 3
    Toggle {
        id: u64,
    },
    /// Delete a task
    ///
    /// Example: checklist delete 3
    Delete {
        id: u64,
    },
    /// Remove every completed task
    ///
    /// Example: checklist clear
    Clear,
    /// Switch the active filter and show the matching tasks
    ///
    /// Example: checklist filter pending
    Filter {
        filter: FilterArg,
    },
    /// List tasks under the active filter
    ///
    /// Example: checklist list
    /// Example: checklist list completed
    List {
        filter: Option<FilterArg>,
    },
    /// Show task counts
    ///
    /// Example: checklist stats
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Pending,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Pending => Filter::Pending,
            FilterArg::Completed => Filter::Completed,
        }
    }
}

use clap::{Args, Parser, Subcommand};

/// zd - command-line front-end for the Zendesk REST API.
///
/// Credentials come from `ZENDESK_*` environment variables or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "zd", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List Help Center articles
    Articles(ArticlesArgs),

    /// List the records of a custom object
    Records(RecordsArgs),

    /// Search the records of a custom object
    Search(SearchArgs),

    /// Show one custom object record
    Record(RecordArgs),

    /// Delete one custom object record
    DeleteRecord(RecordArgs),

    /// List the fields of a custom object
    Fields(FieldsArgs),

    /// List custom ticket statuses
    Statuses(StatusesArgs),
}

/// Shared paging flags.
#[derive(Args, Debug, Clone, Copy)]
pub struct PagingArgs {
    /// Items per page (server default when omitted)
    #[arg(long, default_value_t = 0)]
    pub page_size: u32,

    /// Follow pagination until the last page
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct ArticlesArgs {
    /// position, title, created_at or updated_at
    #[arg(long, default_value = "")]
    pub sort_by: String,

    /// asc or desc
    #[arg(long, default_value = "")]
    pub sort_order: String,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Parser, Debug)]
pub struct RecordsArgs {
    /// Custom object key (e.g. book)
    pub key: String,

    /// Comma-separated external ids to filter on
    #[arg(long, default_value = "")]
    pub external_ids: String,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Custom object key (e.g. book)
    pub key: String,

    /// Search terms
    #[arg(long, short, default_value = "")]
    pub query: String,

    /// name, created_at or updated_at; prefix with - for descending
    #[arg(long, default_value = "")]
    pub sort: String,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Custom object key (e.g. book)
    pub key: String,

    /// Record id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Custom object key (e.g. book)
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct StatusesArgs {
    /// Only active statuses
    #[arg(long)]
    pub active: bool,

    /// Comma-separated status categories (new, open, pending, hold, solved)
    #[arg(long, default_value = "")]
    pub categories: String,
}

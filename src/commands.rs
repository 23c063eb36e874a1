use std::io::Write;

use tokio_util::sync::CancellationToken;
use tracing::info;
use zendesk::{
    ArticleListOptions, CustomObjectApi, CustomObjectListOptions, CustomObjectRecord,
    CustomStatusApi, CustomTicketStatusOptions, CursorPagination, PageOptions,
    SearchCustomObjectRecordsOptions, Transport, Zendesk,
};

use crate::cli::{
    ArticlesArgs, Command, FieldsArgs, RecordArgs, RecordsArgs, SearchArgs, StatusesArgs,
};
use crate::error::CliError;
use crate::output::write_lines;

/// Run one subcommand, writing its results to `out`.
pub async fn run<T: Transport, W: Write>(
    client: &Zendesk<T>,
    command: Command,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Articles(args) => articles(client, args, ctx, out).await,
        Command::Records(args) => records(client, args, ctx, out).await,
        Command::Search(args) => search(client, args, ctx, out).await,
        Command::Record(args) => record(client, args, ctx, out).await,
        Command::DeleteRecord(args) => delete_record(client, args, ctx).await,
        Command::Fields(args) => fields(client, args, ctx, out).await,
        Command::Statuses(args) => statuses(client, args, ctx, out).await,
    }
}

async fn articles<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: ArticlesArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let opts = ArticleListOptions {
        page: PageOptions {
            per_page: args.paging.page_size,
            page: 0,
        },
        sort_by: args.sort_by,
        sort_order: args.sort_order,
    };
    let mut pager = client.articles_pager(Some(&opts))?;
    let mut pages = 0;
    while let Some(items) = pager.next_page(ctx).await? {
        pages += 1;
        write_lines(out, &items)?;
        if !args.paging.all {
            break;
        }
    }
    info!(pages, count = pager.page().count, "articles listed");
    Ok(())
}

async fn records<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: RecordsArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let opts = CustomObjectListOptions {
        pagination: CursorPagination::with_size(args.paging.page_size),
        external_ids: args.external_ids,
        ..Default::default()
    };
    let mut pager = client.custom_object_records_pager(&args.key, opts)?;
    let mut pages = 0;
    while let Some(items) = pager.next_page(ctx).await? {
        pages += 1;
        write_lines(out, &items)?;
        if !args.paging.all {
            break;
        }
    }
    info!(key = %args.key, pages, has_more = pager.meta().has_more, "records listed");
    Ok(())
}

async fn search<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: SearchArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let opts = SearchCustomObjectRecordsOptions {
        pagination: CursorPagination::with_size(args.paging.page_size),
        sort: args.sort,
        query: args.query,
        ..Default::default()
    };
    let mut pager = client.search_custom_object_records_pager(&args.key, opts)?;
    let mut pages = 0;
    while let Some(items) = pager.next_page(ctx).await? {
        pages += 1;
        write_lines(out, &items)?;
        if !args.paging.all {
            break;
        }
    }
    info!(
        key = %args.key,
        pages,
        total = pager.count().unwrap_or_default(),
        "search finished"
    );
    Ok(())
}

async fn record<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: RecordArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let record = client
        .show_custom_object_record(ctx, &args.key, &args.id)
        .await?;
    write_lines(out, &[record])
}

async fn delete_record<T: Transport>(
    client: &Zendesk<T>,
    args: RecordArgs,
    ctx: &CancellationToken,
) -> Result<(), CliError> {
    let record = CustomObjectRecord {
        id: args.id,
        custom_object_key: args.key,
        ..Default::default()
    };
    client.delete_custom_object_record(ctx, &record).await?;
    info!(key = %record.custom_object_key, id = %record.id, "record deleted");
    Ok(())
}

async fn fields<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: FieldsArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let fields = client.list_custom_object_fields(ctx, &args.key).await?;
    write_lines(out, &fields)
}

async fn statuses<T: Transport, W: Write>(
    client: &Zendesk<T>,
    args: StatusesArgs,
    ctx: &CancellationToken,
    out: &mut W,
) -> Result<(), CliError> {
    let opts = CustomTicketStatusOptions {
        active: args.active,
        status_categories: args.categories,
        ..Default::default()
    };
    let statuses = client.list_custom_ticket_statuses(ctx, Some(&opts)).await?;
    write_lines(out, &statuses)
}

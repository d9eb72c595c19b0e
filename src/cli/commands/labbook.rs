//! LabBook command - list and create local LabBooks

use crate::cli::{LabBookAction, LabBookArgs, OutputFormat, PageOptions};
use crate::config::Config;
use crate::context::RequestContext;
use crate::error::LabResult;
use crate::labbook::{FsLabBookLoader, LabBookSummary};
use crate::paging::Connection;
use crate::resolve;
use crate::ui::{self, UiContext};
use console::style;
use std::sync::Arc;

/// Execute the labbook command
pub async fn execute(args: LabBookArgs, config: &Config, username: &str) -> LabResult<()> {
    match args.action {
        LabBookAction::List(options) => list(options, config, username).await,
        LabBookAction::Create {
            name,
            description,
            owner,
        } => {
            let owner = owner.as_deref().unwrap_or(username);
            create(config, username, owner, &name, &description).await
        }
    }
}

async fn list(options: PageOptions, config: &Config, username: &str) -> LabResult<()> {
    let connection = resolve::local_labbooks(
        &config.storage.working_dir,
        username,
        &options.order_by,
        &options.sort,
        &options.connection_args(),
    )
    .await?;

    match options.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&connection)?),
        OutputFormat::Plain => {
            for summary in connection.nodes() {
                println!("{}/{}", summary.owner, summary.name);
            }
        }
        OutputFormat::Table => print_table(&connection),
    }

    Ok(())
}

fn print_table(connection: &Connection<LabBookSummary>) {
    let ctx = UiContext::detect();
    if connection.is_empty() {
        ui::step_info(&ctx, "No LabBooks found");
        return;
    }

    ui::intro(&ctx, "LabBooks");
    println!(
        "{:<16} {:<24} {:<17} {:<17} {}",
        style("OWNER").bold(),
        style("NAME").bold(),
        style("CREATED").bold(),
        style("MODIFIED").bold(),
        style("CURSOR").bold()
    );
    println!("{}", "-".repeat(90));

    for edge in &connection.edges {
        let summary = &edge.node;
        println!(
            "{:<16} {:<24} {:<17} {:<17} {}",
            summary.owner,
            summary.name,
            summary.created_on.format("%Y-%m-%d %H:%M"),
            summary.modified_on.format("%Y-%m-%d %H:%M"),
            style(&edge.cursor).dim()
        );
    }

    println!();
    ui::page_footer(&ctx, connection.len(), &connection.page_info);
}

async fn create(
    config: &Config,
    username: &str,
    owner: &str,
    name: &str,
    description: &str,
) -> LabResult<()> {
    let loader = Arc::new(FsLabBookLoader::new(&config.storage.working_dir));
    let request = RequestContext::new(username, Arc::clone(&loader));

    let labbook = resolve::create_labbook(&request, &loader, owner, name, description).await?;

    let ctx = UiContext::detect();
    ui::step_ok_detail(
        &ctx,
        &format!("Created LabBook {}", labbook.node_id()),
        &labbook.root.display().to_string(),
    );
    Ok(())
}

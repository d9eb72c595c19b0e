//! Remote command - list and delete LabBooks on the default remote

use crate::cli::{OutputFormat, PageOptions, RemoteAction, RemoteArgs};
use crate::config::Config;
use crate::error::LabResult;
use crate::paging::Connection;
use crate::remote::{GitLabClient, RemoteLabBook};
use crate::resolve;
use crate::ui::{self, UiContext};
use console::style;
use tracing::debug;

/// Execute the remote command
pub async fn execute(args: RemoteArgs, config: &Config) -> LabResult<()> {
    let (remote_name, remote) = config.default_remote()?;
    debug!("Using remote {} at {}", remote_name, remote.api_url);

    let client = GitLabClient::new(remote, args.token.unwrap_or_default())?;

    match args.action {
        RemoteAction::List(options) => list(&client, options, config).await,
        RemoteAction::Delete {
            owner,
            name,
            confirm,
        } => delete(&client, remote_name, &owner, &name, confirm).await,
    }
}

async fn list(client: &GitLabClient, options: PageOptions, config: &Config) -> LabResult<()> {
    let connection = resolve::remote_labbooks(
        client,
        &options.order_by,
        &options.sort,
        &options.connection_args(),
        config.paging.default_page_size,
    )
    .await?;

    match options.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&connection)?),
        OutputFormat::Plain => {
            for labbook in connection.nodes() {
                println!("{}/{}", labbook.owner, labbook.name);
            }
        }
        OutputFormat::Table => print_table(&connection),
    }

    Ok(())
}

fn print_table(connection: &Connection<RemoteLabBook>) {
    let ctx = UiContext::detect();
    if connection.is_empty() {
        ui::step_info(&ctx, "No remote LabBooks found");
        return;
    }

    ui::intro(&ctx, "Remote LabBooks");
    println!(
        "{:<16} {:<24} {:<26} {}",
        style("OWNER").bold(),
        style("NAME").bold(),
        style("MODIFIED").bold(),
        style("DESCRIPTION").bold()
    );
    println!("{}", "-".repeat(90));

    for labbook in connection.nodes() {
        println!(
            "{:<16} {:<24} {:<26} {}",
            labbook.owner, labbook.name, labbook.modified_on, labbook.description
        );
    }

    println!();
    ui::page_footer(&ctx, connection.len(), &connection.page_info);
}

async fn delete(
    client: &GitLabClient,
    remote_name: &str,
    owner: &str,
    name: &str,
    confirm: bool,
) -> LabResult<()> {
    let ctx = UiContext::detect();
    let deleted = resolve::delete_remote_labbook(client, owner, name, confirm).await?;

    if deleted {
        ui::step_ok(&ctx, &format!("Deleted {}/{} from {}", owner, name, remote_name));
    } else {
        ui::step_warn_hint(
            &ctx,
            &format!("Would delete {}/{} from {}", owner, name, remote_name),
            "Pass --confirm to delete",
        );
    }
    Ok(())
}

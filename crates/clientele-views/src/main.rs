//! `clientele` - terminal front-end for the customer views.

#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::Parser;
use clientele_views::cli::{Cli, Command, CustomerArgs};
use clientele_views::{
    CustomerDetailView, CustomerListView, DetailState, HttpCustomerApi, Notification,
    Severity, ViewConfig,
};
use tracing_subscriber::EnvFilter;

type ListView = CustomerListView<HttpCustomerApi>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = ViewConfig::load().context("loading configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }
    let api = HttpCustomerApi::from_config(&config);

    match cli.command {
        Command::List => {
            let view = mounted(api).await?;
            print_table(&view);
            Ok(())
        }
        Command::Show { id } => show(api, id).await,
        Command::Add(fields) => {
            let mut view = mounted(api).await?;
            view.open_create();
            submit(&mut view, &fields).await
        }
        Command::Edit { id, fields } => {
            let mut view = mounted(api).await?;
            if !view.open_edit(&id) {
                bail!("no customer with id {id}");
            }
            submit(&mut view, &fields).await
        }
        Command::Delete { id, yes } => {
            let mut view = mounted(api).await?;
            delete(&mut view, &id, yes).await
        }
    }
}

/// A list view that fetched its data, or the fetch error.
async fn mounted(api: HttpCustomerApi) -> anyhow::Result<ListView> {
    let mut view = CustomerListView::new(api);
    view.mount().await;
    report(view.notification())?;
    Ok(view)
}

async fn show(api: HttpCustomerApi, id: String) -> anyhow::Result<()> {
    let mut view = CustomerDetailView::new(api, id);
    view.load().await;
    for line in view.render() {
        println!("{line}");
    }
    if matches!(view.state(), DetailState::Failed(_)) {
        bail!("customer could not be loaded");
    }
    Ok(())
}

async fn submit(view: &mut ListView, fields: &CustomerArgs) -> anyhow::Result<()> {
    fields.apply_to(view);
    view.submit().await;
    report(view.notification())
}

async fn delete(view: &mut ListView, id: &str, yes: bool) -> anyhow::Result<()> {
    if !view.request_delete(id) {
        bail!("no customer with id {id}");
    }
    if !yes && !confirm(&format!("Delete customer {id}?"))? {
        view.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }
    view.confirm_delete().await;
    report(view.notification())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Print a success notification; an error one fails the command.
fn report(notification: Option<&Notification>) -> anyhow::Result<()> {
    match notification {
        Some(n) if n.severity == Severity::Error => bail!("{}", n.message),
        Some(n) => {
            println!("{}", n.message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_table(view: &ListView) {
    let rows = view.rows();
    if rows.is_empty() {
        println!("No customers");
        return;
    }
    println!(
        "{:<36}  {:<24}  {:<10}  {:>8}  Interests",
        "Id", "Name", "Born", "Member"
    );
    for row in rows {
        println!(
            "{:<36}  {:<24}  {:<10}  {:>8}  {}",
            row.id, row.name, row.date_of_birth, row.member_number, row.interests
        );
    }
}

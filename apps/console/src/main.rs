use std::{num::NonZeroUsize, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    load_settings,
    pagination::COMPACT_CLIENT_PAGE_SIZE,
    ClientFilter, ClientListController, ConsoleSettings, DataSource, FilterCriteria, ListController,
    ListRecord, NoticeLevel, ReloadOutcome, RestDataSource, RestResource, SearchTerm,
    ServiceFilter, ServiceListController, SortKey,
};
use chrono::{Datelike, NaiveDate};
use shared::{
    domain::{month_name, ClientId, ClientStatus, ServiceCategory, ServiceCode, VisitFrequency},
    protocol::{Client, Service},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "List and manage clients and services of the admin console backend")]
struct Cli {
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Overrides the configured bearer token.
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists clients, newest first.
    Clients(ClientArgs),
    /// Lists services in server order.
    Services(ServiceArgs),
    /// Soft deletes a record and shows the page it lands on.
    Deactivate {
        #[command(subcommand)]
        target: Target,
    },
    /// Restores a soft-deleted record and shows the page it lands on.
    Restore {
        #[command(subcommand)]
        target: Target,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum Target {
    Client { id: i64 },
    Service { code: String },
}

#[derive(Args, Debug)]
struct ClientArgs {
    #[arg(long, value_parser = parse_frequency)]
    frequency: Option<VisitFrequency>,
    #[arg(long, value_parser = parse_status)]
    status: Option<ClientStatus>,
    /// Birthday month, 1-12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    #[arg(long, default_value = "")]
    search: String,
    /// Only `name_asc`/`az` and `name_desc`/`za` reorder clients.
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Uses the compact page size of the dashboard widget.
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct ServiceArgs {
    #[arg(long, value_parser = parse_category)]
    category: Option<ServiceCategory>,
    /// `active` or `inactive`.
    #[arg(long, value_parser = parse_state)]
    state: Option<bool>,
    /// Registration month, 1-12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

fn parse_frequency(raw: &str) -> Result<VisitFrequency, String> {
    VisitFrequency::parse(raw).ok_or_else(|| format!("unknown visit frequency '{raw}' (N, F, O, H)"))
}

fn parse_status(raw: &str) -> Result<ClientStatus, String> {
    ClientStatus::parse(raw).ok_or_else(|| format!("unknown status '{raw}' (A, I)"))
}

fn parse_category(raw: &str) -> Result<ServiceCategory, String> {
    ServiceCategory::parse(raw).ok_or_else(|| format!("unknown category '{raw}'"))
}

fn parse_state(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "active" | "true" => Ok(true),
        "inactive" | "false" => Ok(false),
        other => Err(format!("unknown state '{other}' (active, inactive)")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(token) = cli.token {
        settings.bearer_token = Some(token);
    }
    let base_url = settings.api_base_url()?;
    info!(%base_url, "using console backend");

    match cli.command {
        Command::Clients(args) => {
            let page_size = if args.compact {
                NonZeroUsize::new(COMPACT_CLIENT_PAGE_SIZE).unwrap_or(settings.client_page_size)
            } else {
                settings.client_page_size
            };
            let controller: ClientListController =
                ListController::new(data_source::<Client>(&settings, &base_url)?, page_size);
            let criteria = ClientFilter {
                frequency: args.frequency,
                status: args.status,
                birthday_month: args.month,
                search: SearchTerm::new(&args.search),
            };
            show_list(&controller, criteria, args.sort, args.page, render_client).await?;
        }
        Command::Services(args) => {
            let controller: ServiceListController = ListController::new(
                data_source::<Service>(&settings, &base_url)?,
                settings.service_page_size,
            );
            let criteria = ServiceFilter {
                category: args.category,
                state: args.state,
                registration_month: args.month,
                search: SearchTerm::new(&args.search),
            };
            show_list(&controller, criteria, args.sort, args.page, render_service).await?;
        }
        Command::Deactivate { target } => change_status(&settings, &base_url, target, false).await?,
        Command::Restore { target } => change_status(&settings, &base_url, target, true).await?,
    }

    Ok(())
}

fn data_source<R: RestResource>(
    settings: &ConsoleSettings,
    base_url: &str,
) -> Result<Arc<dyn DataSource<R>>> {
    let source = RestDataSource::<R>::with_timeout(
        base_url,
        settings.bearer_token.clone(),
        settings.request_timeout(),
    )
    .with_context(|| format!("failed to prepare {} data source", R::KIND))?;
    let source: Arc<dyn DataSource<R>> = Arc::new(source);
    Ok(source)
}

async fn show_list<R, F>(
    controller: &ListController<R, F>,
    criteria: F,
    sort: Option<SortKey>,
    page: usize,
    render: fn(&R) -> String,
) -> Result<()>
where
    R: ListRecord,
    F: FilterCriteria<R>,
{
    if let ReloadOutcome::Fallback(err) = controller.load().await {
        eprintln!("warning: {err}");
    }
    {
        let mut state = controller.state().await;
        state.set_criteria(criteria);
        state.set_sort(sort);
        state.go_to_page(page);
    }
    print_page(controller, render).await;
    Ok(())
}

async fn change_status(
    settings: &ConsoleSettings,
    base_url: &str,
    target: Target,
    activate: bool,
) -> Result<()> {
    match target {
        Target::Client { id } => {
            let controller: ClientListController = ListController::new(
                data_source::<Client>(settings, base_url)?,
                settings.client_page_size,
            );
            toggle(&controller, ClientId(id), activate, render_client).await
        }
        Target::Service { code } => {
            let controller: ServiceListController = ListController::new(
                data_source::<Service>(settings, base_url)?,
                settings.service_page_size,
            );
            toggle(&controller, ServiceCode::new(code), activate, render_service).await
        }
    }
}

async fn toggle<R, F>(
    controller: &ListController<R, F>,
    id: R::Id,
    activate: bool,
    render: fn(&R) -> String,
) -> Result<()>
where
    R: ListRecord,
    F: FilterCriteria<R>,
{
    if let ReloadOutcome::Fallback(err) = controller.load().await {
        bail!("cannot change {} status while the backend is unreachable: {err}", R::KIND);
    }

    let current = controller.state().await.find(&id).map(ListRecord::is_active);
    match current {
        None => bail!("{} {id} not found", R::KIND),
        Some(active) if active == activate => {
            let state = if active { "active" } else { "inactive" };
            bail!("{} {id} is already {state}", R::KIND);
        }
        Some(_) => {}
    }

    let outcome = controller.toggle_status(&id).await;
    print_notices(controller).await;
    let outcome = outcome?;
    println!("{} {id} now on page {}", R::KIND, outcome.page);
    print_page(controller, render).await;
    Ok(())
}

async fn print_page<R, F>(controller: &ListController<R, F>, render: fn(&R) -> String)
where
    R: ListRecord,
    F: FilterCriteria<R>,
{
    let snapshot = controller.snapshot().await;
    for record in &snapshot.items {
        let marker = if record.record_id().is_some() && record.record_id() == snapshot.highlighted {
            '*'
        } else {
            ' '
        };
        println!("{marker} {}", render(record));
    }
    println!(
        "page {}/{} ({} matching)",
        snapshot.page, snapshot.total_pages, snapshot.filtered_len
    );
    print_notices(controller).await;
}

async fn print_notices<R, F>(controller: &ListController<R, F>)
where
    R: ListRecord,
    F: FilterCriteria<R>,
{
    for notice in controller.take_notices().await {
        match notice.level {
            NoticeLevel::Error | NoticeLevel::Warning => eprintln!("error: {}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => eprintln!("{}", notice.message),
        }
    }
}

fn birthday_label(birthday: NaiveDate) -> String {
    match month_name(birthday.month()) {
        Some(month) => format!("{} {month}", birthday.day()),
        None => birthday.to_string(),
    }
}

fn render_client(client: &Client) -> String {
    let id = client
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = client.status.map_or("-", |status| {
        if status.is_active() {
            "active"
        } else {
            "inactive"
        }
    });
    format!(
        "{id:>5}  {} {:<20}  {} {:<12}  {:<13}  {:<9}  {:<32}  {:<16}  {status}",
        client.name_client,
        client.lastname,
        client.type_document,
        client.number_document,
        birthday_label(client.birthday),
        client.cellphone,
        client.email,
        client.visit_frequency.label(),
    )
}

fn render_service(service: &Service) -> String {
    let code = service.code.as_ref().map_or("-", ServiceCode::as_str);
    let category = service.category.map_or("-", ServiceCategory::code);
    let state = if service.is_active() { "active" } else { "inactive" };
    format!(
        "{code:<8}  {category:<3}  {:<32}  {:>7.2}  {}  {state}",
        service.name_service, service.price, service.registration_date,
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

//! hris - command-line front end for the HR API

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use hris_client::master::MasterData;
use hris_client::resource::{
    Attendance, Documents, Inventory, Kasbons, Leaves, Meetings, Overtimes, Reimbursements,
    Resource, Tasks, Visits,
};
use hris_client::session::{self, FileSessionStore, Session};
use hris_client::{ClientConfig, HttpClient, ListView, NetworkHttpClient, logger};
use shared::amounts::{derive_amounts, parse_used};
use shared::cascade::{CascadeState, DependentKind};
use shared::listing::{ListFilter, Listable};
use shared::models::Transaction;
use shared::routes;
use shared::types::RecordId;

#[derive(Parser)]
#[command(name = "hris", version, about = "HR system command-line client")]
struct Cli {
    /// REST base URL
    #[arg(long, env = "HRIS_API_URL")]
    api_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, env = "HRIS_SESSION_DIR")]
    session_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HRIS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and delete the stored session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// List records visible to the signed-in role
    List {
        resource: ResourceName,
        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete one record
    Delete { resource: ResourceName, id: String },
    /// Show the selectable master-data options
    Options {
        kind: OptionKind,
        /// Company to resolve against (superadmin only)
        #[arg(long)]
        company: Option<String>,
    },
    /// Compute total / sisa for a category amount and amount used
    Amounts {
        #[arg(long)]
        jumlah: Decimal,
        #[arg(long, default_value = "")]
        terpakai: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceName {
    Leave,
    Overtime,
    Reimbursement,
    Kasbon,
    Attendance,
    Visit,
    Meeting,
    Task,
    Document,
    Inventory,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OptionKind {
    Company,
    Division,
    Location,
    Shift,
    Category,
    Employee,
}

/// Run `$f::<R>(args..)` for the resource named by `$name`
macro_rules! dispatch {
    ($name:expr, $f:ident($($arg:expr),*)) => {
        match $name {
            ResourceName::Leave => $f::<Leaves>($($arg),*).await,
            ResourceName::Overtime => $f::<Overtimes>($($arg),*).await,
            ResourceName::Reimbursement => $f::<Reimbursements>($($arg),*).await,
            ResourceName::Kasbon => $f::<Kasbons>($($arg),*).await,
            ResourceName::Attendance => $f::<Attendance>($($arg),*).await,
            ResourceName::Visit => $f::<Visits>($($arg),*).await,
            ResourceName::Meeting => $f::<Meetings>($($arg),*).await,
            ResourceName::Task => $f::<Tasks>($($arg),*).await,
            ResourceName::Document => $f::<Documents>($($arg),*).await,
            ResourceName::Inventory => $f::<Inventory>($($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads env fallbacks
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(dir) = cli.session_dir {
        config = config.with_session_dir(dir);
    }

    logger::init_logger(&config.log_level, cli.json_logs, config.log_dir.as_deref())?;

    let store = FileSessionStore::new(&config.session_dir);
    let mut http = config.build_http_client()?;

    match cli.command {
        Command::Login { email, password } => {
            let session = session::login(&mut http, &store, &email, &password).await?;
            println!(
                "Signed in as {} ({})",
                session.identity.name, session.identity.role
            );
        }
        Command::Logout => {
            if let Ok(session) = session::restore(&store) {
                http.set_token(Some(session.token.clone()));
            }
            session::logout(&mut http, &store).await?;
            println!("Signed out");
        }
        Command::Whoami => {
            let session = session::restore(&store)?;
            let identity = &session.identity;
            println!("id:      {}", identity.id);
            println!("name:    {}", identity.name);
            println!("role:    {}", identity.role);
            if let Some(company) = &identity.company_id {
                println!("company: {company}");
            }
            println!("home:    {}", routes::home_path(identity.role));
        }
        Command::List {
            resource,
            from,
            to,
            search,
        } => {
            let session = authenticate(&mut http, &store)?;
            let filter = ListFilter {
                from,
                to,
                query: search.unwrap_or_default(),
            };
            dispatch!(resource, list_records(&http, &session, filter))?;
        }
        Command::Delete { resource, id } => {
            let session = authenticate(&mut http, &store)?;
            dispatch!(resource, delete_record(&http, &session, RecordId::new(id)))?;
        }
        Command::Options { kind, company } => {
            let session = authenticate(&mut http, &store)?;
            show_options(&http, &session, kind, company.map(RecordId::new)).await;
        }
        Command::Amounts { jumlah, terpakai } => {
            let derived = derive_amounts(jumlah, parse_used(&terpakai));
            println!("jumlah:   {jumlah}");
            println!("terpakai: {}", parse_used(&terpakai));
            println!("total:    {}", derived.total);
            println!("sisa:     {}", derived.sisa);
        }
    }

    Ok(())
}

fn authenticate(
    http: &mut NetworkHttpClient,
    store: &FileSessionStore,
) -> anyhow::Result<Arc<Session>> {
    let session = session::restore(store)?;
    http.set_token(Some(session.token.clone()));
    Ok(session)
}

async fn list_records<R: Resource>(
    http: &NetworkHttpClient,
    session: &Session,
    filter: ListFilter,
) -> anyhow::Result<()>
where
    R::Record: Transaction,
{
    let identity = &session.identity;
    let mut view = ListView::<R>::new(identity.scope_query());
    let fetched = view.refresh(http).await?;
    view.set_filter(filter);

    let rows = view.rows();
    for row in &rows {
        let date = row
            .list_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        let actions = identity.actions_for(*row);
        println!(
            "{}\t{}\t{:?}\t{}\t{:?}",
            row.id(),
            date,
            row.stage(),
            row.search_text().join(" | "),
            actions
        );
    }
    println!("{} of {} {} record(s)", rows.len(), fetched, R::NAME);
    Ok(())
}

async fn delete_record<R: Resource>(
    http: &NetworkHttpClient,
    session: &Session,
    id: RecordId,
) -> anyhow::Result<()>
where
    R::Record: Transaction,
{
    let mut view = ListView::<R>::new(session.identity.scope_query());
    view.refresh(http).await?;
    view.ask_delete(&id)?;
    let alert = view.confirm_delete(http).await;
    println!("{alert}");
    if !alert.is_success() {
        anyhow::bail!("delete of {} {id} failed", R::NAME);
    }
    Ok(())
}

async fn show_options(
    http: &NetworkHttpClient,
    session: &Session,
    kind: OptionKind,
    company: Option<RecordId>,
) {
    let identity = &session.identity;
    let master = MasterData::load(http, identity).await;
    let mut cascade = CascadeState::for_identity(identity);
    if company.is_some() && !cascade.select_company(company) {
        tracing::info!("company selection ignored for this role");
    }

    let options = match kind {
        OptionKind::Company => master.company_options(&cascade),
        OptionKind::Division => master.options(&cascade, DependentKind::Division),
        OptionKind::Location => master.options(&cascade, DependentKind::Location),
        OptionKind::Shift => master.options(&cascade, DependentKind::Shift),
        OptionKind::Category => master.options(&cascade, DependentKind::Category),
        OptionKind::Employee => master.options(&cascade, DependentKind::Employee),
    };
    if options.is_empty() {
        println!("(no options)");
    }
    for option in options {
        println!("{}\t{}", option.id, option.label);
    }
}

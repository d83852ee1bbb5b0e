//! Drive the Rise demo store from the command line.
//!
//! State is restored from the configured snapshot file before each command
//! and written back after every mutation, so successive invocations behave
//! like one long client session.

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use rise_data::model::{ProjectStatus, PropertyType, User};
use rise_store::config::StoreSettings;
use rise_store::domain::queries::{
    BrowseFilter, SortKey, admin_dashboard, funding_progress, notifications_for,
    platform_analytics, portfolio, quote, unread_count,
};
use rise_store::domain::{AppState, Store};
use rise_store::outbound::{SimulatedGateway, SnapshotFile};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `rise-demo` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "rise-demo",
    about = "Explore and mutate the Rise demo platform state",
    version
)]
struct CliArgs {
    /// Log in as this user before running the command.
    #[arg(long = "user", value_name = "id", global = true)]
    user: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate demo data unless projects already exist.
    Initialize,
    /// Show platform totals and the current session.
    Summary,
    /// List projects matching the given filters.
    Browse(BrowseArgs),
    /// Show the session user's positions and returns.
    Portfolio,
    /// Invest in a project as the session user.
    Invest {
        /// Project identifier.
        #[arg(long = "project", value_name = "id")]
        project: String,
        /// Amount in whole pesos.
        #[arg(long = "amount", value_name = "pesos")]
        amount: u64,
    },
    /// Mark a project as funded.
    Approve {
        /// Project identifier.
        #[arg(long = "project", value_name = "id")]
        project: String,
    },
    /// Move a project to its next lifecycle status.
    Advance {
        /// Project identifier.
        #[arg(long = "project", value_name = "id")]
        project: String,
    },
    /// List the session user's notifications, newest first.
    Notifications,
    /// Mark a notification as read.
    Read {
        /// Notification identifier.
        #[arg(long = "notification", value_name = "id")]
        notification: String,
    },
}

#[derive(Debug, clap::Args)]
struct BrowseArgs {
    /// Case-insensitive text matched against title, description, city and developer.
    #[arg(long = "search", value_name = "text")]
    search: Option<String>,
    /// Property type to include; repeatable.
    #[arg(long = "type", value_name = "type")]
    property_types: Vec<PropertyType>,
    /// Project status to include; repeatable.
    #[arg(long = "status", value_name = "status")]
    statuses: Vec<ProjectStatus>,
    /// City to include; repeatable.
    #[arg(long = "city", value_name = "city")]
    cities: Vec<String>,
    /// Lowest minimum investment to include.
    #[arg(long = "min-investment", value_name = "pesos")]
    min_investment: Option<u64>,
    /// Highest minimum investment to include.
    #[arg(long = "max-investment", value_name = "pesos")]
    max_investment: Option<u64>,
    /// Lowest projected ROI to include, in percent.
    #[arg(long = "min-roi", value_name = "percent")]
    min_roi: Option<f64>,
    /// Sort order.
    #[arg(long = "sort", value_name = "key", default_value_t = SortKey::Newest)]
    sort: SortKey,
}

impl From<BrowseArgs> for BrowseFilter {
    fn from(args: BrowseArgs) -> Self {
        Self {
            search: args.search,
            property_types: args.property_types,
            statuses: args.statuses,
            cities: args.cities,
            min_investment: args.min_investment,
            max_investment: args.max_investment,
            min_roi: args.min_roi,
            sort: args.sort,
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = StoreSettings::load_from_iter([OsString::from("rise-demo")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let mut store = open_store(&settings)?;
    let mut out = io::stdout().lock();
    run(&mut store, args.user.as_deref(), args.command, &mut out).await
}

/// Runs one command. For `initialize` the `--user` login happens after the
/// data is generated.
async fn run(
    store: &mut Store,
    user_id: Option<&str>,
    command: Command,
    out: &mut impl Write,
) -> io::Result<()> {
    if !matches!(command, Command::Initialize) {
        log_in(store, user_id)?;
    }

    match command {
        Command::Initialize => {
            let generated = store.initialize_data().map_err(store_error("initialise"))?;
            log_in(store, user_id)?;
            let verb = if generated { "generated" } else { "kept existing" };
            writeln!(
                out,
                "{verb} demo data: {} users, {} projects",
                store.state().users.len(),
                store.state().projects.len()
            )?;
        }
        Command::Summary => write_summary(out, store.state())?,
        Command::Browse(browse) => {
            let filter = BrowseFilter::from(browse);
            for project in filter.apply(&store.state().projects) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{:.1}% funded\troi {}%",
                    project.id,
                    project.status,
                    project.location.city,
                    project.title,
                    funding_progress(project),
                    project.financial.projected_roi
                )?;
            }
        }
        Command::Portfolio => {
            let user = session_user(store.state())?;
            write_portfolio(out, store.state(), user)?;
        }
        Command::Invest { project, amount } => {
            let listed = store
                .state()
                .project(&project)
                .ok_or_else(|| io::Error::other(format!("unknown project: {project}")))?;
            let quoted = quote(listed, amount).map_err(io::Error::other)?;
            if quoted.exceeds_remaining {
                warn!(project_id = %project, amount, "amount exceeds remaining capacity");
            }
            let outcome = store
                .invest_in_project(&project, amount)
                .await
                .map_err(store_error("invest"))?;
            writeln!(
                out,
                "invested {amount} in {project}: {:.4}% ownership, {} projected yearly, ref {}",
                quoted.ownership_percent,
                quoted.projected_annual_return,
                outcome.receipt.reference
            )?;
        }
        Command::Approve { project } => {
            let report = store
                .approve_project(&project)
                .map_err(store_error("approve"))?;
            writeln!(
                out,
                "{project}: {} -> funded{}",
                report.previous,
                if report.lifecycle_valid {
                    ""
                } else {
                    " (outside the usual lifecycle)"
                }
            )?;
        }
        Command::Advance { project } => {
            let status = store
                .advance_project_status(&project)
                .map_err(store_error("advance"))?;
            writeln!(out, "{project}: now {status}")?;
        }
        Command::Notifications => {
            let user = session_user(store.state())?;
            for notification in notifications_for(store.state(), &user.id) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    notification.id,
                    if notification.read { "read" } else { "unread" },
                    notification.timestamp.to_rfc3339(),
                    notification.title
                )?;
            }
        }
        Command::Read { notification } => {
            store
                .mark_notification_as_read(&notification)
                .map_err(store_error("mark notification read"))?;
            writeln!(out, "{notification}: read")?;
        }
    }
    Ok(())
}

fn log_in(store: &mut Store, user_id: Option<&str>) -> io::Result<()> {
    let Some(id) = user_id else {
        return Ok(());
    };
    let user = store
        .state()
        .user(id)
        .cloned()
        .ok_or_else(|| io::Error::other(format!("unknown user: {id}")))?;
    store.login(user).map_err(store_error("log in"))
}

fn open_store(settings: &StoreSettings) -> io::Result<Store> {
    let seed = settings
        .seed_definition()
        .map_err(|error| io::Error::other(format!("resolve seed: {error}")))?;
    let gateway = SimulatedGateway::new(settings.gateway_latency());
    let snapshots = SnapshotFile::new(settings.snapshot_path());
    Store::new(Arc::new(gateway), Arc::new(DefaultClock), seed)
        .with_gateway_timeout(settings.gateway_timeout())
        .with_snapshots(Arc::new(snapshots))
        .map_err(store_error("restore snapshot"))
}

fn store_error(action: &'static str) -> impl Fn(rise_store::domain::StoreError) -> io::Error {
    move |error| io::Error::other(format!("{action}: {error}"))
}

fn session_user(state: &AppState) -> io::Result<&User> {
    state
        .current_user
        .as_ref()
        .ok_or_else(|| io::Error::other("no session: pass --user <id>"))
}

fn write_summary(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    let analytics = platform_analytics(state);
    let admin = admin_dashboard(state);
    writeln!(
        out,
        "users: {} ({} investors, {} developers, {} pending KYC)",
        analytics.total_users, analytics.investors, analytics.developers, admin.pending_verifications
    )?;
    writeln!(
        out,
        "projects: {} ({} active, {} completed)",
        analytics.total_projects, admin.active_projects, admin.completed_projects
    )?;
    writeln!(
        out,
        "raised: {} of {} ({:.1}%), average investment {}",
        analytics.total_raised,
        analytics.total_value,
        analytics.funding_percent,
        analytics.average_investment
    )?;
    let session = state.current_user.as_ref().map_or_else(
        || "none".to_owned(),
        |user| {
            format!(
                "{} as {} ({} unread notifications)",
                user.name,
                state.current_role,
                unread_count(state, &user.id)
            )
        },
    );
    writeln!(out, "session: {session}")
}

fn write_portfolio(out: &mut impl Write, state: &AppState, user: &User) -> io::Result<()> {
    let view = portfolio(state, user);
    for position in &view.positions {
        writeln!(
            out,
            "{}\t{}\tinvested {}\tvalue {}\t{:+.2}%",
            position.investment.id,
            position.project.title,
            position.investment.amount,
            position.current_value,
            position.profit_percent
        )?;
    }
    writeln!(
        out,
        "total invested {}, returns {} ({:+.2}%)",
        view.total_invested, view.total_returns, view.change_percent
    )
}

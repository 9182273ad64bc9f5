//! Society Directory - Main entry point
//!
//! Command line front end for browsing and adding service contacts, the
//! society intercom list and the bus timetable.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use society_directory::client::{AsyncContactClient, AsyncSupabaseClient};
use society_directory::platform::{probe, JsonFileContactSource};
use society_directory::repositories::{ContactStore, SupabaseContactStore};
use society_directory::{
    society_contacts, CallLinks, Category, Config, ContactDraft, ContactSource, DirectoryService,
    ImportOutcome, Metrics, SideEffect, SubmissionOrchestrator, SubmissionSettings, SubmitOutcome,
    SupabaseClient, Timetable,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "society-directory", version, about = "Society service directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the route 48 bus timetable
    Timetable,
    /// List contacts in a category
    List { category: Category },
    /// Add a service contact
    Add(AddArgs),
    /// Print society intercom numbers
    Society,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long)]
    category: Category,

    #[arg(long)]
    doctor_type: Option<String>,

    #[arg(long)]
    maid_type: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// JSON file holding a picked contact; fills name and phone
    #[arg(long)]
    import: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr, listings to stdout
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Timetable => print_timetable(),
        Command::Society => {
            print_society();
            Ok(())
        }
        Command::List { category } => list_contacts(category).await,
        Command::Add(args) => add_contact(args).await,
    }
}

fn load_config() -> Result<Config> {
    match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            Ok(cfg)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Wire the HTTP client up as a contact store.
fn open_store(config: &Config) -> (Arc<dyn ContactStore>, Metrics) {
    info!("Using contacts table {} at {}", config.contacts_table, config.supabase_url);

    let sync_client = SupabaseClient::new(config);
    let metrics = sync_client.metrics().clone();
    let client = Arc::new(AsyncSupabaseClient::new(sync_client)) as Arc<dyn AsyncContactClient>;
    let store = Arc::new(SupabaseContactStore::new(client)) as Arc<dyn ContactStore>;

    (store, metrics)
}

fn print_timetable() -> Result<()> {
    let timetable = Timetable::route_48();

    println!("Route No. {}", timetable.route_number);
    println!("Effective from: {}", timetable.effective_date);

    for direction in &timetable.directions {
        let buckets = direction.bucketize()?;

        println!();
        println!("{}", direction.title());
        println!("Total {} trips", direction.total_trips());

        for (period, entries) in buckets.non_empty() {
            let noun = if entries.len() == 1 { "trip" } else { "trips" };
            println!("  {} - {} {}", period.label(), entries.len(), noun);
            let times: Vec<&str> = entries.iter().map(|e| e.display_time.as_str()).collect();
            println!("    {}", times.join(", "));
        }

        println!("  Quick reference: {}", direction.quick_reference()?.join(" | "));
    }

    Ok(())
}

fn print_society() {
    for contact in society_contacts() {
        println!(
            "{:<20} {:>6}  {}  ({})",
            contact.name,
            contact.extension,
            contact.description,
            contact.tel_link()
        );
    }
}

async fn list_contacts(category: Category) -> Result<()> {
    let config = load_config()?;
    let (store, metrics) = open_store(&config);
    let directory = DirectoryService::new(store, config.category_cache_ttl_secs);

    let contacts = directory.contacts_in_category(category).await?;

    println!("{}", category.label());
    if contacts.is_empty() {
        println!("  No contacts found for this category.");
    }
    for contact in &contacts {
        let links = CallLinks::for_contact(contact);
        println!("  {}", contact.name);
        if let Some(description) = contact.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", description);
        }
        println!("    {}  {}", links.tel, links.whatsapp);
    }

    debug!("{:?}", metrics.summary());
    Ok(())
}

async fn add_contact(args: AddArgs) -> Result<()> {
    let config = load_config()?;
    let (store, metrics) = open_store(&config);
    let directory = DirectoryService::new(store.clone(), config.category_cache_ttl_secs);

    let source = args.import.as_ref().map(JsonFileContactSource::new);
    let capability = probe(source.as_ref().map(|s| s as &dyn ContactSource));
    if source.is_some() && !capability.is_available() {
        warn!("Contact file not found, skipping import");
    }

    let orchestrator =
        SubmissionOrchestrator::new(store, SubmissionSettings::from_config(&config, capability))
            .with_metrics(metrics.clone())
            .with_directory(directory);

    orchestrator.set_draft(ContactDraft {
        name: args.name,
        phone: args.phone,
        category: args.category,
        doctor_type: args.doctor_type,
        maid_type: args.maid_type,
        description: args.description,
    });

    if let Some(source) = source.as_ref().filter(|_| orchestrator.can_import()) {
        match orchestrator.import_from(source).await {
            ImportOutcome::Imported(contact) => {
                info!("Imported contact with phone {}", contact.phone);
            }
            ImportOutcome::Cancelled => info!("No contact picked, keeping form values"),
            ImportOutcome::Failed(err) => return Err(err.into()),
            ImportOutcome::Ignored => {}
        }
    }

    let outcome = orchestrator.submit().await;
    debug!("Submission went through {:?}", orchestrator.transitions());
    debug!("{:?}", metrics.summary());

    match outcome {
        SubmitOutcome::Succeeded { record, effect } => {
            if let Some(notification) = orchestrator.notification() {
                println!("{}", notification.message);
            }
            println!("  {} ({}) {}", record.name(), record.category().label(), record.phone());
            let SideEffect::NavigateHome { after } = effect;
            debug!("Form would close after {:?}", after);
            Ok(())
        }
        SubmitOutcome::Failed(err) => Err(err.into()),
        SubmitOutcome::Ignored => Ok(()),
    }
}

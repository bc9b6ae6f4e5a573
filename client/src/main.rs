#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use parliascope_client::{
    alerts,
    api::{ApiError, HttpParliaScopeClient, ParliaScopeApi},
    bills::analyze_and_refresh,
    chat::ChatSession,
    config::{Config, DEFAULT_CONFIG_FILE},
    representatives::submit_review,
    search::search_with_history,
    session::{AuthSession, SessionError},
    token::{FileTokenStore, TokenStore},
    types::{
        filter_by_query, Bill, ChatMessage, ChatRole, Document, ProfileUpdate, Representative,
        SignupRequest, Subscription, User,
    },
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parliascope")]
#[command(author, version, about = "Browse Hansard, bills and representatives from the terminal", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        id_number: Option<String>,
        #[arg(long)]
        county: i64,
        #[arg(long)]
        constituency: i64,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update profile fields
    Profile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        id_number: Option<String>,
        #[arg(long)]
        county: Option<i64>,
        #[arg(long)]
        constituency: Option<i64>,
        #[arg(long)]
        whatsapp: Option<String>,
    },
    /// List counties
    Counties,
    /// List constituencies in a county
    Constituencies {
        #[arg(long)]
        county: i64,
    },
    /// Resolve coordinates to a county and constituency
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// List representatives
    Reps {
        /// Only names or constituencies containing this text
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        county: Option<i64>,
        #[arg(long)]
        constituency: Option<i64>,
    },
    /// Show one representative with reviews
    Rep { id: i64 },
    /// Review a representative
    Review {
        id: i64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Search Hansard transcripts
    Search {
        query: String,
        #[arg(long)]
        speaker: Option<i64>,
    },
    /// Recent searches
    History,
    /// List Hansard documents
    Docs {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Ask the Hansard assistant; interactive when no question is given
    Chat { question: Option<String> },
    /// List bills with their impact cards
    Bills {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one bill
    Bill { id: i64 },
    /// Start an impact analysis and refresh once it has had time to run
    Analyze {
        id: i64,
        #[arg(long)]
        text: String,
    },
    /// Manage alert topics
    Alerts {
        #[command(subcommand)]
        action: AlertAction,
    },
    /// Today's audio brief
    Brief {
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Ask the backend to ingest the latest Hansard PDFs
    Crawl {
        #[arg(long, default_value_t = 6)]
        limit: u32,
        /// Skip AI parsing of the PDFs
        #[arg(long)]
        no_ai: bool,
    },
}

#[derive(Subcommand, Debug)]
enum AlertAction {
    List,
    Add { topic: String },
    Remove { id: i64 },
}

type Session = AuthSession<HttpParliaScopeClient, FileTokenStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from(&cli.config)
        .map_err(|e| anyhow::anyhow!("loading {}: {e}", cli.config))?;

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "parliascope starting"
    );

    let api = HttpParliaScopeClient::new(&config.api.base_url);
    let store = FileTokenStore::new(config.storage.token_path.clone());
    let mut session = AuthSession::new(api, store);

    run(cli.command, &config, &mut session).await
}

#[allow(clippy::too_many_lines)]
async fn run(command: Command, config: &Config, session: &mut Session) -> anyhow::Result<()> {
    match command {
        Command::Signup {
            email,
            password,
            full_name,
            id_number,
            county,
            constituency,
            lat,
            lng,
        } => {
            let request = SignupRequest {
                email,
                password,
                full_name,
                id_number,
                county_id: county,
                constituency_id: constituency,
                latitude: lat,
                longitude: lng,
            };
            let user = session.signup(&request).await.map_err(session_error)?;
            println!("Welcome to ParliaScope, {}.", user.display_name());
        }
        Command::Login { email, password } => {
            let user = session.login(&email, &password).await.map_err(session_error)?;
            println!("Signed in as {}.", user.display_name());
        }
        Command::Logout => {
            session.logout().await.map_err(session_error)?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let user = signed_in(session).await?.clone();
            print_user(&user);
        }
        Command::Profile {
            full_name,
            id_number,
            county,
            constituency,
            whatsapp,
        } => {
            signed_in(session).await?;
            let update = ProfileUpdate {
                full_name,
                id_number,
                county_id: county,
                constituency_id: constituency,
                whatsapp_number: whatsapp,
                push_token: None,
            };
            if update.is_empty() {
                println!("Nothing to update.");
            } else {
                let user = session.update_profile(&update).await.map_err(session_error)?;
                println!("Profile updated.");
                print_user(user);
            }
        }
        Command::Counties => {
            for county in session.api().counties().await.map_err(api_error)? {
                println!("{:>4}  {}", county.id, county.name);
            }
        }
        Command::Constituencies { county } => {
            let items = session.api().constituencies(county).await.map_err(api_error)?;
            for item in items {
                println!("{:>4}  {}", item.id, item.name);
            }
        }
        Command::Locate { lat, lng } => {
            let place = session.api().reverse_geocode(lat, lng).await.map_err(api_error)?;
            if place.is_resolved() {
                let names: Vec<String> = [&place.constituency, &place.county]
                    .into_iter()
                    .flatten()
                    .map(|item| format!("{} ({})", item.name, item.id))
                    .collect();
                println!("{}", names.join(", "));
            } else {
                println!(
                    "Location not resolved{}",
                    place
                        .detail
                        .or(place.error)
                        .map(|why| format!(": {why}"))
                        .unwrap_or_default()
                );
            }
        }
        Command::Reps {
            filter,
            county,
            constituency,
        } => {
            let reps = session
                .api()
                .list_representatives(county, constituency)
                .await
                .map_err(api_error)?;
            for rep in filter_by_query(&reps, filter.as_deref().unwrap_or_default()) {
                print_rep_line(rep);
            }
        }
        Command::Rep { id } => {
            let rep = session.api().get_representative(id).await.map_err(api_error)?;
            print_rep(&rep);
        }
        Command::Review {
            id,
            rating,
            comment,
        } => {
            let token = signed_in_token(session).await?;
            let rep = submit_review(session.api(), &token, id, rating, &comment)
                .await
                .map_err(api_error)?;
            println!("Review posted.");
            print_rep(&rep);
        }
        Command::Search { query, speaker } => {
            match search_with_history(session.api(), &query, speaker)
                .await
                .map_err(api_error)?
            {
                Some(outcome) => {
                    if outcome.results.is_empty() {
                        println!("No matching speeches.");
                    }
                    for hit in &outcome.results {
                        println!(
                            "[{}] {} ({})\n    {}",
                            hit.id,
                            hit.speaker_name,
                            hit.created_at.format("%Y-%m-%d"),
                            hit.content
                        );
                    }
                }
                None => println!("Enter a search query."),
            }
        }
        Command::History => {
            for item in session.api().search_history().await.map_err(api_error)? {
                println!("{}", item.query);
            }
        }
        Command::Docs { filter } => {
            let docs = session.api().list_documents().await.map_err(api_error)?;
            for doc in filter_by_query(&docs, filter.as_deref().unwrap_or_default()) {
                print_document(doc);
            }
        }
        Command::Chat { question } => run_chat(session.api(), question).await?,
        Command::Bills { filter } => {
            let token = stored_token(session).await?;
            let bills = session
                .api()
                .list_bills(token.as_deref())
                .await
                .map_err(api_error)?;
            if bills.is_empty() {
                println!("No bills tracked yet.");
            }
            for bill in filter_by_query(&bills, filter.as_deref().unwrap_or_default()) {
                print_bill(bill);
            }
        }
        Command::Bill { id } => {
            let bill = session.api().get_bill(id).await.map_err(api_error)?;
            print_bill(&bill);
        }
        Command::Analyze { id, text } => {
            let token = stored_token(session).await?;
            let delay = config.bills.refresh_delay();
            println!("Requesting analysis; bills refresh in {}s.", delay.as_secs());
            let bills = analyze_and_refresh(session.api(), token.as_deref(), id, &text, delay)
                .await
                .map_err(api_error)?;
            match bills.iter().find(|bill| bill.id == id) {
                Some(bill) if bill.is_analyzed() => print_bill(bill),
                Some(_) => println!("Impacts are not ready yet; check again with `parliascope bill {id}`."),
                None => println!("Bill {id} is no longer listed."),
            }
        }
        Command::Alerts { action } => {
            let token = signed_in_token(session).await?;
            let subs = match action {
                AlertAction::List => session
                    .api()
                    .list_subscriptions(&token)
                    .await
                    .map_err(api_error)?,
                AlertAction::Add { topic } => {
                    match alerts::add_topic(session.api(), &token, &topic)
                        .await
                        .map_err(api_error)?
                    {
                        Some(subs) => subs,
                        None => {
                            println!("Enter a topic.");
                            return Ok(());
                        }
                    }
                }
                AlertAction::Remove { id } => alerts::remove_subscription(session.api(), &token, id)
                    .await
                    .map_err(api_error)?,
            };
            print_topics(&subs);
        }
        Command::Brief { lang } => {
            let brief = session.api().daily_brief(&lang).await.map_err(api_error)?;
            println!("{}\n{}\n\n{}", brief.title, brief.audio_url, brief.transcript);
        }
        Command::Crawl { limit, no_ai } => {
            let report = session.api().crawl(limit, !no_ai).await.map_err(api_error)?;
            println!("{}: {} new document(s) ingested", report.status, report.ingested_now);
        }
    }

    Ok(())
}

async fn run_chat<A: ParliaScopeApi>(api: &A, question: Option<String>) -> anyhow::Result<()> {
    let mut chat = ChatSession::new();

    if let Some(question) = question {
        if let Some(reply) = chat.send(api, &question).await {
            print_chat_message(reply);
        }
        return Ok(());
    }

    println!("Ask about parliamentary proceedings. Empty line or Ctrl-D to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading question")? {
        if line.trim().is_empty() {
            break;
        }
        if let Some(reply) = chat.send(api, &line).await {
            print_chat_message(reply);
        }
    }
    Ok(())
}

/// Restore the session or fail with a sign-in hint.
async fn signed_in(session: &mut Session) -> anyhow::Result<&User> {
    session.restore().await.map_err(session_error)?;
    session
        .user()
        .ok_or_else(|| session_error(SessionError::NotAuthenticated))
}

async fn signed_in_token(session: &mut Session) -> anyhow::Result<String> {
    signed_in(session).await?;
    Ok(session.require_token().map_err(session_error)?.to_string())
}

/// The stored token, unverified; endpoints that merely accept auth get it
/// when present.
async fn stored_token(session: &Session) -> anyhow::Result<Option<String>> {
    session.store().load().await.map_err(anyhow::Error::from)
}

fn api_error(err: ApiError) -> anyhow::Error {
    tracing::debug!(error = %err, "request failed");
    anyhow::anyhow!(err.user_message())
}

fn session_error(err: SessionError) -> anyhow::Error {
    tracing::debug!(error = %err, "session operation failed");
    anyhow::anyhow!(err.user_message())
}

fn print_user(user: &User) {
    println!("{}", user.display_name());
    if let Some(email) = &user.email {
        println!("  email:        {email}");
    }
    if let Some(id_number) = &user.id_number {
        println!("  id number:    {id_number}");
    }
    if let Some(county) = &user.county_name {
        println!("  county:       {county}");
    }
    if let Some(constituency) = &user.constituency_name {
        println!("  constituency: {constituency}");
    }
    if let Some(whatsapp) = &user.whatsapp_number {
        println!("  whatsapp:     {whatsapp}");
    }
}

fn print_rep_line(rep: &Representative) {
    println!(
        "{:>4}  {:<32} {:<10} {:<24} {:.1}★",
        rep.id,
        rep.name,
        rep.party.as_deref().unwrap_or("-"),
        rep.constituency_name.as_deref().unwrap_or("-"),
        rep.average_rating
    );
}

fn print_rep(rep: &Representative) {
    println!("{} ({})", rep.name, rep.party.as_deref().unwrap_or("independent"));
    if let Some(role) = &rep.role {
        println!("  {role}");
    }
    if let Some(constituency) = &rep.constituency_name {
        println!("  {constituency}, {}", rep.county_name.as_deref().unwrap_or("-"));
    }
    println!(
        "  sittings {} | votes {} | bills sponsored {} | rating {:.1}",
        rep.sittings_attended, rep.votes_cast, rep.bills_sponsored, rep.average_rating
    );
    for (label, text) in [
        ("Bio", &rep.bio),
        ("Education", &rep.education),
        ("Experience", &rep.experience),
    ] {
        if let Some(text) = text {
            println!("  {label}: {text}");
        }
    }
    for review in &rep.reviews {
        println!(
            "  {}★ {} ({}): {}",
            review.rating,
            review.user_name,
            review.created_at.format("%Y-%m-%d"),
            review.comment
        );
    }
}

fn print_document(doc: &Document) {
    let title = if doc.title.is_empty() { "(untitled)" } else { &doc.title };
    println!("[{}] {title} ({})", doc.id, doc.created_at.format("%Y-%m-%d"));
    if let Some(url) = &doc.pdf_url {
        println!("    {url}");
    }
    if let Some(summary) = &doc.ai_summary {
        println!("    {summary}");
    }
}

fn print_bill(bill: &Bill) {
    println!("[{}] {}", bill.id, bill.title);
    if let Some(summary) = &bill.summary {
        println!("    {summary}");
    }
    if !bill.is_analyzed() {
        println!("    (not analysed yet)");
    }
    for impact in &bill.impacts {
        println!(
            "    {:<12} {:<8} {}",
            impact.archetype,
            impact.sentiment(),
            impact.description
        );
    }
}

fn print_topics(subs: &[Subscription]) {
    let topics = alerts::topics(subs);
    if topics.is_empty() {
        println!("No alert topics yet.");
    }
    for sub in topics {
        println!("{:>4}  {}", sub.id, sub.topic.as_deref().unwrap_or_default());
    }
}

fn print_chat_message(message: &ChatMessage) {
    let who = match message.role {
        ChatRole::User => "You",
        ChatRole::Assistant => "ParliaScope AI",
    };
    println!("{who}: {}", message.content);
    for source in message.sources.iter().flatten() {
        println!("  - {}: \"{}\"", source.speaker, source.preview);
    }
}

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use shared::{Pager, RequestForm, RequestStatus};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod pages;
mod render;
mod session;
#[cfg(test)]
mod testing;

use api::ApiClient;
use pages::events::EventsBrowser;
use render::{placeholder, Notice};
use session::SessionStore;

// Default backend URL (Flask dev server)
const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "campusbook")]
#[command(about = "Terminal client for the campus room and event booking site")]
#[command(version)]
struct Cli {
    /// Backend URL (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and remember the email/role pair
    Login(CredentialArgs),
    /// Create an account (verified through the demo inbox)
    Register(CredentialArgs),
    /// Verify a registration code
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Logout and forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Browse and book rooms
    Rooms {
        #[command(subcommand)]
        action: Option<RoomsAction>,
    },
    /// Browse and register for events
    Events {
        #[command(subcommand)]
        action: Option<EventsAction>,
    },
    /// Propose new events and track your proposals
    Requests {
        #[command(subcommand)]
        action: Option<RequestsAction>,
    },
    /// Administrator tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show info pages (all sections, or one slug)
    Info { slug: Option<String> },
    /// Demo inbox standing in for verification emails
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct CredentialArgs {
    #[arg(long)]
    email: String,
    /// Read from stdin when omitted
    #[arg(long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum RoomsAction {
    /// List rooms, open ones first
    List,
    /// Join a room
    Join { room_id: i64 },
    /// Leave your current room
    Leave,
}

#[derive(Subcommand)]
enum EventsAction {
    /// List one page of the catalog
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Page through the catalog interactively (n/p/q)
    Browse,
    /// Events you registered for
    Mine,
    /// Register for an event
    Register { event_id: i64 },
    /// Leave an event
    Leave { event_id: i64 },
}

#[derive(Subcommand)]
enum RequestsAction {
    /// Your requests and their status
    List,
    /// Propose a new event
    Create {
        #[arg(long)]
        title: String,
        /// social, orientation or study_group
        #[arg(long)]
        category: String,
        #[arg(long)]
        date_time: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
        /// Leave out for unlimited
        #[arg(long, default_value = "")]
        quota: String,
    },
    /// Hide an accepted or rejected request from your list
    Hide { request_id: i64 },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Requests filtered by status
    Requests {
        #[arg(long, default_value = "pending")]
        status: String,
    },
    /// Accept and publish a pending request
    Accept { request_id: i64 },
    /// Reject a pending request
    Reject {
        request_id: i64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// All rooms with occupancy
    Rooms,
    /// Students in a room
    RoomStudents { room_id: i64 },
    /// All events with registrations
    Events,
    /// Students registered for an event
    EventStudents { event_id: i64 },
    /// Show or change whether room selection is open
    RoomsOpen {
        #[arg(long)]
        set: Option<bool>,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// Show the pending verification for an email
    Status { email: String },
    /// Verify an email through the demo flow
    Verify { email: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// Configuration key (server, page_size)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Show all configuration
    Show,
    /// Get the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campusbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load().unwrap_or_default();
    let server = cli
        .server
        .or(config.remote.server.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let api = ApiClient::new(&server);
    let store = SessionStore::open_default()?;
    // Read once per command and passed down explicitly.
    let session = store.load();
    tracing::debug!("Using backend {} as {:?}", api.base_url(), session.role());

    match cli.command {
        Commands::Login(args) => {
            let password = password_or_prompt(args.password).await?;
            placeholder("Logging in...");
            pages::auth::login(&api, &store, &args.email, &password)
                .await?
                .print();
        }
        Commands::Register(args) => {
            let password = password_or_prompt(args.password).await?;
            placeholder("Registering...");
            pages::auth::register(&api, &args.email, &password).await.print();
        }
        Commands::Verify { email, code } => {
            placeholder("Verifying...");
            pages::auth::verify(&api, &email, &code).await.print();
        }
        Commands::Logout => pages::auth::logout(&api, &store).await?.print(),
        Commands::Whoami => {
            if session.is_logged_in() {
                println!("\x1b[32m✓ Logged in\x1b[0m as {} ({})", session.email(), session.role());
                println!("Server: {}", api.base_url());
            } else {
                println!("\x1b[33m✗ Not logged in\x1b[0m");
                println!("Run '\x1b[1mcampusbook login\x1b[0m' to authenticate");
            }
        }
        Commands::Rooms { action } => match action.unwrap_or(RoomsAction::List) {
            RoomsAction::List => {
                placeholder("Loading rooms...");
                match pages::rooms::load(&api, &session).await {
                    Ok(view) => {
                        if !view.lock_message.is_empty() {
                            println!("{}", view.lock_message);
                        }
                        if let Some(room) = &view.my_room {
                            println!("{}\n  [Leave room → campusbook rooms leave]\n", render::my_room(room));
                        }
                        for card in &view.cards {
                            println!("{}\n", render::room_card(card));
                        }
                    }
                    Err(err) => Notice::Failure(err.user_message(pages::rooms::LOAD_FALLBACK)).print(),
                }
            }
            RoomsAction::Join { room_id } => {
                placeholder("Joining...");
                pages::rooms::join(&api, &session, room_id).await.print();
            }
            RoomsAction::Leave => {
                placeholder("Leaving room...");
                pages::rooms::leave(&api, &session).await.print();
            }
        },
        Commands::Events { action } => {
            let page_size = config.events.page_size;
            match action.unwrap_or(EventsAction::List { page: 1 }) {
                EventsAction::List { page } => {
                    let browser = EventsBrowser::new(Pager::at(page, page_size));
                    show_catalog(&browser, &api, &session).await;
                }
                EventsAction::Browse => browse_events(&api, &session, page_size).await?,
                EventsAction::Mine => {
                    placeholder("Loading your registered events...");
                    match pages::events::registered(&api, &session, Utc::now()).await {
                        Ok(cards) if cards.is_empty() => {
                            println!("You have not registered for any events yet.")
                        }
                        Ok(cards) => {
                            for card in &cards {
                                println!("{}\n", render::registered_event(card));
                            }
                        }
                        Err(err) => Notice::Failure(err.user_message(pages::events::MINE_FALLBACK)).print(),
                    }
                }
                EventsAction::Register { event_id } => {
                    placeholder("Registering...");
                    pages::events::register(&api, &session, event_id).await.print();
                }
                EventsAction::Leave { event_id } => {
                    placeholder("Leaving...");
                    pages::events::leave(&api, &session, event_id).await.print();
                }
            }
        }
        Commands::Requests { action } => match action.unwrap_or(RequestsAction::List) {
            RequestsAction::List => {
                placeholder("Loading your requests...");
                match pages::requests::mine(&api, &session).await {
                    Ok(cards) => {
                        for card in &cards {
                            println!("{}\n", render::owner_request(card));
                        }
                    }
                    Err(err) => Notice::Failure(err.user_message(pages::requests::LOAD_FALLBACK)).print(),
                }
            }
            RequestsAction::Create {
                title,
                category,
                date_time,
                location,
                description,
                quota,
            } => {
                let form = RequestForm {
                    title,
                    category,
                    date_time,
                    location,
                    description,
                    quota,
                };
                placeholder("Submitting request...");
                pages::requests::create(&api, &session, &form).await.print();
            }
            RequestsAction::Hide { request_id } => {
                placeholder("Hiding...");
                pages::requests::hide(&api, &session, request_id).await.print();
            }
        },
        Commands::Admin { action } => handle_admin_command(action, &api, &session).await,
        Commands::Info { slug } => {
            placeholder("Loading info...");
            match pages::info::load(&api, slug.as_deref()).await {
                Ok(sections) if sections.is_empty() => println!("No info pages found."),
                Ok(sections) => {
                    for section in &sections {
                        println!("{}\n", render::info_page(section));
                    }
                }
                Err(err) => Notice::Failure(err.user_message(pages::info::LOAD_FALLBACK)).print(),
            }
        }
        Commands::Inbox { action } => match action {
            InboxAction::Status { email } => {
                placeholder("Loading...");
                match pages::inbox::status(&api, &email).await {
                    Ok(pending) => {
                        Notice::Success("Pending verification found.".to_string()).print();
                        println!("Created at: {}", pending.created_at);
                        println!("Last sent at: {}", pending.last_sent_at);
                    }
                    Err(err) => Notice::Failure(err.user_message("Failed.")).print(),
                }
            }
            InboxAction::Verify { email } => {
                placeholder("Verifying...");
                pages::inbox::verify(&api, &email).await.print();
            }
        },
        Commands::Config { action } => handle_config_command(action)?,
    }

    Ok(())
}

async fn show_catalog(browser: &EventsBrowser, api: &ApiClient, session: &shared::Session) {
    placeholder("Loading events...");
    match browser.load(api, session, Utc::now()).await {
        Ok(view) => {
            for card in &view.cards {
                println!("{}\n", render::event_card(card));
            }
            println!("{}", render::pager(&view.controls));
        }
        Err(err) => Notice::Failure(err.user_message(pages::events::LOAD_FALLBACK)).print(),
    }
}

async fn browse_events(api: &ApiClient, session: &shared::Session, page_size: u32) -> Result<()> {
    let mut browser = EventsBrowser::new(Pager::new(page_size));
    show_catalog(&browser, api, session).await;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "n" | "next" => browser.next(),
            "p" | "prev" => browser.prev(),
            "q" | "quit" => break,
            _ => {
                println!("n = next page, p = previous page, q = quit");
                continue;
            }
        }
        show_catalog(&browser, api, session).await;
    }
    Ok(())
}

async fn handle_admin_command(action: AdminAction, api: &ApiClient, session: &shared::Session) {
    if session.is_admin() {
        println!("Logged in as admin: {}", session.email());
    }

    match action {
        AdminAction::Requests { status } => {
            let Some(status) = RequestStatus::parse(&status) else {
                Notice::Failure("Status must be pending, accepted or rejected.".to_string()).print();
                return;
            };
            placeholder("Loading...");
            match pages::admin::requests(api, session, status).await {
                Ok(cards) if cards.is_empty() => println!("No {} requests.", status),
                Ok(cards) => {
                    for card in &cards {
                        println!("{}\n", render::admin_request(card));
                    }
                }
                Err(err) => Notice::Failure(err.user_message(pages::admin::LOAD_FALLBACK)).print(),
            }
        }
        AdminAction::Accept { request_id } => {
            placeholder("Accepting...");
            pages::admin::accept(api, session, request_id).await.print();
        }
        AdminAction::Reject {
            request_id,
            comment,
        } => {
            placeholder("Rejecting...");
            pages::admin::reject(api, session, request_id, &comment)
                .await
                .print();
        }
        AdminAction::Rooms => {
            placeholder("Loading rooms...");
            match pages::admin::rooms(api, session).await {
                Ok(cards) => {
                    for card in &cards {
                        println!("{}\n", render::room_card(card));
                    }
                }
                Err(err) => Notice::Failure(err.user_message(pages::rooms::LOAD_FALLBACK)).print(),
            }
        }
        AdminAction::RoomStudents { room_id } => {
            placeholder("Loading...");
            match pages::admin::room_students(api, session, room_id).await {
                Ok(roster) => println!("{}", render::room_roster(&roster)),
                Err(err) => Notice::Failure(err.user_message("Failed to load students.")).print(),
            }
        }
        AdminAction::Events => {
            placeholder("Loading events...");
            match pages::admin::events(api, session, Utc::now()).await {
                Ok(cards) => {
                    for card in &cards {
                        println!("{}\n", render::registered_event(card));
                    }
                }
                Err(err) => Notice::Failure(err.user_message(pages::events::LOAD_FALLBACK)).print(),
            }
        }
        AdminAction::EventStudents { event_id } => {
            placeholder("Loading...");
            match pages::admin::event_students(api, session, event_id).await {
                Ok(roster) => println!("{}", render::event_roster(&roster)),
                Err(err) => Notice::Failure(err.user_message("Failed to load students.")).print(),
            }
        }
        AdminAction::RoomsOpen { set: Some(open) } => {
            pages::admin::set_rooms_open(api, session, open).await.print();
        }
        AdminAction::RoomsOpen { set: None } => match pages::admin::rooms_open(api, session).await {
            Ok(true) => println!("Room selection is currently OPEN."),
            Ok(false) => println!("Room selection is currently CLOSED by admin."),
            Err(err) => Notice::Failure(err.user_message("Failed to read room selection state.")).print(),
        },
    }
}

async fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut lines = BufReader::new(io::stdin()).lines();
    Ok(lines.next_line().await?.unwrap_or_default())
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = config::Config::load().unwrap_or_default();
            match key.as_str() {
                "server" => config.remote.server = Some(value),
                "page_size" => config.events.page_size = value.parse()?,
                _ => anyhow::bail!("Unknown config key: {}. Valid keys: server, page_size", key),
            }
            config.save()?;
            println!("Configuration saved");
        }
        ConfigAction::Get { key } => {
            let config = config::Config::load()?;
            let value = match key.as_str() {
                "server" => config.remote.server.unwrap_or_default(),
                "page_size" => config.events.page_size.to_string(),
                _ => anyhow::bail!("Unknown config key: {}", key),
            };
            println!("{}", value);
        }
        ConfigAction::Show => {
            let config = config::Config::load()?;
            println!("server: {}", config.remote.server.unwrap_or_default());
            println!("page_size: {}", config.events.page_size);
        }
        ConfigAction::Path => {
            let path = config::Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

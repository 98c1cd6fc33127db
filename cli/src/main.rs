//! AusVisa API command-line consumer.
//!
//! Thin shell over `ausvisa-api`: each subcommand calls one endpoint wrapper
//! and prints the JSON result. The session (token + cached profile) persists
//! under `--session-dir`, so `login` survives across invocations. A 401 on
//! any command clears the stored session before exiting.

use std::path::PathBuf;
use std::sync::Arc;

use ausvisa_api::chatbot::ChatMessagePayload;
use ausvisa_api::{
    ApiClient, ApiError, ClientConfig, FileBackend, RegisterPayload, SessionStore, UserUpdate,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `ausvisa login` first")]
    NotLoggedIn,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ausvisa", about = "AusVisa immigration-advisory backend CLI")]
struct Cli {
    #[arg(long, env = "AUSVISA_BASE_URL", default_value = ausvisa_api::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory holding the persisted session (token + cached profile).
    #[arg(long, env = "AUSVISA_SESSION_DIR", default_value = ".ausvisa")]
    session_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backend health check.
    Ping,
    /// Create an account.
    Register(RegisterArgs),
    /// Authenticate and persist the session.
    Login(LoginArgs),
    /// Clear the persisted session.
    Logout,
    /// Current-user profile.
    Me(MeCommand),
    /// User administration.
    Users(UsersCommand),
    /// Chatbot conversations.
    Chat(ChatCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    role: Option<String>,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Debug)]
struct MeCommand {
    #[command(subcommand)]
    command: MeSubcommand,
}

#[derive(Subcommand, Debug)]
enum MeSubcommand {
    /// Fetch the authenticated user from the backend.
    Show,
    /// Update profile fields; absent flags are left untouched.
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    /// List accounts (admin).
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Re-enable a suspended account.
    Activate { id: i64 },
    /// Suspend an account.
    Deactivate { id: i64 },
    /// Apply a JSON partial update to an account.
    Update {
        id: i64,
        #[arg(long, help = "JSON object, e.g. '{\"role\":\"admin\"}'")]
        data: String,
    },
}

#[derive(Args, Debug)]
struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatSubcommand {
    /// Send a message; omit --conversation-id to start a new thread.
    Send {
        message: String,
        #[arg(long)]
        conversation_id: Option<i64>,
        #[arg(long)]
        title: Option<String>,
    },
    /// List conversation threads.
    List,
    /// Replay a conversation's turn history.
    History { conversation_id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let session = SessionStore::new(Arc::new(FileBackend::new(cli.session_dir.clone())));
    let config = ClientConfig::from_env().with_base_url(&cli.base_url);
    let client = ApiClient::new(&config, session)?;

    let result = run(&client, cli.command).await;
    if let Err(CliError::Api(err)) = &result {
        if err.is_unauthorized() {
            client.session().clear();
            eprintln!("phiên đăng nhập đã hết hạn; vui lòng đăng nhập lại");
        }
    }
    result
}

async fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Ping => run_ping(client).await,
        Command::Register(args) => run_register(client, args).await,
        Command::Login(args) => run_login(client, args).await,
        Command::Logout => {
            client.session().clear();
            println!("ok");
            Ok(())
        }
        Command::Me(me) => run_me(client, me).await,
        Command::Users(users) => run_users(client, users).await,
        Command::Chat(chat) => run_chat(client, chat).await,
    }
}

async fn run_ping(client: &ApiClient) -> Result<(), CliError> {
    let health = client.health_check().await?;
    println!("{}", health.status);
    Ok(())
}

async fn run_register(client: &ApiClient, args: RegisterArgs) -> Result<(), CliError> {
    let payload = RegisterPayload {
        email: args.email,
        username: args.username,
        password: args.password,
        full_name: args.full_name,
        role: args.role,
    };
    let user = client.register(&payload).await?;
    print_json(&user)
}

async fn run_login(client: &ApiClient, args: LoginArgs) -> Result<(), CliError> {
    let response = client.login(&args.email, &args.password).await?;
    client
        .session()
        .store_auth(&response.access_token, Some(&response.user));
    print_json(&response.user)
}

async fn run_me(client: &ApiClient, me: MeCommand) -> Result<(), CliError> {
    require_login(client)?;
    match me.command {
        MeSubcommand::Show => {
            let user = client.fetch_current_user().await?;
            print_json(&user)
        }
        MeSubcommand::Update { email, username, full_name, password } => {
            let payload = UserUpdate { email, username, full_name, password, ..UserUpdate::default() };
            let user = client.update_current_user(&payload).await?;
            print_json(&user)
        }
    }
}

async fn run_users(client: &ApiClient, users: UsersCommand) -> Result<(), CliError> {
    require_login(client)?;
    match users.command {
        UsersSubcommand::List { skip, limit } => {
            let list = client.list_users(skip, limit, None).await?;
            print_json(&list)
        }
        UsersSubcommand::Activate { id } => {
            let user = client.activate_user(id, None).await?;
            print_json(&user)
        }
        UsersSubcommand::Deactivate { id } => {
            let user = client.deactivate_user(id, None).await?;
            print_json(&user)
        }
        UsersSubcommand::Update { id, data } => {
            let payload: UserUpdate = serde_json::from_str(&data)?;
            let user = client.update_user(id, &payload, None).await?;
            print_json(&user)
        }
    }
}

async fn run_chat(client: &ApiClient, chat: ChatCommand) -> Result<(), CliError> {
    match chat.command {
        // Anonymous sends are allowed; a stored token is attached when present.
        ChatSubcommand::Send { message, conversation_id, title } => {
            let payload = ChatMessagePayload { message, conversation_id, title };
            let response = client.send_chat_message(&payload, None).await?;
            print_json(&response)
        }
        ChatSubcommand::List => {
            require_login(client)?;
            let conversations = client.list_conversations(None).await?;
            print_json(&conversations)
        }
        ChatSubcommand::History { conversation_id } => {
            require_login(client)?;
            let turns = client.fetch_conversation_messages(conversation_id, None).await?;
            print_json(&turns)
        }
    }
}

fn require_login(client: &ApiClient) -> Result<(), CliError> {
    if client.session().stored_auth().is_none() {
        return Err(CliError::NotLoggedIn);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

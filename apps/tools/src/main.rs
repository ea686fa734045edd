use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crm_api::auth;
use shared::{domain::UserRole, protocol::RegisterRequest};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/crm.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates the admin account unless its email is already registered.
    SeedAdmin {
        #[arg(long, env = "ADMIN_NAME", default_value = "Admin")]
        name: String,
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
    CreateUser {
        name: String,
        email: String,
        password: String,
        #[arg(long, default_value = "agent")]
        role: UserRole,
    },
    /// Deletes every session whose expiry has passed.
    PurgeSessions,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::SeedAdmin {
            name,
            email,
            password,
        } => {
            if let Some(existing) = storage.user_by_email(&email).await? {
                info!(user_id = existing.user_id.0, "admin already present; nothing to do");
                println!("admin exists user_id={}", existing.user_id.0);
                return Ok(());
            }
            let user_id = create(&storage, name, email, password, UserRole::Admin).await?;
            println!("created admin user_id={user_id}");
        }
        Command::CreateUser {
            name,
            email,
            password,
            role,
        } => {
            let user_id = create(&storage, name, email, password, role).await?;
            println!("created user_id={user_id}");
        }
        Command::PurgeSessions => {
            let purged = storage.purge_expired_sessions(Utc::now()).await?;
            info!(purged, "expired sessions purged");
            println!("purged {purged} sessions");
        }
    }

    Ok(())
}

async fn create(
    storage: &Storage,
    name: String,
    email: String,
    password: String,
    role: UserRole,
) -> Result<i64> {
    let request = RegisterRequest {
        name,
        email,
        password,
    };
    let user_id = auth::register(storage, &request, role, auth::DEFAULT_HASH_ITERATIONS)
        .await
        .map_err(|err| anyhow!("{}", err.message))?;
    Ok(user_id.0)
}

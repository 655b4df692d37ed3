//! Create a superuser account in the configured database.
//!
//! ```text
//! RECIPE_DATABASE_URL=postgres://... create-superuser --email admin@example.com --password secret
//! ```

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::domain::{AccountService, DisplayName, EmailAddress, Password};
use recipe_backend::outbound::persistence::{
    DbPool, DieselTokenRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use recipe_backend::outbound::security::Argon2PasswordHasher;
use recipe_backend::settings::AppSettings;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "create-superuser", about = "Create an admin account")]
struct Args {
    /// Login email for the new account.
    #[arg(long)]
    email: String,
    /// Initial password.
    #[arg(long)]
    password: String,
    /// Optional display name.
    #[arg(long, default_value = "")]
    name: String,
}

fn other(message: impl Into<String>) -> std::io::Error {
    std::io::Error::other(message.into())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let settings = AppSettings::load_from_iter([OsString::from("create-superuser")])
        .map_err(|e| other(format!("failed to load settings: {e}")))?;
    let database_url = settings
        .database_url()
        .ok_or_else(|| other("RECIPE_DATABASE_URL must be set"))?;

    let email = EmailAddress::new(&args.email).map_err(|e| other(format!("email: {e}")))?;
    let password = Password::new(&args.password).map_err(|e| other(format!("password: {e}")))?;
    let name = DisplayName::new(&args.name).map_err(|e| other(format!("name: {e}")))?;

    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .map_err(std::io::Error::other)?;

    let accounts = AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselTokenRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::default()),
    );
    let user = accounts
        .create_superuser(email, password, name)
        .await
        .map_err(|e| other(e.to_string()))?;

    println!("created superuser {} ({})", user.email(), user.id());
    Ok(())
}

use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::JwtKeys;
use crate::cli::OutputFormat;
use crate::config;
use crate::database::{DatabaseManager, PgUserStore, UserStore};

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "Id of the user the token authenticates")]
    pub user_id: Uuid,

    #[arg(long, help = "Username carried in the token")]
    pub username: String,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

/// Tokens are only minted for users the database knows. Without a
/// database there is nothing to check against.
pub async fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();
    if config.database.url.is_some() {
        let pool = DatabaseManager::connect(&config.database).await?;
        let checked = ensure_user_exists(&PgUserStore::new(pool.clone()), args.user_id).await;
        pool.close().await;
        checked?;
    }

    let security = &config.security;
    let keys = JwtKeys::new(&security.jwt_secret, args.hours.unwrap_or(security.jwt_expiry_hours))?;
    let token = keys.issue(args.user_id, &args.username)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "token": token, "user_id": args.user_id, "username": args.username })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}

async fn ensure_user_exists(users: &dyn UserStore, user_id: Uuid) -> anyhow::Result<()> {
    match users.get(user_id).await? {
        Some(_) => Ok(()),
        None => anyhow::bail!("No user with id {}; create one with `gallery user add`", user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryUserStore;

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let users = MemoryUserStore::new();
        let user = crate::testing::create_user(&users, "alex").await;

        assert!(ensure_user_exists(&users, user.id).await.is_ok());
        let err = ensure_user_exists(&users, Uuid::new_v4()).await.unwrap_err();
        assert!(err.to_string().contains("gallery user add"));
    }
}

use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::config;
use crate::database::models::NewUser;
use crate::database::{DatabaseManager, PgUserStore, UserStore};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user in the database named by DATABASE_URL")]
    Add {
        #[arg(help = "Handle, used as the username")]
        handle: String,
        #[arg(long, help = "Email (defaults to <handle>@<handle>.com)")]
        email: Option<String>,
        #[arg(long, help = "Name shown in the gallery (defaults to the handle)")]
        display_name: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add {
            handle,
            email,
            display_name,
        } => {
            let mut new_user = NewUser::from_handle(&handle);
            if let Some(email) = email {
                new_user.email = email;
            }
            if let Some(display_name) = display_name {
                new_user.display_name = display_name;
            }

            // The in-memory store lives inside the server process
            let pool = DatabaseManager::connect(&config::config().database).await?;
            let user = PgUserStore::new(pool.clone()).insert(new_user).await?;
            pool.close().await;

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&user)?),
                OutputFormat::Text => println!("Created user {} ({})", user.username, user.id),
            }
            Ok(())
        }
    }
}

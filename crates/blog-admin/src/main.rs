//! Offline admin channel
//!
//! Grants or revokes admin rights directly against the store. There is no
//! in-application path to admin status; an operator with shell access to the
//! deployment runs this instead.
//!
//! ```bash
//! cargo run -p blog-admin -- give-admin alice@example.com
//! cargo run -p blog-admin -- revoke-admin alice@example.com
//! ```

use blog_common::{try_init_tracing, AppConfig};
use blog_db::create_pool;
use blog_media::ImageStore;
use blog_service::{ServiceContext, UserService};
use tracing::{error, info};

const USAGE: &str = "usage: blog-admin <give-admin|revoke-admin> <email>";

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "admin command failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(command), Some(email)) = (args.next(), args.next()) else {
        return Err(USAGE.into());
    };

    let config = AppConfig::from_env()?;
    let db_config = blog_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..blog_db::DatabaseConfig::default()
    };
    let pool = create_pool(&db_config).await?;
    blog_db::run_migrations(&pool).await?;

    let ctx = ServiceContext::from_pool(pool, ImageStore::new(&config.storage.upload_dir));
    let users = UserService::new(&ctx);

    let user = ctx
        .user_repo()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| format!("no user with email {email}"))?;

    match command.as_str() {
        "give-admin" => {
            users.give_admin_rights(user.id).await?;
            info!(user_id = %user.id, nickname = %user.nickname, "admin rights granted");
        }
        "revoke-admin" => {
            users.revoke_admin_rights(user.id).await?;
            info!(user_id = %user.id, nickname = %user.nickname, "admin rights revoked");
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

//! Management commands: migrations, admin accounts and demo content
//!
//! ```bash
//! cargo run -p site-web --bin site-manage -- migrate
//! cargo run -p site-web --bin site-manage -- create-admin manager --password '...'
//! cargo run -p site-web --bin site-manage -- seed-demo
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use site_common::{try_init_tracing_with_config, AppConfig, JwtService, TracingConfig};
use site_db::{connect, run_migrations, PgPool, PoolSettings};
use site_service::dto::CreateAdminRequest;
use site_service::{AuthService, SeedService, ServiceContext, ServiceContextBuilder};
use site_web::server::repositories;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "site-manage", version, about = "Bright City management commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending database migrations.
    Migrate {
        /// Directory with migration files (defaults to the embedded set).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Create an admin account for the JSON API.
    CreateAdmin {
        username: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
    /// Fill an empty site with demo settings, slides, services and works.
    SeedDemo,
    /// Replace the home page counters with the standard set.
    SeedStatistics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("loading configuration")?;

    let _guards = try_init_tracing_with_config(TracingConfig::from_logging(
        &config.logging,
        config.app.env.is_production(),
    ))
    .ok();

    let pool = connect(&PoolSettings::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    ))
    .await
    .context("connecting to the database")?;

    match cli.command {
        Commands::Migrate { dir } => {
            run_migrations(&pool, dir.as_deref())
                .await
                .context("running migrations")?;
            println!("Migrations applied");
        }
        Commands::CreateAdmin { username, password } => {
            let ctx = context(&config, &pool)?;
            let admin = AuthService::new(&ctx)
                .create_admin(CreateAdminRequest { username, password })
                .await?;
            println!("Created admin '{}' ({})", admin.username, admin.id);
        }
        Commands::SeedDemo => {
            let ctx = context(&config, &pool)?;
            let report = SeedService::new(&ctx).seed_demo().await?;
            info!(?report, "Demo content seeded");
            println!("Seeded {} records", report.total());
        }
        Commands::SeedStatistics => {
            let ctx = context(&config, &pool)?;
            let report = SeedService::new(&ctx).seed_statistics().await?;
            println!("Created {} statistics", report.statistics);
        }
    }

    Ok(())
}

fn context(config: &AppConfig, pool: &PgPool) -> anyhow::Result<ServiceContext> {
    let jwt = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    );
    let ctx = ServiceContextBuilder::new()
        .repositories(repositories(pool))
        .jwt_service(Arc::new(jwt))
        .build()?;
    Ok(ctx)
}

//! `control-room` -- project-scoped viewer for decision records.
//!
//! Configuration comes from the environment (see
//! [`control_room::config::AppConfig::from_env`]); a `.env` file is loaded
//! first when present. Logs go to stderr, rendered output to stdout.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use control_room::cli::Cli;
use control_room::commands;
use control_room::config::AppConfig;
use control_room::render;
use control_room_client::backend::Backends;
use control_room_session::gate::{self, Restoration};
use control_room_session::state::SessionState;
use control_room_session::store::FileSessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "control_room=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let backends = Backends::from_config(&config.backend)?;

    let mut session = SessionState::new(FileSessionStore::new(&config.state_dir));
    let restoration = gate::restore(&mut session, backends.directory.as_ref()).await;
    if let Restoration::Restored { project } = &restoration {
        tracing::debug!(project_id = %project.project_id(), "Session restored");
    }
    if let Some(notice) = render::restoration_notice(&restoration) {
        eprintln!("{notice}");
    }

    let output = match commands::execute(&cli.command, &mut session, &backends).await {
        Ok(output) => output,
        Err(e) => {
            if let Some(hint) = commands::hint(&e) {
                eprintln!("{hint}");
            }
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", render::json(&output)?);
    } else {
        print!("{}", render::text(&output));
    }
    Ok(())
}

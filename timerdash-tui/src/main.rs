// Terminal dashboard for the game-timer bot
use std::io::{Write, stdout};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use timerdash_core::{DashboardConfig, RestClient, SessionGuard, SessionState, ViewModel};
use timerdash_tui::cli::Args;
use timerdash_tui::commands::dispatch;
use timerdash_tui::render::render_view;
use timerdash_tui::DashboardContext;

const PROMPT: &str = "timerdash> ";

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("timerdash=info".parse().unwrap_or_default());
    // stdout belongs to the dashboard
    let sub = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}

fn print_with_prompt(text: &str) {
    println!("\n{}", text);
    print!("{}", PROMPT);
    let _ = stdout().flush();
}

/// Prints every newly published view.
fn spawn_renderer(mut views: watch::Receiver<ViewModel>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let text = render_view(&views.borrow_and_update());
            print_with_prompt(&text);
        }
    })
}

/// Stops polling when the server revokes the session.
fn spawn_session_watch(ctx: Arc<DashboardContext>) -> tokio::task::JoinHandle<()> {
    let mut states = ctx.session().subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if let SessionState::Revoked { reason } = state {
                ctx.scheduler().stop();
                error!("Session revoked: {}", reason);
                print_with_prompt(
                    &format!("Session ended by the server ({}). Use 'login <user> <password>'.", reason)
                        .red()
                        .to_string(),
                );
            }
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args
        .apply(DashboardConfig::from_env().context("reading environment")?)
        .context("applying command line options")?;
    info!(
        "timerdash starting. base_url={}, interval={:?}, gsi={}",
        config.base_url, config.poll_interval, config.poll_gsi
    );

    let session = Arc::new(SessionGuard::new());
    let client = Arc::new(RestClient::from_config(&config, session.clone()).context("building HTTP client")?);
    let ctx = Arc::new(DashboardContext::new(client, session, config).context("creating dashboard")?);

    let renderer = spawn_renderer(ctx.engine().subscribe());
    let session_watch = spawn_session_watch(ctx.clone());

    println!("timerdash - connected to {}", ctx.config().base_url);
    match args.credentials(|key| std::env::var(key).ok()) {
        Some((username, password)) => match ctx.login(&username, &password).await {
            Ok(s) => println!("Logged in as {}.", s.username),
            Err(e) => println!("{}", format!("Login failed: {}. Use 'login <user> <password>'.", e).red()),
        },
        None => println!("Not logged in. Use 'login <user> <password>'."),
    }
    println!("Type 'help' for available commands.\n");

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break, // EOF
        };
        if line.is_empty() {
            continue;
        }

        let (quit_requested, output) = dispatch(&line, &ctx).await;
        if let Some(msg) = output {
            println!("{}", msg);
        }
        if quit_requested {
            break;
        }
    }

    ctx.shutdown();
    renderer.abort();
    session_watch.abort();
    println!("Goodbye!");
    Ok(())
}

//! Dashboard entry point.

use std::io::Write;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use dashboard::config::Args;
use dashboard::render::{RenderContext, render};
use dashboard::{ChecklistClient, DashboardState, Poller, Tab};
use common::format::{format_date, offset_from_minutes};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

enum Command {
    Refresh,
    Quit,
    Show(Tab),
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "r" => Some(Command::Refresh),
        "q" => Some(Command::Quit),
        other => Tab::from_str(other, true).ok().map(Command::Show),
    }
}

fn draw(state: &DashboardState, ctx: &RenderContext<'_>) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{CLEAR_SCREEN}{}", render(state, ctx));
    let _ = writeln!(stdout, "[r] atualizar  [overview|systems|problems|history|checklist]  [q] sair");
    let _ = stdout.flush();
}

async fn run_once(client: ChecklistClient, ctx: &RenderContext<'_>, offset_minutes: i32) -> bool {
    let now = Utc::now();
    let mut state = DashboardState::new(now);
    let ok = match client.fetch().await {
        Ok(summary) => {
            let today = format_date(now, offset_from_minutes(offset_minutes));
            state.apply_success(&summary, &today, now);
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "fetch failed");
            state.apply_failure(e.to_string());
            false
        }
    };
    print!("{}", render(&state, ctx));
    ok
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = match ChecklistClient::new(args.url.clone(), args.timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let mut ctx = RenderContext {
        tab: args.tab,
        offset: offset_from_minutes(args.utc_offset_minutes),
        form_url: args.form_url.as_deref(),
    };

    if args.once {
        let ok = run_once(client, &ctx, args.utc_offset_minutes).await;
        std::process::exit(if ok { 0 } else { 1 });
    }

    let handle = Poller::new(client, args.poller_config()).spawn();
    let mut changes = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&handle.state().await, &ctx);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(Command::Refresh) => handle.refresh_now(),
                    Some(Command::Quit) => break,
                    Some(Command::Show(tab)) => {
                        ctx.tab = tab;
                        draw(&handle.state().await, &ctx);
                    }
                    None => {}
                },
                // stdin closed; keep polling until interrupted
                Ok(None) => stdin_open = false,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
}

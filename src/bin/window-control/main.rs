mod args;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use args::{Args, Command};
use chrono_tz::Tz;
use clap::Parser as _;
use climate_dashboard::{
    source::new_http_client,
    window::{
        CommandOutcome, ControllerView, FallbackTransport, WindowController, WindowStateTransport,
    },
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::time::interval;
use tracing_subscriber::EnvFilter;

type Controller = WindowController<FallbackTransport>;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let endpoints = args.endpoints();
    if endpoints.is_empty() {
        bail!("no window-state endpoint configured: set --primary-url or --aggregator-url");
    }

    let client = new_http_client(Duration::from_secs(args.timeout_secs))?;
    let controller = WindowController::new(FallbackTransport::http(&client, endpoints));

    match args.command {
        Command::Status => {
            controller.poll().await;
            let view = controller.view();
            print_view(&view, args.timezone);
            if let Some(error) = view.error {
                bail!(error);
            }
        }
        Command::Toggle => {
            controller.poll().await;
            let outcome = controller.toggle().await;
            print_view(&controller.view(), args.timezone);
            match outcome {
                CommandOutcome::Applied(command) => println!("sent state {}", command.state()),
                CommandOutcome::Refused => bail!("window state unknown, no command sent"),
                CommandOutcome::Failed => bail!("failed to send window command"),
            }
        }
        Command::Watch { interval_secs } => {
            watch(&controller, Duration::from_secs(interval_secs), args.timezone).await?;
        }
    }

    Ok(())
}

async fn watch(controller: &Controller, every: Duration, timezone: Tz) -> Result<()> {
    let timer = controller.start(every);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut render = interval(Duration::from_millis(250));
    let mut shown: Option<ControllerView> = None;

    println!("commands: r = refresh, t = toggle, q = quit");

    loop {
        tokio::select! {
            _ = render.tick() => {
                let view = controller.view();
                if shown.as_ref() != Some(&view) {
                    print_view(&view, timezone);
                    shown = Some(view);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if handle_input(controller, &line) == Input::Quit {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    timer.stop();

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Continue,
    Quit,
}

/// Commands run on their own task so rendering and Ctrl-C stay live while
/// they are in flight.
fn handle_input<T: WindowStateTransport + 'static>(
    controller: &WindowController<T>,
    line: &str,
) -> Input {
    match line.trim() {
        "r" => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.refresh().await });
        }
        "t" => {
            let controller = controller.clone();
            tokio::spawn(async move {
                if controller.toggle().await == CommandOutcome::Refused {
                    println!("window state unknown or command in flight, nothing sent");
                }
            });
        }
        "q" => return Input::Quit,
        "" => {}
        other => eprintln!("unknown command: {other}"),
    }

    Input::Continue
}

fn print_view(view: &ControllerView, timezone: Tz) {
    let updated = view
        .snapshot
        .as_ref()
        .and_then(|s| s.ts)
        .map(|ts| ts.with_timezone(&timezone).format("%H:%M:%S").to_string());

    print!("{} [{}]", view.status_text(), view.action_label());
    if let Some(updated) = updated {
        print!(" updated {updated}");
    }
    if view
        .snapshot
        .as_ref()
        .and_then(|s| s.payload.as_ref())
        .is_some_and(|p| p.leak_suspected())
    {
        print!(" (possible leak)");
    }
    println!();
}

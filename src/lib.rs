pub mod client;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod input;
pub mod models;
pub mod renderer;
pub mod sensors;

use crate::client::http::HttpTransport;
use crate::client::{ApiClient, ApiError, Transport};
use crate::commands::{CommandDispatcher, CommandOutcome};
use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::input::{UserAction, HELP};
use crate::models::Snapshot;
use anyhow::{anyhow, Context};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Poll a single snapshot, print the page and return.
    pub once: bool,
    /// Read operator actions from stdin.
    pub read_input: bool,
}

pub async fn run(config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    info!("Starting application");
    info!(
        "Polling {} every {} ms",
        config.api.root_url(),
        config.dashboard.poll_interval().as_millis()
    );

    tokio::select! {
        result = main_loop(&config, options) => {
            match result {
                Ok(_) => info!("Application completed successfully"),
                Err(e) => {
                    error!("Application error: {e:#}");
                    for cause in e.chain().skip(1) {
                        error!("Caused by: {cause}");
                    }
                    return Err(e).context("Application failed to run");
                }
            }
        }
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }

    Ok(())
}

async fn main_loop(config: &AppConfig, options: RunOptions) -> anyhow::Result<()> {
    let transport = HttpTransport::new(config.api.timeout()).context("Failed to build the HTTP client")?;
    let client = Arc::new(ApiClient::new(transport, config.api.root_url()));
    debug!("Laying out the dashboard");
    let mut dashboard = Dashboard::new(&config.layout).context("Failed to lay out the dashboard")?;

    if options.once {
        return poll_once(&*client, &mut dashboard, config).await;
    }

    let (line_tx, lines) = mpsc::channel(16);
    if options.read_input {
        println!("{HELP}");
        tokio::spawn(read_lines(line_tx));
    } else {
        drop(line_tx);
    }

    poll_loop(client, &mut dashboard, config, lines).await
}

async fn poll_once<T: Transport>(
    client: &ApiClient<T>,
    dashboard: &mut Dashboard,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let shown = dashboard.apply(client.fetch_snapshot().await);
    print!("{}", dashboard.page().to_text());

    if !shown {
        return Err(anyhow!("No usable snapshot from {}", client.root()));
    }
    if config.dashboard.save_to_file {
        dashboard::save_page(config, dashboard.page())?;
    }
    Ok(())
}

/// Fetches run as independent tasks and report back over a channel, so a slow
/// response never delays the next tick. Whichever response arrives last is
/// what the page shows.
async fn poll_loop<T: Transport>(
    client: Arc<ApiClient<T>>,
    dashboard: &mut Dashboard,
    config: &AppConfig,
    mut lines: mpsc::Receiver<String>,
) -> anyhow::Result<()> {
    let dispatcher = CommandDispatcher::new(Arc::clone(&client));
    let (snapshot_tx, mut snapshots) = mpsc::channel::<Result<Snapshot, ApiError>>(8);
    let mut commands: JoinSet<CommandOutcome> = JoinSet::new();
    let mut input_open = true;

    let mut interval = tokio::time::interval(config.dashboard.poll_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => spawn_fetch(&client, &snapshot_tx),
            Some(result) = snapshots.recv() => {
                if dashboard.apply(result) && config.dashboard.save_to_file {
                    if let Err(e) = dashboard::save_page(config, dashboard.page()) {
                        error!("{e:#}");
                    }
                }
            }
            line = lines.recv(), if input_open => match line {
                Some(line) => handle_line(&line, dashboard, &dispatcher, &mut commands),
                None => {
                    debug!("Operator input closed");
                    input_open = false;
                }
            },
            Some(joined) = commands.join_next(), if !commands.is_empty() => match joined {
                Ok(outcome) => outcome.log(),
                Err(e) => error!("Command task failed: {e}"),
            },
        }
    }
}

fn spawn_fetch<T: Transport>(client: &Arc<ApiClient<T>>, results: &mpsc::Sender<Result<Snapshot, ApiError>>) {
    let client = Arc::clone(client);
    let results = results.clone();
    tokio::spawn(async move {
        let result = client.fetch_snapshot().await;
        // Only fails once the loop has gone away.
        let _ = results.send(result).await;
    });
}

fn handle_line<T: Transport>(
    line: &str,
    dashboard: &Dashboard,
    dispatcher: &CommandDispatcher<T>,
    tasks: &mut JoinSet<CommandOutcome>,
) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let action = match line.parse::<UserAction>() {
        Ok(action) => action,
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    if action == UserAction::Help {
        println!("{HELP}");
        return;
    }

    match dashboard.command_for(&action) {
        Ok(command) => dispatcher.dispatch(tasks, command),
        Err(e) => error!("{e}"),
    }
}

async fn read_lines(lines_tx: mpsc::Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if lines_tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read operator input: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;
    use crate::dashboard::Freshness;
    use crate::models::fixtures;
    use serde_json::json;
    use std::time::Duration;

    const ROOT: &str = "http://pscu/api/0.1/lpdpower/";

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.dashboard.poll_interval_ms = 10;
        config
    }

    /// Run the loop for a while with the given operator lines queued up.
    async fn run_for(
        client: Arc<ApiClient<FakeTransport>>,
        dashboard: &mut Dashboard,
        config: &AppConfig,
        input: &[&str],
    ) {
        let (tx, rx) = mpsc::channel(16);
        for line in input {
            tx.send(line.to_string()).await.unwrap();
        }
        drop(tx);

        let elapsed = tokio::time::timeout(Duration::from_millis(250), poll_loop(client, dashboard, config, rx)).await;
        assert!(elapsed.is_err(), "the poll loop only ends when dropped");
    }

    #[tokio::test]
    async fn test_poll_loop_renders_snapshots() {
        let config = fast_config();
        let client = Arc::new(ApiClient::new(
            FakeTransport::serving(fixtures::snapshot_json(4, 11, 2)),
            ROOT,
        ));
        let mut dashboard = Dashboard::new(&config.layout).unwrap();

        run_for(Arc::clone(&client), &mut dashboard, &config, &[]).await;

        let gets = client.transport().gets();
        assert!(gets.len() > 1);
        assert!(gets.iter().all(|url| url == ROOT));
        assert_eq!(dashboard.freshness(), Freshness::Live);
        assert_eq!(dashboard.page().by_id("position").unwrap().text(), "3.10mm");
    }

    #[tokio::test]
    async fn test_operator_lines_become_requests() {
        let config = fast_config();
        let client = Arc::new(ApiClient::new(
            FakeTransport::serving(fixtures::snapshot_json(4, 11, 2)),
            ROOT,
        ));
        let mut dashboard = Dashboard::new(&config.layout).unwrap();

        run_for(
            Arc::clone(&client),
            &mut dashboard,
            &config,
            &["quad 0 1", "fan abc", "quad 9 0", "help", "", "fan 42.5"],
        )
        .await;

        // Each command is its own task, so completion order is not fixed.
        let puts = client.transport().puts();
        assert_eq!(puts.len(), 2);
        assert!(puts.contains(&(format!("{ROOT}quad/quads/0/channels/1"), json!({"enabled": false}))));
        assert!(puts.contains(&(format!("{ROOT}fan"), json!({"target": 42.5}))));
    }

    #[tokio::test]
    async fn test_unreachable_server_marks_page_stale() {
        let config = fast_config();
        let client = Arc::new(ApiClient::new(FakeTransport::default(), ROOT));
        let mut dashboard = Dashboard::new(&config.layout).unwrap();

        run_for(Arc::clone(&client), &mut dashboard, &config, &[]).await;

        assert_eq!(dashboard.freshness(), Freshness::Stale);
        // Only the data-status cell was ever written.
        assert_eq!(dashboard.page().writes(), 1);
    }

    #[tokio::test]
    async fn test_poll_once() {
        let config = AppConfig::default();
        let mut dashboard = Dashboard::new(&config.layout).unwrap();

        let client = ApiClient::new(FakeTransport::serving(fixtures::snapshot_json(4, 11, 2)), ROOT);
        poll_once(&client, &mut dashboard, &config).await.unwrap();
        assert_eq!(client.transport().gets().len(), 1);
        assert!(dashboard.page().to_text().contains("Live"));

        let mut doc = fixtures::snapshot_json(4, 11, 2);
        doc.as_object_mut().unwrap().remove("armed");
        let client = ApiClient::new(FakeTransport::serving(doc), ROOT);
        assert!(poll_once(&client, &mut dashboard, &config).await.is_err());
        assert_eq!(dashboard.freshness(), Freshness::Mismatch);
    }
}

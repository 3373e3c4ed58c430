//! Replay of recorded gateway dispatches.

use std::path::Path;

use harbor_gateway::{Client, ClientOptions, GatewayDispatch, ShardManager};
use miette::Result;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

/// What a replay did to the client.
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    /// Dispatches routed to an action.
    pub handled: usize,
    /// Dispatches with no registered action.
    pub ignored: usize,
    /// Dispatches that failed (only with `--keep-going`).
    pub failed: usize,
    /// Client event names in emission order.
    pub events: Vec<&'static str>,
    /// Id of the session user.
    pub user: Option<String>,
    /// Guild store view (ids in insertion order).
    pub guilds: Value,
    /// User store view (ids in insertion order).
    pub users: Value,
}

/// Parse newline-delimited dispatches. Blank lines are skipped.
pub fn parse_dispatches(contents: &str) -> Result<Vec<GatewayDispatch>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| miette::miette!("line {}: invalid dispatch: {}", i + 1, e))
        })
        .collect()
}

/// Replay the dispatches in `path` through a fresh client.
pub async fn run(
    path: &Path,
    options: ClientOptions,
    shards: u32,
    keep_going: bool,
) -> Result<ReplaySummary> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
    let dispatches = parse_dispatches(&contents)?;

    info!(
        file = %path.display(),
        dispatches = dispatches.len(),
        shards,
        "starting replay"
    );

    let mut client = Client::new(options).with_shards(ShardManager::spawn_all(shards));
    let mut rx = client.subscribe();
    let listener = tokio::spawn(async move {
        let mut names = Vec::new();
        loop {
            match rx.recv().await {
                Ok(event) => {
                    info!(event = event.name(), "client event");
                    names.push(event.name());
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        names
    });

    let (mut handled, mut ignored, mut failed) = (0, 0, 0);
    for dispatch in dispatches {
        let event = dispatch.t.clone();
        match client.dispatch(dispatch) {
            Ok(true) => handled += 1,
            Ok(false) => ignored += 1,
            Err(e) if keep_going => {
                warn!(event = %event, error = %e, "dispatch failed, continuing");
                failed += 1;
            }
            Err(e) => return Err(miette::miette!("{} dispatch failed: {}", event, e)),
        }
    }

    let to_json = |value: serde_json::Result<Value>| {
        value.map_err(|e| miette::miette!("failed to serialize store: {}", e))
    };
    let user = client.user().map(|u| u.id.clone());
    let guilds = to_json(serde_json::to_value(client.guilds()))?;
    let users = to_json(serde_json::to_value(client.users()))?;

    // Dropping the client closes the event channel and ends the listener
    drop(client);
    let events = listener
        .await
        .map_err(|e| miette::miette!("event listener failed: {}", e))?;

    info!(handled, ignored, failed, "replay finished");

    Ok(ReplaySummary {
        handled,
        ignored,
        failed,
        events,
        user,
        guilds,
        users,
    })
}

//! Periodic logging of the published state.

use keyasio_memory::{SnapshotView, StateSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Log the snapshot every `interval` until the task is aborted.
pub async fn report_snapshots(snapshot: Arc<StateSnapshot>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    let mut previous = SnapshotView::default();

    loop {
        ticker.tick().await;
        let current = snapshot.capture();
        log_changes(&previous, &current);
        previous = current;
    }
}

fn log_changes(previous: &SnapshotView, current: &SnapshotView) {
    if previous.status != current.status {
        info!("Status: {} -> {}", previous.status, current.status);
    }
    if previous.player_name != current.player_name {
        info!("Player: {}", current.player_name.as_deref().unwrap_or("<none>"));
    }
    if previous.mods != current.mods {
        info!("Mods: {}", current.mods);
    }
    if previous.beatmap != current.beatmap {
        if let Some(beatmap) = &current.beatmap {
            info!("Beatmap: {}", beatmap.path().display());
        }
    }

    debug!(
        "time={}ms combo={} score={} replay={}",
        current.playing_time, current.combo, current.score, current.is_replay
    );
}

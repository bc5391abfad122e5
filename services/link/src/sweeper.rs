use std::time::Duration;

use tracing::{error, info};

use crate::state::AppState;

/// Run the expired-code sweep as a background task.
///
/// Ticks on a fixed period in the serving process. Each pass deletes
/// expired durable rows, then expired mirror entries; the mirror's lock is
/// only held for the duration of its own delete, so request traffic is
/// never blocked behind a sweep.
pub async fn run_code_sweeper(state: AppState, period: Duration) {
    info!(period_secs = period.as_secs(), "starting link code sweeper");

    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;

        match state.code_lifecycle().sweep().await {
            Ok(stats) => {
                if stats.durable_evicted > 0 || stats.mirror_evicted > 0 {
                    info!(
                        durable = stats.durable_evicted,
                        mirror = stats.mirror_evicted,
                        "evicted expired link codes"
                    );
                }
            }
            Err(e) => error!(error = %e, "link code sweep failed"),
        }
    }
}

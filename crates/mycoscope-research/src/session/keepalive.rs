//! Keep-alive probe task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

use crate::protocol::Command;

use super::types::Outbound;

/// Owns the probe task; dropping it stops the probes.
///
/// The task also ends on its own once the connection's command channel
/// closes, so a remote close never leaves a timer behind.
#[derive(Debug)]
pub(crate) struct KeepAlive {
    handle: JoinHandle<()>,
}

impl KeepAlive {
    pub(crate) fn start(command_tx: mpsc::Sender<Outbound>, period: Duration) -> Self {
        Self {
            handle: tokio::spawn(keepalive_task(command_tx, period)),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn keepalive_task(command_tx: mpsc::Sender<Outbound>, period: Duration) {
    // First probe one full period after arming.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if command_tx.send(Outbound::Send(Command::Ping)).await.is_err() {
                    break;
                }
            }
            _ = command_tx.closed() => break,
        }
    }
    trace!("connection gone, keep-alive stopping");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn probes_every_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _keepalive = KeepAlive::start(tx, Duration::from_secs(30));
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_secs(1)).await;
        let first = rx.recv().await.unwrap();
        assert!(matches!(first, Outbound::Send(Command::Ping)));

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(matches!(rx.recv().await.unwrap(), Outbound::Send(Command::Ping)));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_probes() {
        let (tx, mut rx) = mpsc::channel(8);
        let keepalive = KeepAlive::start(tx, Duration::from_secs(1));
        drop(keepalive);

        tokio::time::advance(Duration::from_secs(5)).await;
        // The aborted task dropped its sender.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn stops_as_soon_as_connection_channel_closes() {
        let (tx, rx) = mpsc::channel(8);
        let keepalive = KeepAlive::start(tx, Duration::from_secs(30));
        tokio::task::yield_now().await;
        assert!(keepalive.is_running());

        drop(rx);
        // Well inside the first period; the clock is not advanced.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!keepalive.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_connection_channel_closes() {
        let (tx, rx) = mpsc::channel(8);
        let keepalive = KeepAlive::start(tx, Duration::from_secs(1));
        tokio::task::yield_now().await;
        drop(rx);

        tokio::time::advance(Duration::from_secs(2)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!keepalive.is_running());
    }
}

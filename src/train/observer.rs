use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::math::matrix::Scalar;
use crate::network::network::Network;

/// Receives notifications from `Network::train`.
///
/// Callbacks run synchronously on the training thread, after the weights for
/// the current example have been committed. Implementations that need to
/// reach another thread (a UI, a web handler) must forward the values
/// themselves, e.g. with [`ChannelObserver`].
pub trait TrainingObserver {
    /// Aggregate error of a completed epoch.
    fn on_error(&mut self, _network: &Network, _error: Scalar) {}

    /// Fraction of the current epoch completed, in `[0, 1]`.
    fn on_progress(&mut self, _network: &Network, _progress: Scalar) {}

    /// Fraction of the whole run completed, in `[0, 1]`.
    fn on_overall_progress(&mut self, _network: &Network, _progress: Scalar) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {}

/// Logs epoch errors at `info` and progress at `trace`.
#[derive(Debug, Default)]
pub struct TracingObserver {
    epoch: usize,
    last_error: Option<Scalar>,
}

impl TracingObserver {
    pub fn new() -> Self {
        TracingObserver::default()
    }

    /// Error reported for the most recent completed epoch.
    pub fn last_error(&self) -> Option<Scalar> {
        self.last_error
    }
}

impl TrainingObserver for TracingObserver {
    fn on_error(&mut self, _network: &Network, error: Scalar) {
        self.epoch += 1;
        match self.last_error {
            Some(previous) => info!(epoch = self.epoch, error, delta = error - previous, "epoch complete"),
            None => info!(epoch = self.epoch, error, "epoch complete"),
        }
        self.last_error = Some(error);
    }

    fn on_progress(&mut self, _network: &Network, progress: Scalar) {
        trace!(progress, "epoch progress");
    }

    fn on_overall_progress(&mut self, _network: &Network, progress: Scalar) {
        trace!(progress, "overall progress");
    }
}

/// One notification forwarded by [`ChannelObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrainingEvent {
    /// `epoch` is 1-based.
    Error { epoch: usize, error: Scalar },
    Progress { progress: Scalar },
    OverallProgress { progress: Scalar },
}

/// Forwards notifications over an `mpsc` channel.
///
/// If the receiver has been dropped the observer cancels the network, so
/// training stops at its next check point.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: mpsc::Sender<TrainingEvent>,
    epoch: usize,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<TrainingEvent>) -> Self {
        ChannelObserver { tx, epoch: 0 }
    }

    fn send(&self, network: &Network, event: TrainingEvent) {
        if self.tx.send(event).is_err() {
            debug!("training event receiver dropped, cancelling");
            network.cancel();
        }
    }
}

impl TrainingObserver for ChannelObserver {
    fn on_error(&mut self, network: &Network, error: Scalar) {
        self.epoch += 1;
        self.send(network, TrainingEvent::Error { epoch: self.epoch, error });
    }

    fn on_progress(&mut self, network: &Network, progress: Scalar) {
        self.send(network, TrainingEvent::Progress { progress });
    }

    fn on_overall_progress(&mut self, network: &Network, progress: Scalar) {
        self.send(network, TrainingEvent::OverallProgress { progress });
    }
}

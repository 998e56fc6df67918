//! Launch queue and consumer: the handoff that keeps process spawning off
//! the tap thread.

use std::{io, process::Command, thread};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, warn};

use crate::{error::LaunchError, mapping::LaunchTarget};

/// Producer half of the launch queue.
///
/// Unbounded: `enqueue` never blocks and never fails observably, which is
/// what keeps the tap callback O(1). A human can produce at most a few
/// requests a second while the consumer drains as fast as the spawn call
/// forks, so an unbounded buffer costs nothing in practice.
#[derive(Clone)]
pub struct LaunchQueue {
    tx: Sender<LaunchTarget>,
}

impl LaunchQueue {
    /// Create the queue, returning the producer and the consumer's receiver.
    pub fn new() -> (Self, Receiver<LaunchTarget>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Hand a target to the consumer. A disconnected consumer (process is
    /// tearing down) is logged and the request dropped.
    pub fn enqueue(&self, target: LaunchTarget) {
        if self.tx.send(target).is_err() {
            warn!("launch_consumer_gone_dropping_request");
        }
    }
}

/// Spawns an application by opaque identifier, fire and forget.
///
/// Implementations only guarantee that the spawn call itself returned; they
/// never wait on the launched application or observe its exit.
pub trait Launcher: Send + 'static {
    /// Start the application identified by `target`.
    fn launch(&self, target: &LaunchTarget) -> Result<(), LaunchError>;
}

/// LaunchServices-backed launcher: `open -b <bundle-id>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenLauncher;

impl Launcher for OpenLauncher {
    fn launch(&self, target: &LaunchTarget) -> Result<(), LaunchError> {
        // Spawn and forget; LaunchServices does the actual work. The child
        // handle is dropped deliberately so we never reap or wait.
        Command::new("open")
            .arg("-b")
            .arg(target.as_str())
            .spawn()
            .map(drop)
            .map_err(|source| LaunchError::SpawnFailed {
                target: target.as_str().to_string(),
                source,
            })
    }
}

/// Start the launch-consumer thread.
///
/// The loop blocks on the queue, launches each request as it arrives, and
/// logs (rather than propagates) spawn failures. It exits only when every
/// producer handle has been dropped; in normal operation that is process
/// teardown, and no queue drain is guaranteed at that point.
pub fn spawn_consumer<L: Launcher>(
    rx: Receiver<LaunchTarget>,
    launcher: L,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("launch-consumer".into())
        .spawn(move || {
            while let Ok(target) = rx.recv() {
                debug!(target = %target, "launching");
                if let Err(e) = launcher.launch(&target) {
                    warn!(error = %e, "launch_failed");
                }
            }
            debug!("launch_consumer_exited");
        })
}

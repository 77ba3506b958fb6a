use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::window::{WindowController, WindowStateTransport};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Handle to the repeating poll. Stopping or dropping it cancels the timer;
/// polls already started still complete and apply their result.
#[must_use = "dropping the timer stops polling"]
#[derive(Debug)]
pub struct PollTimer {
    task: JoinHandle<()>,
}

impl PollTimer {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T: WindowStateTransport + 'static> WindowController<T> {
    /// Polls right away, then every `every` until the returned timer goes away.
    pub fn start(&self, every: Duration) -> PollTimer {
        let controller = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                debug!("scheduled window state poll");

                let controller = controller.clone();
                tokio::spawn(async move { controller.poll().await });
            }
        });

        PollTimer { task }
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Per-question countdown.
//!
//! The countdown runs as a tokio task and reports over an unbounded channel.
//! Starting a new countdown aborts the previous task, and every event carries
//! the token it was started with so the receiver can drop late arrivals.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::quiz::TimerToken;

/// Event emitted by a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Periodic refresh with the time left
    Tick {
        token: TimerToken,
        remaining: Duration,
    },
    /// The time limit elapsed
    Expired { token: TimerToken },
}

impl TimerEvent {
    /// Token the countdown was started with
    pub fn token(&self) -> TimerToken {
        match *self {
            TimerEvent::Tick { token, .. } | TimerEvent::Expired { token } => token,
        }
    }
}

/// Cancellable countdown owning at most one timer task
#[derive(Debug)]
pub struct Countdown {
    sender: UnboundedSender<TimerEvent>,
    task: Option<JoinHandle<()>>,
    token: Option<TimerToken>,
}

impl Countdown {
    /// Create an idle countdown reporting to `sender`
    pub fn new(sender: UnboundedSender<TimerEvent>) -> Self {
        Self {
            sender,
            task: None,
            token: None,
        }
    }

    /// Token of the running countdown, if any
    pub fn token(&self) -> Option<TimerToken> {
        self.token
    }

    /// Whether a countdown task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start counting down `limit` for `token`, replacing any running countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, token: TimerToken, limit: Duration, tick: Duration) {
        self.cancel();
        debug!(?token, ?limit, "countdown started");

        let sender = self.sender.clone();
        self.task = Some(tokio::spawn(run(token, limit, tick, sender)));
        self.token = Some(token);
    }

    /// Stop the running countdown without emitting anything further
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            trace!(token = ?self.token, "countdown cancelled");
        }
        self.token = None;
    }

    /// Make the running countdown match `token`.
    ///
    /// Restarts when the token changed, cancels when there is nothing to
    /// time, and leaves a matching countdown alone.
    pub fn sync(&mut self, token: Option<TimerToken>, limit: Option<Duration>, tick: Duration) {
        if token == self.token {
            return;
        }
        match (token, limit) {
            (Some(token), Some(limit)) => self.start(token, limit, tick),
            _ => self.cancel(),
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(token: TimerToken, limit: Duration, tick: Duration, sender: UnboundedSender<TimerEvent>) {
    let deadline = Instant::now() + limit;

    loop {
        let wake = (Instant::now() + tick).min(deadline);
        time::sleep_until(wake).await;

        let now = Instant::now();
        if now >= deadline {
            let _ = sender.send(TimerEvent::Expired { token });
            return;
        }

        let remaining = deadline - now;
        if sender.send(TimerEvent::Tick { token, remaining }).is_err() {
            return;
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application-context hops for user callbacks.
//!
//! ## Overview
//!
//! Recognition runs on the render context, in lockstep with frame ticks and pointer delivery.
//! User callbacks (`on_tap`, `on_long_press`, ...) run on the application context. The arbiter
//! never calls a callback directly; it [`post`](AppContext::post)s a [`Task`] and moves on.
//!
//! Every hop is fire-and-forget and order-preserving: tasks posted from one render context
//! run in posting order.
//!
//! Two hops are provided:
//! - [`QueuedContext`]: a single-thread queue that the embedder drains with
//!   [`run_pending`](QueuedContext::run_pending), for example once per event-loop turn.
//! - [`ChannelContext`]: an `mpsc` sender whose [`AppReceiver`] may live on another thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc;

/// A user callback shared between bindings.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// A unit of work posted to the application context.
pub type Task = Box<dyn FnOnce() + Send>;

/// A destination for work that must run off the render context.
pub trait AppContext {
    /// Schedule `task`. Must not run it synchronously and must not block.
    fn post(&self, task: Task);
}

impl<T: AppContext + ?Sized> AppContext for &T {
    fn post(&self, task: Task) {
        (**self).post(task);
    }
}

impl<T: AppContext + ?Sized> AppContext for Rc<T> {
    fn post(&self, task: Task) {
        (**self).post(task);
    }
}

impl<T: AppContext + ?Sized> AppContext for Arc<T> {
    fn post(&self, task: Task) {
        (**self).post(task);
    }
}

/// Post a clone of `callback` to `ctx`.
pub(crate) fn post_callback(ctx: &impl AppContext, callback: &Callback) {
    let callback = Arc::clone(callback);
    ctx.post(Box::new(move || callback()));
}

/// Single-thread FIFO of pending tasks.
#[derive(Default)]
pub struct QueuedContext {
    queue: RefCell<VecDeque<Task>>,
}

impl core::fmt::Debug for QueuedContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueuedContext")
            .field("pending", &self.pending())
            .finish()
    }
}

impl QueuedContext {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every pending task in posting order, including tasks posted while draining.
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the borrow before running so tasks may post more work.
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                return ran;
            };
            task();
            ran += 1;
        }
    }
}

impl AppContext for QueuedContext {
    fn post(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }
}

/// Sending half of a channel-backed application context.
#[derive(Clone, Debug)]
pub struct ChannelContext {
    tx: mpsc::Sender<Task>,
}

/// Receiving half of a channel-backed application context.
#[derive(Debug)]
pub struct AppReceiver {
    rx: mpsc::Receiver<Task>,
}

impl ChannelContext {
    /// Create a connected context/receiver pair.
    pub fn channel() -> (Self, AppReceiver) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, AppReceiver { rx })
    }
}

impl AppContext for ChannelContext {
    fn post(&self, task: Task) {
        if self.tx.send(task).is_err() {
            log::warn!("application context is gone; dropping callback");
        }
    }
}

impl AppReceiver {
    /// Run every task that has already arrived, without waiting.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Run tasks as they arrive until every [`ChannelContext`] clone has been dropped.
    pub fn run_until_closed(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.recv() {
            task();
            ran += 1;
        }
        ran
    }
}

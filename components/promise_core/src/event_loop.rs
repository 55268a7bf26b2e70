//! Event loop implementation.
//!
//! This module provides the single-threaded scheduler promises run on. Every
//! promise keeps a handle to the loop it was created on and queues its jobs
//! there; nothing a promise does runs on the caller's stack after the
//! executor returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{trace, warn};

use crate::config::EventLoopConfig;
use crate::error::RuntimeError;
use crate::task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};

/// The event loop.
///
/// `EventLoop` is a cheap handle: clones share the same queues. Each
/// iteration (cycle) of the loop:
/// 1. Takes the oldest task from the task queue and executes it
/// 2. Drains all microtasks in the microtask queue, one turn per microtask
/// 3. Repeats
///
/// # Examples
///
/// ```
/// use promise_core::{EventLoop, MicroTask, Task};
/// use core_types::Value;
///
/// let event_loop = EventLoop::new();
///
/// event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
/// event_loop.enqueue_microtask(MicroTask::new(|| {}));
/// event_loop.run_until_done().unwrap();
/// assert_eq!(event_loop.turns(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    inner: Rc<EventLoopInner>,
}

#[derive(Debug, Default)]
struct EventLoopInner {
    config: EventLoopConfig,
    task_queue: RefCell<TaskQueue>,
    microtask_queue: RefCell<MicrotaskQueue>,
    turns: Cell<u64>,
    next_promise_id: Cell<u64>,
}

impl EventLoop {
    /// Creates a new EventLoop with empty queues and the default config.
    pub fn new() -> Self {
        Self::with_config(EventLoopConfig::default())
    }

    /// Creates a new EventLoop with the given config.
    pub fn with_config(config: EventLoopConfig) -> Self {
        Self {
            inner: Rc::new(EventLoopInner {
                config,
                ..EventLoopInner::default()
            }),
        }
    }

    /// Returns the config this loop was created with.
    pub fn config(&self) -> &EventLoopConfig {
        &self.inner.config
    }

    /// Runs the event loop until all tasks and microtasks are processed.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all work completed, or the first [`RuntimeError`]. On error
    /// the remaining work stays queued.
    pub fn run_until_done(&self) -> Result<(), RuntimeError> {
        while !self.is_task_queue_empty() || !self.is_microtask_queue_empty() {
            self.process_one_cycle()?;
        }
        Ok(())
    }

    /// Adds a task to the task queue.
    ///
    /// The task will be executed in the next available iteration of the event loop.
    pub fn enqueue_task(&self, task: Task) {
        self.inner.task_queue.borrow_mut().enqueue(task);
    }

    /// Adds a microtask to the microtask queue.
    ///
    /// The microtask will run on a later turn, after everything queued before it.
    pub fn enqueue_microtask(&self, microtask: MicroTask) {
        self.inner.microtask_queue.borrow_mut().enqueue(microtask);
    }

    /// Returns true if the task queue is empty.
    pub fn is_task_queue_empty(&self) -> bool {
        self.inner.task_queue.borrow().is_empty()
    }

    /// Returns true if the microtask queue is empty.
    pub fn is_microtask_queue_empty(&self) -> bool {
        self.inner.microtask_queue.borrow().is_empty()
    }

    /// Total number of microtasks run by this loop so far.
    pub fn turns(&self) -> u64 {
        self.inner.turns.get()
    }

    /// Runs all microtasks in the queue until empty.
    ///
    /// This drains the microtask queue completely. New microtasks added during
    /// execution will also be processed before this method returns, subject to
    /// the configured `max_turns` budget.
    pub fn run_all_microtasks(&self) -> Result<(), RuntimeError> {
        let mut ran = 0usize;
        loop {
            if self.is_microtask_queue_empty() {
                return Ok(());
            }
            if let Some(limit) = self.inner.config.max_turns {
                if ran >= limit {
                    warn!("event loop stopped after {} microtasks in one drain", limit);
                    return Err(RuntimeError::TurnLimitExceeded { limit });
                }
            }

            // The queue borrow ends here: the microtask may enqueue more work.
            let next = self.inner.microtask_queue.borrow_mut().dequeue();
            if let Some(microtask) = next {
                microtask.run();
                ran += 1;
                self.inner.turns.set(self.inner.turns.get() + 1);
            }
        }
    }

    /// Runs all tasks in the queue (without processing microtasks between them).
    ///
    /// This is primarily for testing purposes.
    pub fn run_all_tasks(&self) -> Result<(), RuntimeError> {
        while let Some(task) = self.next_task() {
            task.run().map_err(RuntimeError::Task)?;
        }
        Ok(())
    }

    /// Processes one complete cycle: one task followed by all microtasks.
    ///
    /// This represents one iteration of the event loop.
    pub fn process_one_cycle(&self) -> Result<(), RuntimeError> {
        if let Some(task) = self.next_task() {
            trace!("running task");
            task.run().map_err(RuntimeError::Task)?;
        }

        self.run_all_microtasks()
    }

    pub(crate) fn next_promise_id(&self) -> u64 {
        let id = self.inner.next_promise_id.get() + 1;
        self.inner.next_promise_id.set(id);
        id
    }

    fn next_task(&self) -> Option<Task> {
        self.inner.task_queue.borrow_mut().dequeue()
    }
}

//! Promise implementation following the Promise/A+ specification.
//!
//! This module provides the promise type, its executor-based constructor and
//! continuation registration (`then`, `catch`, `finally`). The settlement and
//! adoption algorithm lives in [`crate::settlement`]; the static helpers in
//! [`crate::combinators`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use core_types::{arg, Function, JsError, JsObject, JsResult, Value};
use log::trace;

use crate::event_loop::EventLoop;
use crate::settlement::Capability;
use crate::task_queue::MicroTask;

/// The state of a Promise.
///
/// Once settled (Fulfilled or Rejected), a Promise cannot change state.
/// Only tests look at it; callers observe outcomes through continuations.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromiseState {
    /// The initial state; the promise is neither fulfilled nor rejected.
    Pending,
    /// The promise has been resolved with a value.
    Fulfilled,
    /// The promise has been rejected with a reason.
    Rejected,
}

/// The outcome of a settled promise.
#[derive(Debug, Clone)]
pub(crate) enum Settlement {
    Fulfilled(Value),
    Rejected(Value),
}

/// A reaction to be triggered when a Promise settles.
///
/// This represents the handlers registered via `.then()`, together with the
/// capability of the promise `.then()` returned.
pub(crate) struct PromiseReaction {
    capability: Capability,
    on_fulfilled: Option<Function>,
    on_rejected: Option<Function>,
}

impl PromiseReaction {
    /// Runs the matching handler and feeds its outcome to the derived promise.
    fn run(self, settlement: Settlement) {
        let outcome = match settlement {
            Settlement::Fulfilled(value) => match &self.on_fulfilled {
                Some(handler) => handler.call1(value),
                None => Ok(value),
            },
            Settlement::Rejected(reason) => match &self.on_rejected {
                Some(handler) => handler.call1(reason),
                None => Err(reason),
            },
        };
        match outcome {
            Ok(value) => self.capability.resolve(value),
            Err(reason) => self.capability.reject(reason),
        }
    }
}

/// Reactions only exist while pending; settling swaps them for the outcome.
enum Slot {
    Pending(Vec<PromiseReaction>),
    Settled(Settlement),
}

pub(crate) struct PromiseCell {
    id: u64,
    event_loop: EventLoop,
    slot: RefCell<Slot>,
    this: Weak<PromiseCell>,
}

/// A single-value, write-once asynchronous container.
///
/// A `Promise` is a shared handle: clones refer to the same promise. Its
/// outcome can only be observed through continuations, which always run on a
/// later turn of the [`EventLoop`] it was created on.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use core_types::{Function, Value};
/// use promise_core::{EventLoop, Promise};
///
/// let event_loop = EventLoop::new();
/// let promise = Promise::new(&event_loop, |resolve, _reject| {
///     resolve.call1(Value::Smi(41))?;
///     Ok(())
/// });
///
/// let seen = Rc::new(RefCell::new(None));
/// let s = seen.clone();
/// promise
///     .then(
///         Some(Function::new(|args| match args.first() {
///             Some(Value::Smi(n)) => Ok(Value::Smi(n + 1)),
///             _ => Ok(Value::Undefined),
///         })),
///         None,
///     )
///     .on_settled(move |outcome| *s.borrow_mut() = Some(outcome));
///
/// assert!(seen.borrow().is_none());
/// event_loop.run_until_done().unwrap();
/// assert_eq!(*seen.borrow(), Some(Ok(Value::Smi(42))));
/// ```
#[derive(Clone)]
pub struct Promise {
    cell: Rc<PromiseCell>,
}

/// A pending promise together with its resolve/reject capabilities.
#[derive(Debug, Clone)]
pub struct Deferred {
    /// The pending promise
    pub promise: Promise,
    /// Resolves `promise` (adopting thenables); first call of either wins
    pub resolve: Function,
    /// Rejects `promise`; first call of either wins
    pub reject: Function,
}

impl Promise {
    /// Creates a promise and runs `executor` synchronously with its resolve
    /// and reject capabilities.
    ///
    /// If the executor returns `Err`, the thrown value goes to `reject`, which
    /// is a no-op when a capability was already used.
    pub fn new<F>(event_loop: &EventLoop, executor: F) -> Promise
    where
        F: FnOnce(Function, Function) -> JsResult<()>,
    {
        let (promise, capability) = Self::with_capability(event_loop);
        let (resolve, reject) = capability.functions();
        if let Err(thrown) = executor(resolve, reject) {
            trace!("promise #{} executor threw", promise.id());
            capability.reject(thrown);
        }
        promise
    }

    /// Creates a promise from a dynamic executor value.
    ///
    /// # Errors
    ///
    /// Returns a `TypeError` if `executor` is not callable; no promise is created.
    pub fn construct(event_loop: &EventLoop, executor: &Value) -> Result<Promise, JsError> {
        let executor = executor
            .as_function()
            .cloned()
            .ok_or_else(|| JsError::type_error("Promise resolver is not a function"))?;
        Ok(Self::new(event_loop, move |resolve, reject| {
            executor.call(&[resolve.into(), reject.into()]).map(drop)
        }))
    }

    /// Creates a pending promise and hands out its capabilities.
    pub fn deferred(event_loop: &EventLoop) -> Deferred {
        let (promise, capability) = Self::with_capability(event_loop);
        let (resolve, reject) = capability.functions();
        Deferred {
            promise,
            resolve,
            reject,
        }
    }

    /// Adds handlers for fulfillment and/or rejection.
    ///
    /// Missing handlers pass the value through (fulfillment) or re-throw the
    /// reason (rejection). Returns a new promise resolved with whatever the
    /// invoked handler returns, or rejected with whatever it throws.
    pub fn then(&self, on_fulfilled: Option<Function>, on_rejected: Option<Function>) -> Promise {
        let (derived, capability) = Self::with_capability(&self.cell.event_loop);
        let reaction = PromiseReaction {
            capability,
            on_fulfilled,
            on_rejected,
        };

        let settled = match &*self.cell.slot.borrow() {
            Slot::Settled(settlement) => Some(settlement.clone()),
            Slot::Pending(_) => None,
        };
        match settled {
            Some(settlement) => self.schedule_reaction(reaction, settlement),
            None => {
                if let Slot::Pending(reactions) = &mut *self.cell.slot.borrow_mut() {
                    reactions.push(reaction);
                }
            }
        }
        derived
    }

    /// Sugar for `then(None, Some(on_rejected))`.
    pub fn catch(&self, on_rejected: Function) -> Promise {
        self.then(None, Some(on_rejected))
    }

    /// Runs `on_finally` (with no arguments) once this promise settles,
    /// without changing the outcome.
    ///
    /// The original value or reason is passed on once whatever `on_finally`
    /// returned has settled. If `on_finally` throws, or returns a thenable
    /// that rejects, that becomes the new rejection reason.
    pub fn finally(&self, on_finally: Function) -> Promise {
        let event_loop = self.cell.event_loop.clone();
        let after_fulfilled = {
            let (event_loop, on_finally) = (event_loop.clone(), on_finally.clone());
            Function::new(move |args| {
                let value = arg(args, 0);
                let returned = on_finally.call(&[])?;
                let passed_on = Promise::resolve(&event_loop, returned)
                    .then(Some(Function::constant(value)), None);
                Ok(passed_on.into())
            })
        };
        let after_rejected = Function::new(move |args| {
            let reason = arg(args, 0);
            let returned = on_finally.call(&[])?;
            let passed_on = Promise::resolve(&event_loop, returned)
                .then(Some(Function::thrower(reason)), None);
            Ok(passed_on.into())
        });
        self.then(Some(after_fulfilled), Some(after_rejected))
    }

    /// Calls `f` once with the outcome: `Ok(value)` or `Err(reason)`.
    ///
    /// Returns the promise of the underlying `then`, fulfilled with
    /// `Undefined` after `f` ran.
    pub fn on_settled<F>(&self, f: F) -> Promise
    where
        F: FnOnce(Result<Value, Value>) + 'static,
    {
        let callback = Rc::new(Cell::new(Some(f)));
        let on_rejected = {
            let callback = callback.clone();
            Function::new(move |args| {
                if let Some(f) = callback.take() {
                    f(Err(arg(args, 0)));
                }
                Ok(Value::Undefined)
            })
        };
        let on_fulfilled = Function::new(move |args| {
            if let Some(f) = callback.take() {
                f(Ok(arg(args, 0)));
            }
            Ok(Value::Undefined)
        });
        self.then(Some(on_fulfilled), Some(on_rejected))
    }

    /// The event loop this promise schedules its jobs on.
    pub fn event_loop(&self) -> &EventLoop {
        &self.cell.event_loop
    }

    /// Numeric id, unique per event loop. Only used for diagnostics.
    pub fn id(&self) -> u64 {
        self.cell.id
    }

    /// Returns true if `obj` is this promise.
    pub(crate) fn is_same_object(&self, obj: &Rc<dyn JsObject>) -> bool {
        Rc::as_ptr(obj) as *const () == Rc::as_ptr(&self.cell) as *const ()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> PromiseState {
        match &*self.cell.slot.borrow() {
            Slot::Pending(_) => PromiseState::Pending,
            Slot::Settled(Settlement::Fulfilled(_)) => PromiseState::Fulfilled,
            Slot::Settled(Settlement::Rejected(_)) => PromiseState::Rejected,
        }
    }

    #[cfg(test)]
    pub(crate) fn result(&self) -> Option<Value> {
        match &*self.cell.slot.borrow() {
            Slot::Pending(_) => None,
            Slot::Settled(Settlement::Fulfilled(v)) | Slot::Settled(Settlement::Rejected(v)) => {
                Some(v.clone())
            }
        }
    }

    /// Creates a pending promise and the first capability pair bound to it.
    pub(crate) fn with_capability(event_loop: &EventLoop) -> (Promise, Capability) {
        let id = event_loop.next_promise_id();
        let cell = Rc::new_cyclic(|this| PromiseCell {
            id,
            event_loop: event_loop.clone(),
            slot: RefCell::new(Slot::Pending(Vec::new())),
            this: this.clone(),
        });
        trace!("promise #{} created", id);
        let promise = Promise { cell };
        let capability = Capability::new(promise.clone());
        (promise, capability)
    }

    /// Transitions out of PENDING and schedules every registered reaction.
    ///
    /// No-op if already settled.
    pub(crate) fn settle(&self, settlement: Settlement) {
        let reactions = {
            let mut slot = self.cell.slot.borrow_mut();
            let reactions = match &mut *slot {
                Slot::Pending(reactions) => std::mem::take(reactions),
                Slot::Settled(_) => return,
            };
            *slot = Slot::Settled(settlement.clone());
            reactions
        };

        trace!(
            "promise #{} {} with {} reaction(s)",
            self.id(),
            match settlement {
                Settlement::Fulfilled(_) => "fulfilled",
                Settlement::Rejected(_) => "rejected",
            },
            reactions.len()
        );
        for reaction in reactions {
            self.schedule_reaction(reaction, settlement.clone());
        }
    }

    fn schedule_reaction(&self, reaction: PromiseReaction, settlement: Settlement) {
        self.cell
            .event_loop
            .enqueue_microtask(MicroTask::new(move || reaction.run(settlement)));
    }
}

impl PromiseCell {
    fn handle(&self) -> Option<Promise> {
        self.this.upgrade().map(|cell| Promise { cell })
    }
}

/// A pending cell owns the cells of the promises derived from it, through the
/// capabilities in its reactions. Freeing a long chain is done with a work
/// list so it never recurses once per link.
impl Drop for PromiseCell {
    fn drop(&mut self) {
        let mut work = match self.slot.get_mut() {
            Slot::Pending(reactions) if !reactions.is_empty() => std::mem::take(reactions),
            _ => return,
        };
        while let Some(reaction) = work.pop() {
            let derived = reaction.capability.into_promise().cell;
            // Still referenced elsewhere: this drop is only a decrement.
            if let Ok(mut cell) = Rc::try_unwrap(derived) {
                if let Slot::Pending(reactions) = cell.slot.get_mut() {
                    work.append(reactions);
                }
            }
        }
    }
}

/// Promises are thenables: their `then`, `catch` and `finally` members are
/// bound functions, so foreign code (and adoption) can chain on them.
impl JsObject for PromiseCell {
    fn get(&self, key: &str) -> JsResult<Value> {
        let Some(promise) = self.handle() else {
            return Ok(Value::Undefined);
        };
        let method = match key {
            "then" => Function::new(move |args| {
                let on_fulfilled = arg(args, 0).as_function().cloned();
                let on_rejected = arg(args, 1).as_function().cloned();
                Ok(promise.then(on_fulfilled, on_rejected).into())
            }),
            "catch" => Function::new(move |args| {
                let on_rejected = arg(args, 0).as_function().cloned();
                Ok(promise.then(None, on_rejected).into())
            }),
            "finally" => Function::new(move |args| match arg(args, 0) {
                Value::Function(on_finally) => Ok(promise.finally(on_finally).into()),
                _ => Ok(promise.then(None, None).into()),
            }),
            _ => return Ok(Value::Undefined),
        };
        Ok(Value::Function(method))
    }

    fn class_name(&self) -> &'static str {
        "Promise"
    }
}

impl From<Promise> for Value {
    fn from(promise: Promise) -> Self {
        Value::Object(promise.cell)
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Promise #{}", self.cell.id)
    }
}

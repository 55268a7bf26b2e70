//! Unit tests for continuation ordering and asynchrony

use std::cell::RefCell;
use std::rc::Rc;

use core_types::{Function, Value};
use promise_core::{EventLoop, MicroTask, Promise};

use crate::support::recorder;

#[test]
fn continuations_on_settled_promise_run_later_in_order() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let promise = Promise::resolve(&event_loop, Value::Smi(1));

    promise.then(Some(recorder(&log, "A")), None);
    promise.then(Some(recorder(&log, "B")), None);
    log.borrow_mut().push("registered".to_string());

    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["registered", "A", "B"]);
}

#[test]
fn continuations_on_pending_promise_run_in_registration_order() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let deferred = Promise::deferred(&event_loop);

    for label in ["A", "B", "C"] {
        deferred.promise.then(Some(recorder(&log, label)), None);
    }
    event_loop.run_until_done().unwrap();
    assert!(log.borrow().is_empty());

    deferred.resolve.call1(Value::Null).unwrap();
    assert!(log.borrow().is_empty());
    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["A", "B", "C"]);
}

#[test]
fn rejection_handlers_run_in_registration_order() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let deferred = Promise::deferred(&event_loop);

    deferred.promise.then(None, Some(recorder(&log, "A")));
    deferred.promise.catch(recorder(&log, "B"));
    deferred.promise.then(Some(recorder(&log, "skipped")), None);

    deferred.reject.call1(Value::from("e")).unwrap();
    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["A", "B"]);
}

#[test]
fn each_continuation_gets_its_own_turn() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let promise = Promise::resolve(&event_loop, Value::Null);

    let (l, el) = (log.clone(), event_loop.clone());
    promise.then(
        Some(Function::new(move |_| {
            l.borrow_mut().push("A".to_string());
            let l = l.clone();
            el.enqueue_microtask(MicroTask::new(move || {
                l.borrow_mut().push("queued by A".to_string())
            }));
            Ok(Value::Undefined)
        })),
        None,
    );
    promise.then(Some(recorder(&log, "B")), None);

    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["A", "B", "queued by A"]);
}

#[test]
fn chained_continuations_interleave_across_promises() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let p1 = Promise::resolve(&event_loop, Value::Null);
    let p2 = Promise::resolve(&event_loop, Value::Null);

    p1.then(Some(recorder(&log, "p1-1")), None)
        .then(Some(recorder(&log, "p1-2")), None);
    p2.then(Some(recorder(&log, "p2-1")), None)
        .then(Some(recorder(&log, "p2-2")), None);

    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["p1-1", "p2-1", "p1-2", "p2-2"]);
}

#[test]
fn registering_from_a_continuation_runs_after_current_turn() {
    let event_loop = EventLoop::new();
    let log = Rc::new(RefCell::new(vec![]));
    let promise = Promise::resolve(&event_loop, Value::Null);

    let (l, p) = (log.clone(), promise.clone());
    promise.then(
        Some(Function::new(move |_| {
            p.then(Some(recorder(&l, "nested")), None);
            l.borrow_mut().push("outer".to_string());
            Ok(Value::Undefined)
        })),
        None,
    );

    event_loop.run_until_done().unwrap();
    assert_eq!(*log.borrow(), vec!["outer", "nested"]);
}

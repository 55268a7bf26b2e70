//! Unit tests for EventLoop

use std::cell::RefCell;
use std::rc::Rc;

use core_types::Value;
use promise_core::{EventLoop, EventLoopConfig, MicroTask, RuntimeError, Task};

#[test]
fn new_event_loop_has_empty_queues() {
    let event_loop = EventLoop::new();
    assert!(event_loop.is_task_queue_empty());
    assert!(event_loop.is_microtask_queue_empty());
    assert_eq!(event_loop.config(), &EventLoopConfig::default());
}

#[test]
fn enqueue_task_adds_to_task_queue() {
    let event_loop = EventLoop::new();
    event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
    assert!(!event_loop.is_task_queue_empty());
}

#[test]
fn enqueue_microtask_adds_to_microtask_queue() {
    let event_loop = EventLoop::new();
    event_loop.enqueue_microtask(MicroTask::new(|| {}));
    assert!(!event_loop.is_microtask_queue_empty());
}

#[test]
fn task_queue_fifo_order() {
    let event_loop = EventLoop::new();
    let results = Rc::new(RefCell::new(vec![]));

    for i in 1..=3 {
        let r = results.clone();
        event_loop.enqueue_task(Task::new(move || {
            r.borrow_mut().push(i);
            Ok(Value::Undefined)
        }));
    }

    event_loop.run_until_done().unwrap();
    assert_eq!(*results.borrow(), vec![1, 2, 3]);
}

#[test]
fn microtasks_drain_between_tasks() {
    let event_loop = EventLoop::new();
    let order = Rc::new(RefCell::new(vec![]));

    for label in ["T1", "T2"] {
        let (o, el) = (order.clone(), event_loop.clone());
        event_loop.enqueue_task(Task::new(move || {
            o.borrow_mut().push(label.to_string());
            let o = o.clone();
            el.enqueue_microtask(MicroTask::new(move || {
                o.borrow_mut().push(format!("{}-micro", label))
            }));
            Ok(Value::Undefined)
        }));
    }

    event_loop.run_until_done().unwrap();
    assert_eq!(
        *order.borrow(),
        vec!["T1", "T1-micro", "T2", "T2-micro"]
    );
}

#[test]
fn process_one_cycle_runs_one_task() {
    let event_loop = EventLoop::new();
    event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
    event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
    event_loop.process_one_cycle().unwrap();
    assert!(!event_loop.is_task_queue_empty());
    event_loop.process_one_cycle().unwrap();
    assert!(event_loop.is_task_queue_empty());
}

#[test]
fn run_all_tasks_skips_microtasks() {
    let event_loop = EventLoop::new();
    let el = event_loop.clone();
    event_loop.enqueue_task(Task::new(move || {
        el.enqueue_microtask(MicroTask::new(|| {}));
        Ok(Value::Undefined)
    }));
    event_loop.run_all_tasks().unwrap();
    assert!(event_loop.is_task_queue_empty());
    assert!(!event_loop.is_microtask_queue_empty());
}

#[test]
fn throwing_task_is_reported() {
    let event_loop = EventLoop::new();
    event_loop.enqueue_task(Task::new(|| Err(Value::from("uncaught"))));
    match event_loop.run_until_done() {
        Err(RuntimeError::Task(value)) => assert_eq!(value, Value::from("uncaught")),
        other => panic!("expected task error, got {:?}", other),
    }
}

#[test]
fn turn_limit_applies_per_drain() {
    let event_loop = EventLoop::with_config(EventLoopConfig::with_max_turns(2));
    for _ in 0..2 {
        event_loop.enqueue_microtask(MicroTask::new(|| {}));
    }
    event_loop.run_all_microtasks().unwrap();

    for _ in 0..2 {
        event_loop.enqueue_microtask(MicroTask::new(|| {}));
    }
    event_loop.run_all_microtasks().unwrap();
    assert_eq!(event_loop.turns(), 4);
}

#[test]
fn config_from_json() {
    let config = EventLoopConfig::from_json(r#"{"max_turns": 1}"#).unwrap();
    let event_loop = EventLoop::with_config(config);
    event_loop.enqueue_microtask(MicroTask::new(|| {}));
    event_loop.enqueue_microtask(MicroTask::new(|| {}));
    assert!(matches!(
        event_loop.run_all_microtasks(),
        Err(RuntimeError::TurnLimitExceeded { limit: 1 })
    ));
}

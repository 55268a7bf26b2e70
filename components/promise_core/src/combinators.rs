//! Static constructors and combinators: `resolve`, `reject`, `all`, `race`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use core_types::{arg, Function, JsError, Value};

use crate::event_loop::EventLoop;
use crate::promise::Promise;

impl Promise {
    /// Returns a promise resolved with `value`.
    ///
    /// This goes through the full resolve algorithm: a thenable `value` is
    /// adopted, so the result may still be pending or end up rejected.
    pub fn resolve(event_loop: &EventLoop, value: Value) -> Promise {
        Promise::new(event_loop, move |resolve, _| resolve.call1(value).map(drop))
    }

    /// Returns a promise rejected with `reason`.
    pub fn reject(event_loop: &EventLoop, reason: Value) -> Promise {
        Promise::new(event_loop, move |_, reject| reject.call1(reason).map(drop))
    }

    /// Waits for every element of `iterable` (an array).
    ///
    /// Fulfills with an array of results in input order, or rejects with the
    /// first rejection reason. Elements that are not thenables count as
    /// already fulfilled. A non-array argument yields a promise rejected with
    /// a `TypeError`.
    pub fn all(event_loop: &EventLoop, iterable: Value) -> Promise {
        let items = match iterable {
            Value::Array(items) => items,
            _ => {
                let err = JsError::type_error("Promise.all() only accepts an array");
                return Promise::reject(event_loop, err.into());
            }
        };
        if items.is_empty() {
            return Promise::resolve(event_loop, Value::Array(Vec::new()));
        }

        Promise::new(event_loop, |resolve, reject| {
            let results = Rc::new(RefCell::new(vec![Value::Undefined; items.len()]));
            let remaining = Rc::new(Cell::new(items.len()));

            for (index, item) in items.into_iter().enumerate() {
                let on_fulfilled = {
                    let (results, remaining, resolve) =
                        (results.clone(), remaining.clone(), resolve.clone());
                    Function::new(move |args| {
                        results.borrow_mut()[index] = arg(args, 0);
                        remaining.set(remaining.get() - 1);
                        if remaining.get() == 0 {
                            let values = results.borrow().clone();
                            resolve.call1(Value::Array(values))?;
                        }
                        Ok(Value::Undefined)
                    })
                };
                Promise::resolve(event_loop, item).then(Some(on_fulfilled), Some(reject.clone()));
            }
            Ok(())
        })
    }

    /// Settles like the first element of `iterable` (an array) to settle.
    ///
    /// An empty array yields a promise that never settles. A non-array
    /// argument yields a promise rejected with a `TypeError`.
    pub fn race(event_loop: &EventLoop, iterable: Value) -> Promise {
        let items = match iterable {
            Value::Array(items) => items,
            _ => {
                let err = JsError::type_error("Promise.race() only accepts an array");
                return Promise::reject(event_loop, err.into());
            }
        };

        Promise::new(event_loop, |resolve, reject| {
            for item in items {
                Promise::resolve(event_loop, item)
                    .then(Some(resolve.clone()), Some(reject.clone()));
            }
            Ok(())
        })
    }
}

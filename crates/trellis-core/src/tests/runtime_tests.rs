use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    ticks: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn request_tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }
}

fn runtime() -> Runtime {
    Runtime::new(Arc::new(DefaultScheduler))
}

#[test]
fn timers_fire_once_their_deadline_passes() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&fired);
    handle.schedule_timer(40, move || log.borrow_mut().push("a"));

    assert_eq!(runtime.advance_to(39), 0);
    assert!(fired.borrow().is_empty());
    assert_eq!(runtime.advance_to(40), 1);
    assert_eq!(*fired.borrow(), vec!["a"]);
    assert!(!runtime.has_pending_timers());
}

#[test]
fn due_timers_fire_in_deadline_then_creation_order() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    for (name, delay) in [("late", 30), ("first", 10), ("second", 10)] {
        let log = Rc::clone(&fired);
        handle.schedule_timer(delay, move || log.borrow_mut().push(name));
    }

    assert_eq!(runtime.advance_to(100), 3);
    assert_eq!(*fired.borrow(), vec!["first", "second", "late"]);
}

#[test]
fn timers_scheduled_while_firing_wait_for_next_advance() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&fired);
    let nested_handle = handle.clone();
    handle.schedule_timer(10, move || {
        log.borrow_mut().push("outer");
        let log = Rc::clone(&log);
        nested_handle.schedule_timer(0, move || log.borrow_mut().push("inner"));
    });

    assert_eq!(runtime.advance_to(10), 1);
    assert_eq!(*fired.borrow(), vec!["outer"]);
    assert_eq!(runtime.next_deadline(), Some(10));
    assert_eq!(runtime.advance_to(10), 1);
    assert_eq!(*fired.borrow(), vec!["outer", "inner"]);
}

#[test]
fn cancelled_timers_never_fire() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(false));

    let flag = Rc::clone(&fired);
    let id = handle
        .schedule_timer(5, move || *flag.borrow_mut() = true)
        .expect("runtime alive");
    assert!(handle.is_timer_pending(id));
    assert!(handle.cancel_timer(id));
    assert!(!handle.cancel_timer(id));

    runtime.advance_to(50);
    assert!(!*fired.borrow());
}

#[test]
fn deadlines_are_relative_to_runtime_time() {
    let runtime = runtime();
    let handle = runtime.handle();
    runtime.advance_to(100);
    handle.schedule_timer(25, || {});
    assert_eq!(runtime.next_deadline(), Some(125));
}

#[test]
fn time_never_moves_backwards() {
    let runtime = runtime();
    runtime.advance_to(100);
    runtime.advance_to(50);
    assert_eq!(runtime.now_millis(), 100);
}

#[test]
fn tasks_run_on_drain() {
    let runtime = runtime();
    let handle = runtime.handle();
    let ran = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&ran);
    handle.spawn_task(Box::new(move || *counter.borrow_mut() += 1));
    assert!(runtime.has_pending_tasks());
    assert_eq!(*ran.borrow(), 0);

    assert_eq!(runtime.drain_tasks(), 1);
    assert_eq!(*ran.borrow(), 1);
    assert!(!runtime.needs_tick());
}

#[test]
fn scheduling_work_requests_a_tick() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    handle.schedule_timer(10, || {});
    assert!(runtime.needs_tick());
    assert_eq!(scheduler.ticks.load(Ordering::SeqCst), 1);

    runtime.advance_to(10);
    assert!(!runtime.needs_tick());
}

#[test]
fn dead_handle_degrades_gracefully() {
    let handle = runtime().handle();
    assert!(!handle.is_alive());
    assert_eq!(handle.schedule_timer(10, || {}), None);
    assert!(!handle.has_pending_timers());
    assert_eq!(handle.advance_to(10), 0);

    let ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&ran);
    handle.spawn_task(Box::new(move || *flag.borrow_mut() = true));
    assert!(*ran.borrow());
}

//! Self-Driving Job Runner
//!
//! This example demonstrates re-entrant dispatch and debug logging.
//!
//! Key concepts:
//! - Enter callbacks dispatching follow-up events on the same machine
//! - A deferred target choosing between retry and failure
//! - Debug logging through `tracing`
//! - Transition history
//!
//! Run with: cargo run --example job_runner

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use switchyard::builder::{BuildError, FsmBuilder, TransitionBuilder};
use switchyard::core::StateDefinition;
use switchyard::machine::Fsm;
use switchyard::state_enum;

state_enum! {
    enum Job {
        Queued,
        Running,
        Retrying,
        Done,
        Failed,
    }
}

state_enum! {
    enum Step {
        Start,
        Fail,
        Retry,
        Succeed,
    }
}

/// Attempt on which the job finally succeeds.
const SUCCEEDS_ON: u32 = 3;
const RETRY_LIMIT: u32 = 5;

type Handle = Rc<RefCell<Weak<Fsm<Job, Step>>>>;

fn send(handle: &Handle, step: Step) {
    let Some(fsm) = handle.borrow().upgrade() else {
        return;
    };
    if let Err(e) = fsm.dispatch(step) {
        eprintln!("dispatch failed: {e}");
    }
}

fn build(handle: &Handle, attempts: &Rc<Cell<u32>>) -> Result<Fsm<Job, Step>, BuildError> {
    let on_running = {
        let handle = Rc::clone(handle);
        let attempts = Rc::clone(attempts);
        move || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < SUCCEEDS_ON {
                send(&handle, Step::Fail);
            } else {
                send(&handle, Step::Succeed);
            }
        }
    };
    let on_retrying = {
        let handle = Rc::clone(handle);
        move || send(&handle, Step::Retry)
    };
    let used = Rc::clone(attempts);

    FsmBuilder::new()
        .name("job-runner")
        .state(Job::Queued)
        .define(StateDefinition::new(Job::Running).on_enter(on_running))
        .define(StateDefinition::new(Job::Retrying).on_enter(on_retrying))
        .states([Job::Done, Job::Failed])
        .transition(TransitionBuilder::new().on(Step::Start).from(Job::Queued).to(Job::Running))?
        .transition(TransitionBuilder::new().on(Step::Fail).from(Job::Running).to(Job::Retrying))?
        .transition(TransitionBuilder::new().on(Step::Succeed).from(Job::Running).to(Job::Done))?
        .transition(
            TransitionBuilder::new()
                .on(Step::Retry)
                .from(Job::Retrying)
                .to_with(move || {
                    if used.get() < RETRY_LIMIT {
                        Some(Job::Running)
                    } else {
                        Some(Job::Failed)
                    }
                }),
        )?
        .debug(true)
        .history(Some(32))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Job Runner Example ===\n");

    let handle: Handle = Rc::default();
    let attempts = Rc::new(Cell::new(0));
    let runner = Rc::new(build(&handle, &attempts)?);
    *handle.borrow_mut() = Rc::downgrade(&runner);

    runner.dispatch(Step::Start)?;

    println!("\nFinal state: {:?} after {} attempts", runner.state(), attempts.get());
    if let Some(history) = runner.history() {
        let path: Vec<&str> = history.get_path().into_iter().map(Job::name).collect();
        println!("Path: {}", path.join(" -> "));
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

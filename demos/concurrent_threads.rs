//! # Concurrent Multithreading Example
//!
//! Demonstrates [`table_fsm::concurrent::GuardedMachine`] shared across
//! threads with no outer `Mutex` needed — the guard's own critical section
//! protects the queue push and the re-entrancy flag protects `run`.
//!
//! ## Scenario
//! A task processor fed by a producer thread and a worker thread, with a
//! monitor thread pausing and resuming it, all dispatching onto the same
//! `Arc<GuardedMachine<..>>` concurrently.
//!
//! Run with:
//! ```bash
//! cargo run --example concurrent_threads --features concurrent
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use table_fsm::concurrent::GuardedMachine;
use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const IDLE: u8 = 1;
const PROCESSING: u8 = 2;
const PAUSED: u8 = 3;
const SHUTDOWN: u8 = 4;

const NEW_TASK: u8 = 1;
const TASK_COMPLETE: u8 = 2;
const TASK_FAILED: u8 = 3;
const PAUSE: u8 = 4;
const RESUME: u8 = 5;
const SHUTDOWN_EV: u8 = 6;

struct TaskContext {
    active_tasks: u32,
    completed_tasks: u32,
    failed_tasks: u32,
}

fn idle_entry(ctx: &mut TaskContext) {
    println!("[Idle] task processor ready");
    ctx.active_tasks = 0;
}
fn processing_entry(_ctx: &mut TaskContext) {
    println!("[Processing] task processing active");
}
fn processing_run(ctx: &mut TaskContext) {
    println!(
        "[Processing] active={} completed={} failed={}",
        ctx.active_tasks, ctx.completed_tasks, ctx.failed_tasks
    );
}
fn paused_entry(_ctx: &mut TaskContext) {
    println!("[Paused] task processing paused");
}
fn shutdown_entry(ctx: &mut TaskContext) {
    println!(
        "[Shutdown] completed={} failed={} active={}",
        ctx.completed_tasks, ctx.failed_tasks, ctx.active_tasks
    );
}

type Fsm = GuardedMachine<TaskContext, ArrayQueue<32>>;

fn producer_thread(fsm: Arc<Fsm>) {
    for i in 1..=10 {
        thread::sleep(Duration::from_millis(15));
        println!("[Thread:Producer] dispatching NewTask #{i}");
        fsm.with_user_data_mut(|ctx| ctx.active_tasks += 1);
        fsm.add_event(NEW_TASK).unwrap();
        fsm.run();
    }
}

fn monitor_thread(fsm: Arc<Fsm>) {
    thread::sleep(Duration::from_millis(60));
    println!("[Thread:Monitor] pausing system for maintenance");
    fsm.add_event(PAUSE).unwrap();
    fsm.run();

    thread::sleep(Duration::from_millis(50));
    println!("[Thread:Monitor] resuming system");
    fsm.add_event(RESUME).unwrap();
    fsm.run();
}

fn worker_thread(fsm: Arc<Fsm>) {
    for i in 1..=8 {
        thread::sleep(Duration::from_millis(20));
        if i % 7 == 0 {
            println!("[Thread:Worker] dispatching TaskFailed #{i}");
            fsm.with_user_data_mut(|ctx| ctx.failed_tasks += 1);
            fsm.add_event(TASK_FAILED).unwrap();
        } else {
            println!("[Thread:Worker] dispatching TaskComplete #{i}");
            fsm.with_user_data_mut(|ctx| ctx.completed_tasks += 1);
            fsm.add_event(TASK_COMPLETE).unwrap();
        }
        fsm.run();
    }
}

fn main() {
    println!("========================================");
    println!("  Concurrent Multithreading Example");
    println!("========================================\n");

    // Transitions in Processing self-loop so NewTask/TaskComplete/TaskFailed
    // never leave the state on their own; a real deployment would track
    // per-task completion in the context and only transition on the
    // aggregate, exactly as `active_tasks` below.
    let transitions = [
        Transition::new(IDLE, NEW_TASK, PROCESSING),
        Transition::new(IDLE, SHUTDOWN_EV, SHUTDOWN),
        Transition::new(PROCESSING, NEW_TASK, PROCESSING),
        Transition::new(PROCESSING, TASK_COMPLETE, PROCESSING),
        Transition::new(PROCESSING, TASK_FAILED, PROCESSING),
        Transition::new(PROCESSING, PAUSE, PAUSED),
        Transition::new(PROCESSING, SHUTDOWN_EV, SHUTDOWN),
        Transition::new(PAUSED, RESUME, PROCESSING),
        Transition::new(PAUSED, SHUTDOWN_EV, SHUTDOWN),
    ];
    let callbacks = [
        StateCallbacks::new(IDLE).with_entry(idle_entry),
        StateCallbacks::new(PROCESSING)
            .with_entry(processing_entry)
            .with_run(processing_run),
        StateCallbacks::new(PAUSED).with_entry(paused_entry),
        StateCallbacks::new(SHUTDOWN).with_entry(shutdown_entry),
    ];

    let machine: Machine<TaskContext, ArrayQueue<32>> = Machine::init(
        TaskContext {
            active_tasks: 0,
            completed_tasks: 0,
            failed_tasks: 0,
        },
        IDLE,
        &transitions,
        &callbacks,
        32,
    )
    .unwrap();

    let fsm = Arc::new(GuardedMachine::new(machine));

    let producer = thread::spawn({
        let fsm = Arc::clone(&fsm);
        move || producer_thread(fsm)
    });
    let monitor = thread::spawn({
        let fsm = Arc::clone(&fsm);
        move || monitor_thread(fsm)
    });
    let worker = thread::spawn({
        let fsm = Arc::clone(&fsm);
        move || worker_thread(fsm)
    });

    producer.join().unwrap();
    monitor.join().unwrap();
    worker.join().unwrap();

    thread::sleep(Duration::from_millis(30));
    fsm.add_event(SHUTDOWN_EV).unwrap();
    fsm.run();

    println!("\nFinal state: {}", fsm.state());
}

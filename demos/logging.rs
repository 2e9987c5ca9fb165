//! # Logging Example: Automatic State Machine Instrumentation
//!
//! Demonstrates the optional **logging** feature: when enabled, every
//! dispatch, guard decision, and queue/allocation failure is routed through
//! the `log` crate at `trace` level. With the feature disabled, the
//! `__fsm_log!` call sites compile away entirely — zero cost.
//!
//! Run with:
//! ```bash
//! cargo run --example logging --features logging
//! ```

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp_millis()
        .init();
}

const PENDING: u8 = 1;
const PROCESSING: u8 = 2;
const APPROVED: u8 = 3;
const REJECTED: u8 = 4;
const FAILED: u8 = 5;

const PROCESS: u8 = 1;
const APPROVE: u8 = 2;
const REJECT: u8 = 3;
const TIMEOUT: u8 = 4;

struct Payment {
    amount_cents: u32,
    transaction_id: &'static str,
}

fn pending_entry(ctx: &mut Payment) {
    println!(
        "  User: initiating payment of ${:.2}",
        ctx.amount_cents as f32 / 100.0
    );
}
fn processing_entry(ctx: &mut Payment) {
    println!("  User: processing transaction {}", ctx.transaction_id);
}
fn processing_exit(_ctx: &mut Payment) {
    println!("  User: transaction processing completed");
}
fn approved_entry(ctx: &mut Payment) {
    println!("  User: payment approved! id {}", ctx.transaction_id);
}
fn rejected_entry(_ctx: &mut Payment) {
    println!("  User: payment rejected by bank");
}
fn failed_entry(_ctx: &mut Payment) {
    println!("  User: payment failed (timeout)");
}

fn table() -> ([Transition<Payment>; 6], [StateCallbacks<Payment>; 5]) {
    let transitions = [
        Transition::new(PENDING, PROCESS, PROCESSING),
        Transition::new(PROCESSING, APPROVE, APPROVED),
        Transition::new(PROCESSING, REJECT, REJECTED),
        Transition::new(PROCESSING, TIMEOUT, FAILED),
        Transition::new(FAILED, PROCESS, PROCESSING),
        Transition::new(REJECTED, PROCESS, PROCESSING),
    ];
    let callbacks = [
        StateCallbacks::new(PENDING).with_entry(pending_entry),
        StateCallbacks::new(PROCESSING)
            .with_entry(processing_entry)
            .with_exit(processing_exit),
        StateCallbacks::new(APPROVED).with_entry(approved_entry),
        StateCallbacks::new(REJECTED).with_entry(rejected_entry),
        StateCallbacks::new(FAILED).with_entry(failed_entry),
    ];
    (transitions, callbacks)
}

fn main() {
    println!("=== Logging Example: Automatic FSM Instrumentation ===\n");

    init_logger();

    println!("Legend:");
    println!("  [TRACE table_fsm::...] = FSM log output (from table-fsm)");
    println!("  User:                  = Application log output\n");

    println!("--- Scenario 1: Successful payment ---\n");
    run_payment(99_99, "TXN-001", &[PROCESS, APPROVE]);

    println!("\n--- Scenario 2: Rejected payment ---\n");
    run_payment(150_000, "TXN-002", &[PROCESS, REJECT]);

    println!("\n--- Scenario 3: Timeout ---\n");
    run_payment(50_00, "TXN-003", &[PROCESS, TIMEOUT]);

    println!("\nTo see trace logs, run with:");
    println!("  cargo run --example logging --features logging");
}

fn run_payment(amount_cents: u32, transaction_id: &'static str, events: &[u8]) {
    let (transitions, callbacks) = table();
    let mut payment: Machine<Payment, ArrayQueue<5>> = Machine::init(
        Payment {
            amount_cents,
            transaction_id,
        },
        PENDING,
        &transitions,
        &callbacks,
        5,
    )
    .unwrap();

    for &event in events {
        payment.add_event(event).unwrap();
        payment.run();
    }
}

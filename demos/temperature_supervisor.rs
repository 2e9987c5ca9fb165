//! Temperature Supervisor Example
//!
//! This is the seed scenario from the engine's spec: a supervisor that
//! watches a temperature reading and moves between NORMAL / WARN / ALARM
//! as measurements come in, with a manual reset button for the operator.
//! It showcases:
//! - Guarded transitions sharing one `(state, event)` key (first match wins)
//! - `on_run` firing every step regardless of whether a transition fired
//! - `on_entry`/`on_exit` firing only on real state changes

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

// ============================================================================
// 1. States and events (small, non-negative integers)
// ============================================================================

const NORMAL: u8 = 1;
const ALARM: u8 = 2;
const WARN: u8 = 4;

const BUTTON_PRESS: u8 = 10;
const MEASURE: u8 = 11;

// ============================================================================
// 2. Context
// ============================================================================

struct Supervisor {
    temperature_c: i32,
}

impl Supervisor {
    fn log(&self, msg: &str) {
        println!("[{}°C] {}", self.temperature_c, msg);
    }
}

// ============================================================================
// 3. Guards
// ============================================================================

fn calm(ctx: &Supervisor) -> bool {
    ctx.temperature_c <= 80
}
fn elevated(ctx: &Supervisor) -> bool {
    ctx.temperature_c >= 80 && ctx.temperature_c < 100
}
fn critical(ctx: &Supervisor) -> bool {
    ctx.temperature_c >= 100
}

// ============================================================================
// 4. State callbacks
// ============================================================================

fn normal_entry(ctx: &mut Supervisor) {
    ctx.log("NORMAL — all clear");
}
fn normal_run(ctx: &mut Supervisor) {
    ctx.log("NORMAL — monitoring");
}
fn warn_entry(ctx: &mut Supervisor) {
    ctx.log("WARN — approaching threshold");
}
fn warn_run(ctx: &mut Supervisor) {
    ctx.log("WARN — still elevated");
}
fn alarm_entry(ctx: &mut Supervisor) {
    ctx.log("ALARM — shutting down the heater");
}
fn alarm_run(ctx: &mut Supervisor) {
    ctx.log("ALARM — awaiting operator reset");
}

fn main() {
    println!("=== Temperature Supervisor ===\n");

    let transitions = [
        Transition::guarded(ALARM, BUTTON_PRESS, calm, NORMAL),
        Transition::guarded(NORMAL, MEASURE, elevated, WARN),
        Transition::guarded(NORMAL, MEASURE, critical, ALARM),
        Transition::guarded(WARN, MEASURE, calm, NORMAL),
        Transition::guarded(WARN, MEASURE, critical, ALARM),
    ];

    let callbacks = [
        StateCallbacks::new(NORMAL)
            .with_entry(normal_entry)
            .with_run(normal_run),
        StateCallbacks::new(WARN)
            .with_entry(warn_entry)
            .with_run(warn_run),
        StateCallbacks::new(ALARM)
            .with_entry(alarm_entry)
            .with_run(alarm_run),
    ];

    let mut fsm: Machine<Supervisor, ArrayQueue<5>> = Machine::init(
        Supervisor { temperature_c: 22 },
        NORMAL,
        &transitions,
        &callbacks,
        5,
    )
    .unwrap();

    let readings = [75, 85, 105, 105, 70];
    for reading in readings {
        fsm.user_data_mut().temperature_c = reading;
        fsm.add_event(MEASURE).unwrap();
        fsm.run();
    }

    println!("\n--- Operator presses the reset button ---\n");
    fsm.user_data_mut().temperature_c = 40;
    fsm.add_event(BUTTON_PRESS).unwrap();
    fsm.run();

    println!("\nFinal state: {}", fsm);
}

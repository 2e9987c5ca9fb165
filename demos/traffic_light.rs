//! Traffic Light Example
//!
//! A simple three-state cycle driven by a single `TimerTick` event,
//! showcasing plain unconditional transitions (no guards at all) and an
//! `on_entry` callback per state for visual feedback.

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const GREEN: u8 = 1;
const YELLOW: u8 = 2;
const RED: u8 = 3;

const TIMER_TICK: u8 = 1;

struct TrafficLight {
    cycle_count: u32,
}

impl TrafficLight {
    fn log(&self, msg: &str) {
        println!("[Cycle #{}] {}", self.cycle_count, msg);
    }
}

fn green_entry(ctx: &mut TrafficLight) {
    ctx.log("GREEN - Go!");
}
fn yellow_entry(ctx: &mut TrafficLight) {
    ctx.log("YELLOW - Caution!");
}
fn red_entry(ctx: &mut TrafficLight) {
    ctx.cycle_count += 1;
    ctx.log("RED - Stop!");
}

fn main() {
    println!("=== Traffic Light Controller ===\n");

    let transitions = [
        Transition::new(GREEN, TIMER_TICK, YELLOW),
        Transition::new(YELLOW, TIMER_TICK, RED),
        Transition::new(RED, TIMER_TICK, GREEN),
    ];
    let callbacks = [
        StateCallbacks::new(GREEN).with_entry(green_entry),
        StateCallbacks::new(YELLOW).with_entry(yellow_entry),
        StateCallbacks::new(RED).with_entry(red_entry),
    ];

    let mut light: Machine<TrafficLight, ArrayQueue<5>> = Machine::init(
        TrafficLight { cycle_count: 0 },
        GREEN,
        &transitions,
        &callbacks,
        5,
    )
    .unwrap();

    println!("\n--- Starting traffic light cycle ---\n");

    for i in 1..=10 {
        println!("Timer tick #{i}");
        light.add_event(TIMER_TICK).unwrap();
        light.run();
        println!();
    }

    println!("--- Simulation complete ---");
    println!("Total cycles completed: {}", light.user_data().cycle_count);
}

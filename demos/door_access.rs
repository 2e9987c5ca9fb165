//! Door Access Control Example
//!
//! A badge reader controlling an electric strike. Showcases a guard reading
//! from the context to decide between two rows sharing the same
//! `(state, event)` key (accepted badge vs. rejected badge), a self-loop
//! that keeps counting failed attempts without leaving the locked state,
//! and an alarm latch once too many bad badges are swiped in a row.

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const LOCKED: u8 = 1;
const UNLOCKED: u8 = 2;
const ALARM: u8 = 3;

const BADGE_SWIPE: u8 = 1;
const DOOR_CLOSED: u8 = 2;
const RESET: u8 = 3;

const MAX_FAILED_ATTEMPTS: u32 = 3;

struct Door {
    badge_valid: bool,
    failed_attempts: u32,
}

fn badge_accepted(ctx: &Door) -> bool {
    ctx.badge_valid
}
fn badge_rejected_below_threshold(ctx: &Door) -> bool {
    !ctx.badge_valid && ctx.failed_attempts + 1 < MAX_FAILED_ATTEMPTS
}
fn badge_rejected_at_threshold(ctx: &Door) -> bool {
    !ctx.badge_valid && ctx.failed_attempts + 1 >= MAX_FAILED_ATTEMPTS
}

fn locked_entry(ctx: &mut Door) {
    ctx.failed_attempts = 0;
    println!("[Door] LOCKED");
}
fn locked_run(ctx: &mut Door) {
    if !ctx.badge_valid {
        ctx.failed_attempts += 1;
        println!(
            "[Door] badge rejected ({} failed attempt(s))",
            ctx.failed_attempts
        );
    }
}
fn unlocked_entry(ctx: &mut Door) {
    ctx.failed_attempts = 0;
    println!("[Door] UNLOCKED — strike released");
}
fn alarm_entry(ctx: &mut Door) {
    println!(
        "[Door] ALARM — {} consecutive rejected badges, paging security",
        ctx.failed_attempts + 1
    );
}

fn main() {
    println!("=== Door Access Control ===\n");

    let transitions = [
        Transition::guarded(LOCKED, BADGE_SWIPE, badge_accepted, UNLOCKED),
        // Rejected badge below the threshold: stay LOCKED (self-loop).
        Transition::guarded(
            LOCKED,
            BADGE_SWIPE,
            badge_rejected_below_threshold,
            LOCKED,
        ),
        Transition::guarded(LOCKED, BADGE_SWIPE, badge_rejected_at_threshold, ALARM),
        Transition::new(UNLOCKED, DOOR_CLOSED, LOCKED),
        Transition::new(ALARM, RESET, LOCKED),
    ];

    let callbacks = [
        StateCallbacks::new(LOCKED)
            .with_entry(locked_entry)
            .with_run(locked_run),
        StateCallbacks::new(UNLOCKED).with_entry(unlocked_entry),
        StateCallbacks::new(ALARM).with_entry(alarm_entry),
    ];

    let mut door: Machine<Door, ArrayQueue<5>> = Machine::init(
        Door {
            badge_valid: false,
            failed_attempts: 0,
        },
        LOCKED,
        &transitions,
        &callbacks,
        5,
    )
    .unwrap();

    println!("--- A valid badge unlocks the door ---\n");
    door.user_data_mut().badge_valid = true;
    door.add_event(BADGE_SWIPE).unwrap();
    door.run();
    door.add_event(DOOR_CLOSED).unwrap();
    door.run();

    println!("\n--- Three bad badges in a row trip the alarm ---\n");
    door.user_data_mut().badge_valid = false;
    for _ in 0..3 {
        door.add_event(BADGE_SWIPE).unwrap();
        door.run();
    }

    println!("\n--- Security resets the panel ---\n");
    door.add_event(RESET).unwrap();
    door.run();
    println!("\nFinal state: {}", door);
}

//! Network Connection Manager Example
//!
//! A reconnect-with-backoff state machine: Disconnected -> Connecting ->
//! Connected, with a Retrying detour on failure and a Failed state once
//! retries are exhausted. Showcases guards reading counters out of the
//! context to pick between "retry" and "give up" rows in the same
//! `(state, event)` block.

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const DISCONNECTED: u8 = 1;
const CONNECTING: u8 = 2;
const CONNECTED: u8 = 3;
const RETRYING: u8 = 4;
const FAILED: u8 = 5;

const CONNECT: u8 = 1;
const CONNECTION_OK: u8 = 2;
const CONNECTION_FAILED: u8 = 3;
const DISCONNECT: u8 = 4;
const CONNECTION_LOST: u8 = 5;
const RETRY_TIMEOUT: u8 = 6;

const MAX_RETRIES: u32 = 3;

struct Connection {
    server: &'static str,
    attempt: u32,
}

fn has_retries_left(ctx: &Connection) -> bool {
    ctx.attempt < MAX_RETRIES
}
fn retries_exhausted(ctx: &Connection) -> bool {
    ctx.attempt >= MAX_RETRIES
}

fn disconnected_entry(ctx: &mut Connection) {
    ctx.attempt = 0;
    println!("[{}] Ready to connect", ctx.server);
}
fn connecting_entry(ctx: &mut Connection) {
    ctx.attempt += 1;
    println!(
        "[{}] Connecting... (attempt {}/{})",
        ctx.server, ctx.attempt, MAX_RETRIES
    );
}
fn connected_entry(ctx: &mut Connection) {
    println!("[{}] Connected successfully!", ctx.server);
}
fn connected_exit(ctx: &mut Connection) {
    println!("[{}] Closing connection...", ctx.server);
}
fn retrying_entry(ctx: &mut Connection) {
    println!(
        "[{}] Retrying in {}ms...",
        ctx.server,
        500 * ctx.attempt
    );
}
fn failed_entry(ctx: &mut Connection) {
    println!(
        "[{}] Connection failed permanently after {} attempts",
        ctx.server, ctx.attempt
    );
}

fn main() {
    println!("=== Network Connection Manager ===\n");

    let transitions = [
        Transition::new(DISCONNECTED, CONNECT, CONNECTING),
        Transition::new(CONNECTING, CONNECTION_OK, CONNECTED),
        Transition::guarded(CONNECTING, CONNECTION_FAILED, has_retries_left, RETRYING),
        Transition::guarded(CONNECTING, CONNECTION_FAILED, retries_exhausted, FAILED),
        Transition::new(CONNECTING, DISCONNECT, DISCONNECTED),
        Transition::new(CONNECTED, DISCONNECT, DISCONNECTED),
        Transition::new(CONNECTED, CONNECTION_LOST, RETRYING),
        Transition::new(RETRYING, RETRY_TIMEOUT, CONNECTING),
        Transition::new(RETRYING, DISCONNECT, DISCONNECTED),
        Transition::new(FAILED, CONNECT, CONNECTING),
    ];

    let callbacks = [
        StateCallbacks::new(DISCONNECTED).with_entry(disconnected_entry),
        StateCallbacks::new(CONNECTING).with_entry(connecting_entry),
        StateCallbacks::new(CONNECTED)
            .with_entry(connected_entry)
            .with_exit(connected_exit),
        StateCallbacks::new(RETRYING).with_entry(retrying_entry),
        StateCallbacks::new(FAILED).with_entry(failed_entry),
    ];

    let mut conn: Machine<Connection, ArrayQueue<5>> = Machine::init(
        Connection {
            server: "api.example.com:443",
            attempt: 0,
        },
        DISCONNECTED,
        &transitions,
        &callbacks,
        5,
    )
    .unwrap();

    println!("--- Scenario: fails once, then succeeds ---\n");
    conn.add_event(CONNECT).unwrap();
    conn.run();
    conn.add_event(CONNECTION_FAILED).unwrap();
    conn.run();
    conn.add_event(RETRY_TIMEOUT).unwrap();
    conn.run();
    conn.add_event(CONNECTION_OK).unwrap();
    conn.run();

    println!("\n--- Scenario: connection lost, recovers ---\n");
    conn.add_event(CONNECTION_LOST).unwrap();
    conn.run();
    conn.add_event(RETRY_TIMEOUT).unwrap();
    conn.run();
    conn.add_event(CONNECTION_OK).unwrap();
    conn.run();

    println!("\n--- Scenario: graceful disconnect ---\n");
    conn.add_event(DISCONNECT).unwrap();
    conn.run();

    println!("\nFinal state: {}", conn);
}

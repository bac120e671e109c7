//! Coin-Operated Turnstile
//!
//! This example drives the classic two-state turnstile through a short run.
//!
//! Key concepts:
//! - Declaring event and state vocabularies with `symbol_enum!`
//! - Default transitions and an unregistered self-loop
//! - A handler choosing among candidates at runtime
//! - Observing state changes through a callback and the history
//! - Dumping the transition table
//!
//! Run with: cargo run --example turnstile

use fsm_table::{symbol_enum, FsmBuilder, RaiseOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

symbol_enum! {
    enum Event {
        Coin,
        Push,
    }
}

symbol_enum! {
    enum Gate {
        Locked,
        Unlocked,
        Jammed,
    }
}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    // Coins are swallowed while the mechanism is jammed.
    let jammed = Arc::new(AtomicBool::new(false));
    let sensor = Arc::clone(&jammed);

    let mut fsm = FsmBuilder::new()
        .name("turnstile")
        .events(Event::ALL.iter().copied())
        .states(Gate::ALL.iter().copied())
        .initial(Gate::Locked)
        .history_limit(16)
        .guarded(
            Event::Coin,
            Gate::Locked,
            move || {
                if sensor.load(Ordering::SeqCst) {
                    Gate::Jammed
                } else {
                    Gate::Unlocked
                }
            },
            [Gate::Unlocked, Gate::Jammed],
        )
        .transition(Event::Push, Gate::Unlocked, [Gate::Locked])
        .build()
        .unwrap();

    println!("{}", fsm.dump());

    let run = [
        Event::Coin,
        Event::Push,
        Event::Push,
        Event::Coin,
        Event::Push,
    ];

    println!("Raising events:");
    for event in run {
        let outcome = fsm
            .raise_event_with(&event, |event, from, to| {
                println!("  {:?}: {:?} -> {:?}", event, from, to);
            })
            .unwrap();
        if outcome == RaiseOutcome::Unhandled {
            println!("  {:?}: ignored in {:?}", event, fsm.current_state());
        }
    }

    println!("\nJamming the mechanism...");
    jammed.store(true, Ordering::SeqCst);
    fsm.raise_event_with(&Event::Coin, |event, from, to| {
        println!("  {:?}: {:?} -> {:?}", event, from, to);
    })
    .unwrap();

    let path: Vec<String> = fsm
        .history()
        .get_path()
        .iter()
        .map(|state| format!("{:?}", state))
        .collect();
    println!("\nPath taken: {}", path.join(" -> "));
    println!("Final state: {:?}", fsm.current_state());

    println!("\n=== Example Complete ===");
}

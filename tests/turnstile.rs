//! End-to-end scenarios driving machines only through the public API.

use fsm_table::{Fsm, FsmBuilder, FsmError, Handler, RaiseOutcome};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

const INSERT_COIN: &str = "Insert Coin";
const PUSH: &str = "Push Turnstile";
const LOCKED: &str = "Locked";
const UNLOCKED: &str = "UNLOCKED";

fn s(value: &str) -> String {
    value.to_string()
}

fn turnstile() -> Fsm<String, String> {
    let mut fsm = Fsm::named(
        "turnstile",
        [INSERT_COIN, PUSH].map(String::from),
        [LOCKED, UNLOCKED].map(String::from),
        s(LOCKED),
    );
    fsm.register_transition(s(INSERT_COIN), s(LOCKED), None, [s(UNLOCKED)])
        .unwrap();
    fsm.register_transition(s(PUSH), s(UNLOCKED), None, [s(LOCKED)])
        .unwrap();
    fsm
}

#[test]
fn turnstile_cycles_between_locked_and_unlocked() {
    let mut fsm = turnstile();
    let mut notifications = Vec::new();

    fsm.raise_event_with(&s(INSERT_COIN), |e, from, to| {
        notifications.push((e.clone(), from.clone(), to.clone()))
    })
    .unwrap();
    assert_eq!(fsm.current_state(), UNLOCKED);

    fsm.raise_event_with(&s(PUSH), |e, from, to| {
        notifications.push((e.clone(), from.clone(), to.clone()))
    })
    .unwrap();
    assert_eq!(fsm.current_state(), LOCKED);

    let outcome = fsm
        .raise_event_with(&s(PUSH), |e, from, to| {
            notifications.push((e.clone(), from.clone(), to.clone()))
        })
        .unwrap();
    assert_eq!(outcome, RaiseOutcome::Unhandled);
    assert_eq!(fsm.current_state(), LOCKED);

    assert_eq!(
        notifications,
        vec![
            (s(INSERT_COIN), s(LOCKED), s(UNLOCKED)),
            (s(PUSH), s(UNLOCKED), s(LOCKED)),
        ]
    );
    assert_eq!(fsm.history().get_path(), vec![LOCKED, UNLOCKED, LOCKED]);
}

#[test]
fn rejected_registration_leaves_dump_unchanged() {
    let mut fsm = turnstile();
    let before = fsm.dump();

    assert!(matches!(
        fsm.register_transition(s("Kick"), s(LOCKED), None, [s(UNLOCKED)]),
        Err(FsmError::UnknownEvent { .. })
    ));
    assert!(matches!(
        fsm.register_transition(s(PUSH), s("Broken"), None, [s(LOCKED)]),
        Err(FsmError::UnknownState { .. })
    ));
    assert!(matches!(
        fsm.register_transition(s(PUSH), s(LOCKED), None, [s("Open")]),
        Err(FsmError::UnknownState { .. })
    ));
    assert!(matches!(
        fsm.register_transition(s(PUSH), s(LOCKED), None, Vec::new()),
        Err(FsmError::EmptyCandidates { .. })
    ));

    assert_eq!(fsm.dump(), before);
}

/// Position tracker: buying while flat or long goes (or stays) long,
/// depending on the order size the handler reads.
#[test]
fn handler_reads_external_context() {
    let order = Arc::new(AtomicI64::new(0));
    let mut fsm = Fsm::named(
        "position",
        ["Buy", "Sell"].map(String::from),
        ["Flat", "Long", "Short"].map(String::from),
        s("Flat"),
    );

    let size = Arc::clone(&order);
    fsm.register_transition(
        s("Buy"),
        s("Flat"),
        Some(Handler::new(move || {
            if size.load(Ordering::SeqCst) > 0 {
                s("Long")
            } else {
                s("Flat")
            }
        })),
        [s("Long"), s("Flat")],
    )
    .unwrap();

    let mut remaining = None;
    fsm.raise_event_with(&s("Buy"), |_, from, to| {
        remaining = Some(from == to);
    })
    .unwrap();
    assert_eq!(remaining, Some(true));
    assert_eq!(fsm.current_state(), "Flat");

    order.store(100, Ordering::SeqCst);
    fsm.raise_event(&s("Buy")).unwrap();
    assert_eq!(fsm.current_state(), "Long");
}

#[test]
fn handler_result_outside_candidates_is_rejected() {
    let mut fsm = Fsm::new(vec![1, 2, 3], vec![11, 22, 33], 11);
    fsm.register_handler(1, 11, || 33, vec![22]).unwrap();

    let before = *fsm.current_state();
    let result = fsm.raise_event(&1);

    assert!(matches!(result, Err(FsmError::IllegalTransition { .. })));
    assert_eq!(*fsm.current_state(), before);
    assert!(fsm.history().is_empty());
}

#[test]
fn invalid_machine_is_stable() {
    let mut fsm: Fsm<i32, i32> = Fsm::new(Vec::new(), vec![11], 11);
    let dump = fsm.dump();

    for _ in 0..3 {
        assert!(fsm.register_default(1, 11, 11).is_err());
        assert!(matches!(fsm.raise_event(&1), Err(FsmError::InvalidMachine)));
        assert_eq!(fsm.current_state(), &11);
        assert_eq!(fsm.dump(), dump);
    }
}

#[test]
fn machine_can_move_to_another_thread() {
    let mut fsm = turnstile();

    let handle = std::thread::spawn(move || {
        fsm.raise_event(&s(INSERT_COIN)).unwrap();
        fsm
    });
    let fsm = handle.join().unwrap();

    assert_eq!(fsm.current_state(), UNLOCKED);
}

#[test]
fn static_str_symbols_drive_a_machine() {
    let mut fsm = FsmBuilder::new()
        .name("turnstile")
        .events([INSERT_COIN, PUSH])
        .states([LOCKED, UNLOCKED])
        .initial(LOCKED)
        .transition(INSERT_COIN, LOCKED, [UNLOCKED])
        .transition(PUSH, UNLOCKED, [LOCKED])
        .build()
        .unwrap();

    fsm.raise_event(&INSERT_COIN).unwrap();
    assert_eq!(*fsm.current_state(), UNLOCKED);
    fsm.raise_event(&PUSH).unwrap();
    assert_eq!(*fsm.current_state(), LOCKED);

    assert!(fsm
        .dump()
        .contains("On Event='Insert Coin' when State='Locked' next State(s)=[UNLOCKED]"));
    assert!(!Fsm::new([INSERT_COIN, " "], [LOCKED], LOCKED).is_valid());
}

#[test]
fn long_running_machine_keeps_bounded_history() {
    let mut fsm = Fsm::new(["ping"], ["left", "right"], "left").with_history_limit(100);
    fsm.register_default("ping", "left", "right").unwrap();
    fsm.register_default("ping", "right", "left").unwrap();

    for _ in 0..100_000 {
        fsm.raise_event(&"ping").unwrap();
    }

    assert_eq!(fsm.history().len(), 100);
    assert_eq!(fsm.history().evicted(), 99_900);
    assert_eq!(fsm.history().last().map(|r| r.to), Some("left"));
    assert_eq!(*fsm.current_state(), "left");

    fsm.clear_history();
    assert!(fsm.history().is_empty());
    assert_eq!(*fsm.current_state(), "left");
}

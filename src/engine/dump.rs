//! Human-readable machine reports.

use crate::core::Symbol;
use crate::engine::machine::Fsm;

/// Render a report of `fsm`.
///
/// Transitions are listed in vocabulary order: every event, then every state.
pub(crate) fn render<E: Symbol, S: Symbol>(
    fsm: &Fsm<E, S>,
    event_fmt: &dyn Fn(&E) -> String,
    state_fmt: &dyn Fn(&S) -> String,
) -> String {
    let mut out = String::new();

    if let Some(name) = fsm.name() {
        out.push_str(&format!("Name         : {}\n", name));
    }
    out.push_str(&format!(
        "Status       : {}\n",
        if fsm.is_valid() { "OK" } else { "ERROR" }
    ));
    out.push_str(&format!(
        "Valid Events : {}\n",
        list(fsm.events().as_slice(), event_fmt)
    ));
    out.push_str(&format!(
        "Valid States : {}\n",
        list(fsm.states().as_slice(), state_fmt)
    ));
    out.push_str(&format!(
        "Current State: {}\n",
        state_fmt(fsm.current_state())
    ));

    if !fsm.is_valid() {
        out.push_str("Problems     :\n");
        for error in fsm.config_errors() {
            out.push_str(&format!("\t{}\n", error));
        }
    }

    out.push_str("Transitions  :\n");
    for event in fsm.events().iter() {
        for state in fsm.states().iter() {
            let Some(entry) = fsm.transition(event, state) else {
                continue;
            };
            out.push_str(&format!(
                "\tOn Event='{}' when State='{}' next State(s)={} Handler={}\n",
                event_fmt(event),
                state_fmt(state),
                list(entry.candidates(), state_fmt),
                if entry.has_handler() { "{...}" } else { "{<NULL>}" }
            ));
        }
    }

    out
}

fn list<T>(values: &[T], fmt: &dyn Fn(&T) -> String) -> String {
    let items: Vec<String> = values.iter().map(fmt).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use crate::engine::Fsm;

    fn turnstile() -> Fsm<String, String> {
        Fsm::named(
            "turnstile",
            ["Insert Coin", "Push Turnstile"].map(String::from),
            ["Locked", "UNLOCKED"].map(String::from),
            "Locked".to_string(),
        )
    }

    #[test]
    fn dump_of_fresh_machine_has_empty_transitions() {
        let fsm = turnstile();

        assert_eq!(
            fsm.dump(),
            "Name         : turnstile\n\
             Status       : OK\n\
             Valid Events : [Insert Coin, Push Turnstile]\n\
             Valid States : [Locked, UNLOCKED]\n\
             Current State: Locked\n\
             Transitions  :\n"
        );
    }

    #[test]
    fn dump_lists_transitions_in_vocabulary_order() {
        let mut fsm = turnstile();
        fsm.register_default(
            "Push Turnstile".to_string(),
            "UNLOCKED".to_string(),
            "Locked".to_string(),
        )
        .unwrap();
        fsm.register_handler(
            "Insert Coin".to_string(),
            "Locked".to_string(),
            || "UNLOCKED".to_string(),
            ["UNLOCKED", "Locked"].map(String::from),
        )
        .unwrap();

        let dump = fsm.dump();
        let lines: Vec<&str> = dump.lines().skip_while(|l| !l.starts_with("Transitions")).collect();

        assert_eq!(
            lines,
            vec![
                "Transitions  :",
                "\tOn Event='Insert Coin' when State='Locked' next State(s)=[UNLOCKED, Locked] Handler={...}",
                "\tOn Event='Push Turnstile' when State='UNLOCKED' next State(s)=[Locked] Handler={<NULL>}",
            ]
        );
    }

    #[test]
    fn dump_uses_custom_formatters() {
        let mut fsm = Fsm::new(vec![1, 2], vec![11, 22], 11);
        fsm.register_default(1, 11, 22).unwrap();

        let dump = fsm.dump_with(|e| format!("E{}", e), |s| format!("S{}", s));

        assert!(dump.contains("Valid Events : [E1, E2]"));
        assert!(dump.contains("Current State: S11"));
        assert!(dump.contains("On Event='E1' when State='S11' next State(s)=[S22]"));
        assert!(!dump.contains("Name"));
    }

    #[test]
    fn dump_can_format_only_events() {
        let mut fsm = Fsm::new(vec![1, 2], vec![11, 22], 11);
        fsm.register_default(1, 11, 22).unwrap();

        let dump = fsm.dump_events_with(|e| format!("E{}", e));

        assert!(dump.contains("Valid Events : [E1, E2]"));
        assert!(dump.contains("Valid States : [11, 22]"));
        assert!(dump.contains("On Event='E1' when State='11' next State(s)=[22]"));
    }

    #[test]
    fn dump_can_format_only_states() {
        let mut fsm = Fsm::new(vec![1, 2], vec![11, 22], 11);
        fsm.register_default(1, 11, 22).unwrap();

        let dump = fsm.dump_states_with(|s| format!("S{}", s));

        assert!(dump.contains("Valid Events : [1, 2]"));
        assert!(dump.contains("Current State: S11"));
        assert!(dump.contains("On Event='1' when State='S11' next State(s)=[S22]"));
    }

    #[test]
    fn dump_of_invalid_machine_reports_problems() {
        let fsm: Fsm<i32, i32> = Fsm::new(Vec::new(), vec![11], 11);
        let dump = fsm.dump();

        assert!(dump.contains("Status       : ERROR"));
        assert!(dump.contains("Valid Events : []"));
        assert!(dump.contains("\tevent vocabulary is empty"));
        assert!(dump.ends_with("Transitions  :\n"));
        assert_eq!(dump, fsm.dump());
    }

    #[test]
    fn display_matches_dump() {
        let fsm = turnstile();
        assert_eq!(fsm.to_string(), fsm.dump());
    }
}

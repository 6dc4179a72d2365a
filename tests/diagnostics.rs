//! Diagnostics and debug tracing, observed through a capturing subscriber.

use std::fmt;
use std::sync::{Arc, Mutex};
use temperament::core::Guard;
use temperament::machine::{Change, MachineOptions, StateMachine, Status, Step};
use temperament::registry::StateConfig;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    diagnostic: Option<String>,
    message: String,
}

#[derive(Default)]
struct Fields {
    diagnostic: Option<String>,
    message: String,
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "diagnostic" => self.diagnostic = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "diagnostic" => self.diagnostic = Some(format!("{value:?}")),
            "message" => self.message = format!("{value:?}"),
            _ => {}
        }
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<Captured>>>);

impl Capture {
    fn events(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }

    fn diagnostics(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::WARN)
            .filter_map(|e| e.diagnostic)
            .collect()
    }

    fn debug_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::DEBUG)
            .map(|e| e.message)
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            diagnostic: fields.diagnostic,
            message: fields.message,
        });
    }
}

fn captured<T>(f: impl FnOnce() -> T) -> (T, Capture) {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}

fn patrol(debug: bool) -> StateMachine<&'static str, ()> {
    StateMachine::new(
        ["Idle", "Seek"],
        vec![StateConfig::new("Idle").goto(Guard::after(1.0), "Seek")],
    )
    .unwrap()
    .with_options(MachineOptions { debug })
}

#[test]
fn unknown_target_reports_once_and_keeps_state() {
    let mut machine = patrol(false);
    machine.change_state(&mut (), &"Idle");
    machine.update(&mut (), 0.25);

    let (change, capture) = captured(|| machine.change_state(&mut (), &"Nonexistent"));

    assert_eq!(change, Change::Unknown);
    assert_eq!(capture.diagnostics(), vec!["unknown_target"]);
    assert_eq!(machine.current(), Some(&"Idle"));
    assert_eq!(machine.elapsed(), 0.25);
}

#[test]
fn skipped_records_are_reported_at_build() {
    let (machine, capture) = captured(|| {
        StateMachine::<&str, ()>::new(
            ["Idle", "Seek"],
            vec![
                StateConfig::new("Ghost"),
                StateConfig::new("Idle").goto(Guard::always(), "Nowhere"),
                StateConfig::new("Seek"),
                StateConfig::new("Seek"),
            ],
        )
    });

    let machine = machine.unwrap();
    assert_eq!(
        capture.diagnostics(),
        vec!["unknown_config_state", "unknown_edge_target", "duplicate_config"]
    );
    let idle = machine.registry().id_of(&"Idle").unwrap();
    assert_eq!(machine.registry().edge_count(idle), Some(0));
}

#[test]
fn zero_total_weight_halts_with_diagnostic() {
    let mut machine: StateMachine<&str, ()> = StateMachine::new(
        ["Idle", "A", "B"],
        vec![StateConfig::new("Idle").weighted(Guard::always(), [("A", 0.0), ("B", 0.0)])],
    )
    .unwrap();
    machine.change_state(&mut (), &"Idle");

    let (step, capture) = captured(|| machine.update(&mut (), 0.016));

    assert_eq!(step, Step::Halted { from: "Idle" });
    assert_eq!(machine.status(), Status::Halted);
    assert_eq!(capture.diagnostics(), vec!["zero_total_weight"]);
}

#[test]
fn invalid_delta_is_ignored() {
    let mut machine = patrol(false);
    machine.change_state(&mut (), &"Idle");

    let (step, capture) = captured(|| machine.update(&mut (), f64::NAN));

    assert_eq!(step, Step::Remained);
    assert_eq!(machine.elapsed(), 0.0);
    assert_eq!(capture.diagnostics(), vec!["invalid_delta"]);
}

#[test]
fn starting_an_empty_machine_is_reported() {
    let mut machine: StateMachine<&str, ()> = StateMachine::new(Vec::new(), Vec::new()).unwrap();

    let (change, capture) = captured(|| machine.start(&mut ()));

    assert_eq!(change, Change::Unknown);
    assert_eq!(capture.diagnostics(), vec!["no_initial_state"]);
}

#[test]
fn debug_flag_traces_every_change() {
    let mut machine = patrol(true);

    let (_, capture) = captured(|| {
        machine.change_state(&mut (), &"Idle");
        machine.update(&mut (), 0.5);
        machine.update(&mut (), 0.5);
        machine.halt(&mut ());
    });

    assert_eq!(
        capture.debug_messages(),
        vec!["State: None -> Idle", "State: Idle -> Seek", "State: Seek -> None"]
    );
}

#[test]
fn no_trace_without_debug_flag() {
    let mut machine = patrol(false);

    let (_, capture) = captured(|| {
        machine.change_state(&mut (), &"Idle");
        machine.update(&mut (), 1.0);
    });

    assert_eq!(machine.current(), Some(&"Seek"));
    assert!(capture.debug_messages().is_empty());
    assert!(capture.diagnostics().is_empty());
}

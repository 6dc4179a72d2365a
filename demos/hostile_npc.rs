//! Hostile NPC
//!
//! This demo drives a guard dog through a simulated minute of game time.
//!
//! Key concepts:
//! - Enum states declared with `state_enum!`
//! - Guards over the entity and the time spent in a state
//! - Weighted edges choosing between fighting and fleeing
//! - The same behavior table authored as a JSON blueprint
//!
//! Run with: RUST_LOG=debug cargo run --example hostile_npc

use temperament::blueprint::{Blueprint, Library};
use temperament::builder::MachineBuilder;
use temperament::core::{Guard, Hooks};
use temperament::machine::Step;
use temperament::registry::StateConfig;
use temperament::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Dog {
        Idle,
        Seek,
        Attack,
        Flee,
        Dead,
    }
}

struct Hound {
    hp: i32,
    distance: f64,
    bites: u32,
}

impl Hound {
    fn sees_intruder(&self) -> bool {
        self.distance < 10.0
    }
}

const FRAME: f64 = 0.25;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Hostile NPC ===\n");
    built_in_code();
    println!();
    from_blueprint();
}

fn built_in_code() {
    let mut machine = MachineBuilder::new()
        .states(Dog::ALL.iter().copied())
        .configure(
            StateConfig::new(Dog::Idle)
                .hooks(Hooks::new().enter(|_: &mut Hound| println!("  the dog lies down")))
                .goto(Guard::when(|h: &Hound| h.hp <= 0), Dog::Dead)
                .goto(Guard::after(2.0), Dog::Seek),
        )
        .configure(
            StateConfig::new(Dog::Seek)
                .hooks(Hooks::new().update(|h: &mut Hound, dt| h.distance -= 4.0 * dt))
                .goto(Guard::when(|h: &Hound| h.hp <= 0), Dog::Dead)
                .weighted(
                    Guard::when(Hound::sees_intruder),
                    [(Dog::Attack, 0.7), (Dog::Flee, 0.3)],
                )
                .goto(Guard::after(6.0), Dog::Idle),
        )
        .configure(
            StateConfig::new(Dog::Attack)
                .hooks(
                    Hooks::new()
                        .update(|h: &mut Hound, _| {
                            h.bites += 1;
                            h.hp -= 3;
                        })
                        .exit(|h: &mut Hound| println!("  the dog stops after {} bites", h.bites)),
                )
                .goto(Guard::when(|h: &Hound| h.hp <= 0), Dog::Dead)
                .weighted(Guard::after(1.0), [(Dog::Attack, 1.0), (Dog::Flee, 1.0)]),
        )
        .configure(
            StateConfig::new(Dog::Flee)
                .hooks(Hooks::new().update(|h: &mut Hound, dt| h.distance += 6.0 * dt))
                .goto(Guard::after(3.0), Dog::Idle),
        )
        .configure(StateConfig::new(Dog::Dead).halt_when(Guard::always()))
        .initial(Dog::Idle)
        .debug(true)
        .build()
        .expect("valid configuration");

    let mut hound = Hound {
        hp: 20,
        distance: 30.0,
        bites: 0,
    };
    machine.start(&mut hound);

    for frame in 0..240 {
        match machine.update(&mut hound, FRAME) {
            Step::Transitioned { from, to } => {
                println!("  t={:>5.2}s {:?} -> {:?}", frame as f64 * FRAME, from, to)
            }
            Step::Halted { from } => {
                println!("  t={:>5.2}s halted in {:?}", frame as f64 * FRAME, from);
                break;
            }
            Step::Remained | Step::Inactive => {}
        }
    }
}

const BLUEPRINT: &str = r#"{
    "states": ["Idle", "Seek", "Attack", "Flee"],
    "initial": "Idle",
    "transitions": {
        "Idle": [{ "when": { "after": 1.0 }, "to": [{ "state": "Seek" }] }],
        "Seek": [{
            "when": { "named": "intruder" },
            "to": [{ "state": "Attack", "weight": 0.2 }, { "state": "Flee", "weight": 0.8 }]
        }],
        "Attack": [{ "when": { "after": 2.0 }, "to": [{ "state": "Idle" }] }],
        "Flee": [{ "when": { "after": 2.0 }, "to": [{ "state": "Idle" }] }]
    },
    "hooks": { "Seek": "approach" }
}"#;

fn from_blueprint() {
    let blueprint = Blueprint::from_json(BLUEPRINT).expect("valid blueprint");
    let library = Library::new()
        .guard("intruder", Guard::when(Hound::sees_intruder))
        .hooks(
            "approach",
            Hooks::new().update(|h: &mut Hound, dt| h.distance -= 8.0 * dt),
        );

    let mut machine = blueprint
        .into_machine(&library, rand::thread_rng())
        .expect("blueprint compiles");

    let mut hound = Hound {
        hp: 20,
        distance: 20.0,
        bites: 0,
    };
    println!("blueprint starts in {:?}", blueprint.initial());
    machine.start(&mut hound);

    for _ in 0..40 {
        if let Step::Transitioned { from, to } = machine.update(&mut hound, FRAME) {
            println!("  {from} -> {to} (distance {:.1})", hound.distance);
        }
    }
}

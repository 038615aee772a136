//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - One event driving every transition
//! - Enter callbacks reporting the new state
//!
//! Run with: cargo run --example traffic_light

use switchyard::builder::{simple_transition, FsmBuilder};
use switchyard::core::StateDefinition;
use switchyard::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Traffic Light State Machine ===\n");

    let mut builder = FsmBuilder::new().name("traffic-light");
    for light in TrafficLight::ALL.iter().copied() {
        builder = builder
            .define(StateDefinition::new(light).on_enter(move || println!("  -> {}", light.name())));
    }

    let machine = builder
        .rules(vec![
            simple_transition("tick", TrafficLight::Red, TrafficLight::Green),
            simple_transition("tick", TrafficLight::Green, TrafficLight::Yellow),
            simple_transition("tick", TrafficLight::Yellow, TrafficLight::Red),
        ])
        .build()?;

    println!("Initial state: {:?}\n", machine.state());
    println!("Ticking through two full cycles:");
    for _ in 0..6 {
        machine.dispatch("tick")?;
    }

    println!("\nFinal state: {:?}", machine.state());
    println!("Previous state: {:?}", machine.previous_state());

    println!("\n=== Example Complete ===");
    Ok(())
}

//! Coin-Operated Turnstile
//!
//! This example demonstrates guards and cycles.
//!
//! Key concepts:
//! - Guarded transitions reading caller-owned state
//! - Self-transitions firing `on_cycle` instead of enter/leave
//! - Distinguishing `NoTransition` from `Declined`
//!
//! Run with: cargo run --example turnstile

use std::cell::Cell;
use std::rc::Rc;
use switchyard::builder::goto_when;
use switchyard::machine::{Fsm, Outcome};
use switchyard::state_enum;

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
    }
}

state_enum! {
    enum Input {
        Coin,
        Push,
    }
}

const FARE: u32 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Turnstile Example ===\n");

    let credit = Rc::new(Cell::new(0u32));
    let paid = Rc::clone(&credit);
    let spent = Rc::clone(&credit);

    let turnstile = Fsm::with_states(Turnstile::ALL.iter().copied())?
        .named("turnstile")
        .configure(|fsm| {
            fsm.add_transition_with(
                Input::Coin,
                Turnstile::Locked,
                goto_when(Turnstile::Unlocked, move || paid.get() >= FARE),
            )?;
            fsm.add_transition(Input::Coin, Turnstile::Unlocked, Turnstile::Unlocked)?;
            fsm.add_transition(Input::Push, Turnstile::Unlocked, Turnstile::Locked)?;
            fsm.on_cycle(&Turnstile::Unlocked, || println!("  (already open, coin returned)"))?;
            fsm.on_leave(&Turnstile::Unlocked, move || spent.set(spent.get() - FARE))
        })?;

    for (coin, input) in [
        (20, Input::Coin),
        (20, Input::Coin),
        (0, Input::Push),
        (20, Input::Coin),
        (0, Input::Coin),
        (0, Input::Push),
        (0, Input::Push),
    ] {
        credit.set(credit.get() + coin);
        let outcome = turnstile.dispatch(input)?;
        let note = match outcome {
            Outcome::Transitioned { .. } => "moved",
            Outcome::Cycled(_) => "cycled",
            Outcome::NoTransition => "ignored",
            Outcome::Declined => "not enough credit",
        };
        println!(
            "{:<5} credit={:>3} state={:<9} {}",
            input.name(),
            credit.get(),
            turnstile.state().name(),
            note
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

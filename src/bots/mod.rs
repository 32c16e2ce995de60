//! Trader implementations for the sandwich simulation

pub mod sandwich_attacker;
pub mod victim;

pub use sandwich_attacker::{AttackTrace, SandwichAttacker};
pub use victim::VictimTrade;

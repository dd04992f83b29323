//! Streaming Module
//!
//! Sources of binary error observations: seeded synthetic streams for
//! simulation and a line-oriented reader for recorded outcomes.

mod reader;
mod simulator;

pub use reader::{read_observations, Observations};
pub use simulator::{MersenneBitStream, Regime, RegimeStream};

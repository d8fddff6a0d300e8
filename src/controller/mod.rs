pub mod affordance;
pub mod clock;
pub mod config;
pub mod interaction;

pub use affordance::*;
pub use clock::*;
pub use config::*;
pub use interaction::*;

#[cfg(test)]
mod tests;

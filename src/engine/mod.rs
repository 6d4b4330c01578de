pub mod agenda;
pub mod domains;
pub mod problem;
pub mod propagation;
mod propagation_engine;
#[cfg(test)]
pub(crate) mod test_helper;
pub mod trail;

pub use propagation_engine::*;

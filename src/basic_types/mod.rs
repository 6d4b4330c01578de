mod errors;
mod propagation_status_cp;

pub use errors::*;
pub use propagation_status_cp::*;

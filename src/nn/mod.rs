mod network;
mod pass;

pub use network::{Network, MINIMUM_LAYER_COUNT};
pub use pass::{Pass, Trace};

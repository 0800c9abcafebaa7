pub mod activation;
pub mod data;
pub mod loss;
pub mod shape;

pub use activation::*;
pub use data::*;
pub use loss::*;
pub use shape::*;

mod workout;
pub use workout::*;

mod exercise;
pub use exercise::*;

pub mod race;
pub mod verdict;
pub mod wager;

pub use race::*;
pub use verdict::*;
pub use wager::*;

pub mod leaderboard;
pub mod margin_scorer;
pub mod weekly;
pub mod ytd;

pub use leaderboard::*;
pub use margin_scorer::*;
pub use weekly::*;
pub use ytd::*;

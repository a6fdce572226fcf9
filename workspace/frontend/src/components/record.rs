mod leaderboard;
mod stats;
mod view;

pub use view::RecordTab;

mod view;

pub use view::WorkoutTab;

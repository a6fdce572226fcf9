mod view;

pub use view::MainShell;

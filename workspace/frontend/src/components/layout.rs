mod navbar;
mod sidebar;
pub mod layout;

pub use layout::Layout;

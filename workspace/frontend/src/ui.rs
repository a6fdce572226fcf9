//! Shared presentation pieces: toasts, spinners, error panels and the fetch hook.

pub mod error;
pub mod fetch_hook;
pub mod fetch_render;
pub mod loading;
pub mod toast;

pub use error::ErrorDisplay;
pub use fetch_hook::use_fetch_with_refetch;
pub use fetch_render::FetchRender;
pub use loading::Loading;
pub use toast::{ToastContext, ToastProvider};

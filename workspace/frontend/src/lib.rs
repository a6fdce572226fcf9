use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod api_client;
pub mod charts;
pub mod dashboard;
pub mod hooks;
pub mod navigation;
pub mod plans;
pub mod router;
pub mod settings;
pub mod social;
pub mod tabs;
pub mod ui;

use router::{switch, Route};
use ui::ToastProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== FiTrack Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Social feed: {}, plans: {}", settings.social_mode.as_str(), settings.plan_collection.as_str());
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}

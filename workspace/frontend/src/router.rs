use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Layout;
use crate::components::plans::PlanTab;
use crate::components::settings::Settings;
use crate::components::shell::MainShell;
use crate::settings::PlanCollection;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/my_plan")]
    MyPlan,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering main shell");
            html! { <Layout title="FiTrack"><MainShell /></Layout> }
        }
        Route::MyPlan => {
            log::trace!("Rendering My Plan page");
            html! { <Layout title="My Plan"><PlanTab collection={PlanCollection::Mine} /></Layout> }
        }
        Route::Settings => {
            log::trace!("Rendering Settings page");
            html! { <Layout title="Settings"><Settings /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::MyPlan.to_path(), "/my_plan");
        assert_eq!(Route::recognize("/settings"), Some(Route::Settings));
    }
}

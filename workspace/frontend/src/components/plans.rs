mod plan_card;
mod plan_modal;
mod view;

pub use view::PlanTab;

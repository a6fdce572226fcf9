mod composer;
mod post_card;
mod view;

pub use view::SocialTab;

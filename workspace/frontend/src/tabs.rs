use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Record,
    Workout,
    Plan,
    Social,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Record, Tab::Workout, Tab::Plan, Tab::Social];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Record => "Record",
            Tab::Workout => "Workout",
            Tab::Plan => "Plan",
            Tab::Social => "Social",
        }
    }

    /// Element id of the tab's content section.
    pub fn section_id(&self) -> &'static str {
        match self {
            Tab::Record => "record",
            Tab::Workout => "workout",
            Tab::Plan => "plan",
            Tab::Social => "social",
        }
    }

    /// Matches a nav label, ignoring surrounding whitespace and case.
    pub fn from_label(label: &str) -> Option<Tab> {
        let label = label.trim();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::from_label(s).ok_or_else(|| format!("Unknown tab: {}", s))
    }
}

/// Work a tab asks for when it becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEffect {
    RefreshDashboard,
    LoadPosts,
}

/// Tab state of the main shell. Only `active` is stored, so exactly one tab
/// is active by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabRouter {
    active: Tab,
    /// Bumped on every `RefreshDashboard`; passed to the record tab as a prop.
    pub refresh_token: u32,
    /// Bumped on every `LoadPosts`; passed to the social tab as a prop.
    pub posts_token: u32,
}

impl TabRouter {
    pub fn new(initial: Tab) -> Self {
        Self {
            active: initial,
            ..Self::default()
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// CSS class of a nav item or section.
    pub fn class_for(&self, tab: Tab) -> &'static str {
        if self.is_active(tab) {
            "active"
        } else {
            ""
        }
    }

    /// Switches to `tab`. Clicking the current tab again re-runs its effect.
    pub fn activate(&mut self, tab: Tab) -> Option<TabEffect> {
        log::debug!("Activating tab {} (was {})", tab, self.active);
        self.active = tab;
        let effect = match tab {
            Tab::Record => Some(TabEffect::RefreshDashboard),
            Tab::Social => Some(TabEffect::LoadPosts),
            Tab::Workout | Tab::Plan => None,
        };
        match effect {
            Some(TabEffect::RefreshDashboard) => self.refresh_token = next_token(self.refresh_token),
            Some(TabEffect::LoadPosts) => self.posts_token = next_token(self.posts_token),
            None => {}
        }
        effect
    }
}

/// Zero means "never issued", so the counter skips it when it wraps.
fn next_token(token: u32) -> u32 {
    token.wrapping_add(1).max(1)
}

/// Whether an effect token has been issued at least once.
pub fn effect_requested(token: u32) -> bool {
    token != 0
}

pub enum TabAction {
    Activate(Tab),
}

impl Reducible for TabRouter {
    type Action = TabAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TabAction::Activate(tab) => {
                next.activate(tab);
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Tab::from_label(" social "), Some(Tab::Social));
        assert_eq!(Tab::from_label("RECORD"), Some(Tab::Record));
        assert_eq!(Tab::from_label("Profile"), None);
        assert_eq!("Plan".parse::<Tab>(), Ok(Tab::Plan));
    }

    #[test]
    fn test_effects_per_tab() {
        let mut router = TabRouter::default();
        assert_eq!(router.activate(Tab::Social), Some(TabEffect::LoadPosts));
        assert_eq!(router.activate(Tab::Workout), None);
        assert_eq!(router.activate(Tab::Plan), None);
        assert_eq!(router.activate(Tab::Record), Some(TabEffect::RefreshDashboard));
        assert_eq!(router.refresh_token, 1);
        assert_eq!(router.posts_token, 1);
    }

    #[test]
    fn test_reactivation_reissues_effect() {
        let mut router = TabRouter::new(Tab::Social);
        router.activate(Tab::Social);
        router.activate(Tab::Social);
        assert_eq!(router.posts_token, 2);
        assert_eq!(router.refresh_token, 0);
    }

    #[test]
    fn test_exactly_one_active_after_any_sequence() {
        let mut router = TabRouter::default();
        let clicks = [
            Tab::Plan,
            Tab::Social,
            Tab::Social,
            Tab::Record,
            Tab::Workout,
            Tab::Record,
            Tab::Plan,
        ];
        for tab in clicks {
            router.activate(tab);
            let active: Vec<_> = Tab::ALL.into_iter().filter(|t| router.is_active(*t)).collect();
            assert_eq!(active, vec![tab]);
            assert_eq!(router.class_for(tab), "active");
        }
    }

    #[test]
    fn test_posts_not_requested_until_social_entered() {
        let mut router = TabRouter::new(Tab::Record);
        assert!(!effect_requested(router.posts_token));
        router.activate(Tab::Plan);
        router.activate(Tab::Record);
        assert!(!effect_requested(router.posts_token));
        router.activate(Tab::Social);
        assert!(effect_requested(router.posts_token));

        router.posts_token = u32::MAX;
        router.activate(Tab::Social);
        assert_eq!(router.posts_token, 1);
    }

    #[test]
    fn test_reducer() {
        let state = Rc::new(TabRouter::default());
        let state = state.reduce(TabAction::Activate(Tab::Social));
        assert_eq!(state.active(), Tab::Social);
        assert_eq!(state.posts_token, 1);
    }
}

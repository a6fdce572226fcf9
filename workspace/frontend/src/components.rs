pub mod layout;
pub mod plans;
pub mod record;
pub mod settings;
pub mod shell;
pub mod social;
pub mod workout;

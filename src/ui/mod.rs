pub mod app;
pub mod components;
pub mod effect;
pub mod events;
pub mod terminal_guard;
pub mod theme;

pub use app::App;
pub use effect::{effects_for_transition, Effect};
pub use events::AppEvent;

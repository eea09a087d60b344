mod cake;
mod chrome;
mod confirm;
mod decorate;
mod firework;
mod heart_rain;
mod intro;
mod message;
mod photo;
mod prompt;
mod reply_dialog;

pub use cake::CakeScene;
pub use chrome::{centered_line, DialogFrame, InstructionBar};
pub use confirm::{ConfirmChoice, ConfirmPrompt};
pub use decorate::DecorateView;
pub use firework::FireworkStage;
pub use heart_rain::HeartRain;
pub use intro::IntroView;
pub use message::MessageView;
pub use photo::PhotoReveal;
pub use prompt::PulsePrompt;
pub use reply_dialog::{ReplyDialog, ReplyPhase};

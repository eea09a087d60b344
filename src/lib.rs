pub mod audio;
pub mod config;
pub mod overlay;
pub mod reply;
pub mod scene;
pub mod timeline;
pub mod ui;
pub mod util;

pub use audio::MusicPlayer;
pub use config::Config;
pub use overlay::OverlayEffects;
pub use reply::{
    HttpTransport, ReplyError, ReplyGateway, ReplyPayload, ReplyStore, ReplyTransport,
    SubmitOutcome,
};
pub use scene::{Scene, SceneMachine, Transition};
pub use timeline::{
    EffectEntity, EffectKind, EffectRegistry, FireworksShow, StaggeredBurst, TextSequencer,
    TextStep,
};
pub use ui::App;

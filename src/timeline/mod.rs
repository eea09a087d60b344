//! Deadline-driven timers and ephemeral effect state.
//!
//! Everything here is advanced by the frame tick with an injected
//! [`std::time::Instant`], so behavior is deterministic under test without
//! sleeping.

mod burst;
mod fireworks;
mod registry;
mod sequencer;

pub use burst::{StaggeredBurst, FIRECRACKER_COUNT, FIRECRACKER_STAGGER, FIRECRACKER_TTL};
pub use fireworks::{EmitterTick, FireworksShow};
pub use registry::{EffectEntity, EffectKind, EffectRegistry};
pub use sequencer::{TextSequencer, TextStep};

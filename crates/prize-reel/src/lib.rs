pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod audio;
pub mod prize;
pub mod reel;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::types::{EntityId, PlayMode, RevealEvent};
pub use api::wheel::PrizeWheel;
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::shape::{Color, FadeDirection, ShapeComponent, ShapeKind};
pub use components::sprite::{SpriteComponent, AtlasId};
pub use crate::core::scene::Scene;
pub use crate::core::time::{Deadline, Interval};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{CommandQueue, WheelCommand, WheelHandle};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use audio::{AudioBackend, AudioContext, AudioFeedback, PcmBackend, PcmCapture, SilentBackend, Voice, Waveform};
pub use prize::{BulkPrize, Prize, PrizeTable, Rarity};
pub use prize::catalog::{Catalog, Competition};
pub use prize::selector::{select_prize, FixedSource, RandomSource, SeededSource, SequenceSource};
pub use prize::summary::{summarize, PrizeGroup};
pub use reel::Reel;
pub use reel::spin::{SpinController, SpinPhase};
pub use reel::surface::RenderSurface;
pub use error::{AudioError, CatalogError, ConfigError, PrizeTableError, SurfaceError};

// Extensions: tweening and transform hierarchy
pub use extensions::{
    Easing, lerp, ease,
    TransformGraph, LocalTransform,
    Animatable, TweenState, Tween, TweenEvent, TweenId, TweenTarget,
};

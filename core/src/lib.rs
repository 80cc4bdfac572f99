pub mod config;
pub mod controller;
pub mod geometry;
pub mod hearts;
pub mod reveal;

pub use config::{ConfigError, DomNames, HeartRainConfig, KnobConfig, Range};
pub use controller::{
    DragState, FlowerState, HeartRainState, KeyCommand, KnobController, KnobEffect, KnobLayout,
    SongState,
};
pub use geometry::{angle_of, wrap_delta, wrap_index, KnobRect, RotationMap};
pub use hearts::{HeartRain, HeartRainPlan, HeartStyle, UnitSource};
pub use reveal::{Message, Reveal, RevealPhase, RevealStep, TextRender};

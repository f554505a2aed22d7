pub mod config;
pub mod constants;
pub mod deform;
pub mod error;
pub mod field;
pub mod gesture;
pub mod mailbox;
pub mod noise;
pub mod palette;
pub mod scene;
pub mod smoothing;
pub mod state;
pub mod theme;
pub mod tracker;
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use config::*;
pub use deform::*;
pub use error::*;
pub use field::*;
pub use gesture::*;
pub use mailbox::*;
pub use palette::*;
pub use scene::*;
pub use smoothing::*;
pub use state::*;
pub use theme::*;
pub use tracker::*;

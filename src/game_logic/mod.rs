pub mod archetypes;
pub mod collisions;
pub mod constants;
pub mod input;
pub mod palette;
pub mod particles;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod track;
pub mod vehicle;

pub use archetypes::*;
pub use collisions::*;
pub use constants::*;
pub use input::*;
pub use palette::*;
pub use particles::*;
pub use physics::*;
pub use scoring::*;
pub use session::*;
pub use track::*;
pub use vehicle::*;

pub mod anchor;
pub mod config;
pub mod constants;
pub mod error;
pub mod glow;
pub mod hero;
pub mod motion;
pub mod particles;
pub mod physics;
pub mod scheduler;
pub mod viewport;

pub use anchor::*;
pub use config::*;
pub use error::*;
pub use glow::*;
pub use hero::*;
pub use motion::*;
pub use particles::*;
pub use physics::BodyParams;
pub use scheduler::*;
pub use viewport::*;

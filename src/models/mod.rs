// Models module - account snapshot and API data structures

pub mod account;
pub mod profile;
pub mod mission;
pub mod labeling;
pub mod responses;

// Re-export all models for easier imports
pub use account::*;
pub use profile::*;
pub use mission::*;
pub use labeling::*;
pub use responses::*;

// Operations module - per-account bot steps

pub mod accounts;
pub mod profile;
pub mod missions;
pub mod labeling;

pub use accounts::*;
pub use profile::*;
pub use missions::*;
pub use labeling::*;

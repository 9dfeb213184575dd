//! Repository layer: one zero-sized struct per table with async query methods.

pub mod build_config_repo;
pub mod user_config_repo;

pub use build_config_repo::BuildConfigRepo;
pub use user_config_repo::UserConfigRepo;

pub mod account;
pub mod context;
pub mod events;
pub mod org;
pub mod pipelines;
pub mod projects;
pub mod resources;
pub mod scratchpad;

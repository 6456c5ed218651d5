pub mod clusters;
pub mod events;
pub mod infra_envs;
pub mod openshift_versions;
pub mod operators;
pub mod support_levels;

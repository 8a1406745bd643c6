pub mod advisor;
pub mod bmi;
pub mod dashboard;
pub mod normalizer;
pub mod session;
pub mod task_store;

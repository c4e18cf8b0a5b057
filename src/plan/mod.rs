//! Plan inputs and batch loading

mod data;
mod loader;

pub use data::SwpPlan;
pub use loader::{load_plans, load_plans_from_reader, PlanRow};

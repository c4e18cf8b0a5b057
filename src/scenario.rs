//! Scenario runner for efficient batch projections
//!
//! Holds a base configuration once, then runs many projections against it
//! without rebuilding engines at every call site.

use crate::plan::SwpPlan;
use crate::projection::{InvalidInput, Projection, ProjectionConfig, ProjectionEngine};

/// Pre-configured runner for repeated projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for rate in [0.06, 0.08, 0.10] {
///     let mut scenario = plan.clone();
///     scenario.annual_return_rate = rate;
///     let result = runner.run(&scenario)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default projection config
    pub fn new() -> Self {
        Self {
            base_config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a specific projection config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            base_config: config,
        }
    }

    /// Run a single projection with the base config
    pub fn run(&self, plan: &SwpPlan) -> Result<Projection, InvalidInput> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        engine.project(plan)
    }

    /// Run projections for multiple plans with the same config.
    ///
    /// Per-plan failures do not abort the batch; each entry carries its
    /// own result.
    pub fn run_batch(&self, plans: &[SwpPlan]) -> Vec<Result<Projection, InvalidInput>> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        plans.iter().map(|p| engine.project(p)).collect()
    }

    /// Run multiple configs (e.g. horizon variants) for a single plan
    pub fn run_scenarios(
        &self,
        plan: &SwpPlan,
        configs: &[ProjectionConfig],
    ) -> Result<Vec<Projection>, InvalidInput> {
        configs
            .iter()
            .map(|config| ProjectionEngine::new(config.clone()).project(plan))
            .collect()
    }

    /// Sweep return-rate assumptions for a single plan, holding the rest
    /// of the inputs fixed
    pub fn sweep_return_rates(
        &self,
        plan: &SwpPlan,
        rates: &[f64],
    ) -> Result<Vec<Projection>, InvalidInput> {
        rates
            .iter()
            .map(|&rate| {
                let scenario = SwpPlan {
                    annual_return_rate: rate,
                    ..plan.clone()
                };
                self.run(&scenario)
            })
            .collect()
    }

    /// Get reference to the base config for inspection
    pub fn config(&self) -> &ProjectionConfig {
        &self.base_config
    }

    /// Get mutable reference to the base config for customization
    pub fn config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

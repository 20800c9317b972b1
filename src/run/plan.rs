//! Execution plan: the linearized step sequence for one run

use crate::parser::Script;
use crate::run::step::Step;
use std::collections::BTreeMap;

/// The full ordered sequence of steps derived from a loaded script
///
/// Before-actions come first, in declaration order. Stands follow, grouped by
/// ascending key; inside a key group they keep the order their owning test
/// case/stand pair was declared in the script, across all test cases. The
/// plan is built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    steps: Vec<Step>,
}

impl ExecutionPlan {
    /// Linearize a parsed script into its execution order
    pub fn build(script: Script) -> Self {
        let mut steps: Vec<Step> = script
            .befores
            .into_iter()
            .map(|before| Step::before(before.description, before.ops))
            .collect();

        // BTreeMap iteration yields ascending keys; pushing in declaration
        // order keeps the in-group order stable.
        let mut by_key: BTreeMap<i64, Vec<Step>> = BTreeMap::new();
        for case in script.cases {
            for stand in case.stands {
                by_key
                    .entry(stand.key)
                    .or_default()
                    .push(Step::stand(case.name.clone(), stand.key, stand.ops));
            }
        }
        for (_, group) in by_key {
            steps.extend(group);
        }

        ExecutionPlan { steps }
    }

    /// The steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps in the plan
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan contains no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

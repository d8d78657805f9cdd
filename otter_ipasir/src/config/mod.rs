/*!
Configuration of a context.

All configuration for a context is contained within a [Config], as a collection of [ConfigOption]s.
Each option carries its own bounds and the greatest [state](crate::context::ContextState) in which it may be set, and the [registry] of options exposed by a context is derived from these when the context is created.

```rust
# use otter_ipasir::config::Config;
# use otter_ipasir::context::Context;
let mut config = Config::default();
config.decision_limit.value = 0;

let context = Context::from_config(config);
assert!(context.option_handle("ipasir.limits.decisions").is_ok());
```
*/

use std::collections::HashMap;

mod config_option;
pub use config_option::{ConfigOption, OptionRepr};

pub mod registry;
use registry::{OptionDescriptor, OptionId, OptionValue};

use crate::{
    context::ContextState,
    generic::luby::LubyRepresentation,
    structures::atom::Atom,
    types::err::ErrorKind,
};

/// Representation of activity, of both atoms and clauses.
pub type Activity = f64;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// `ipasir.limits.decisions`: -1 for no limit, otherwise the number of decisions permitted in a solve.
    pub decision_limit: ConfigOption<i64>,

    /// `ipasir.limits.conflicts`: -1 for no limit, otherwise the number of conflicts permitted in a solve.
    pub conflict_limit: ConfigOption<i64>,

    /// The seed of the source of rng.
    pub seed: ConfigOption<u64>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// Permit forgetting clauses in the addition database.
    pub reduction: ConfigOption<bool>,

    /// Default to the last set value of an atom when choosing a value for the atom.
    pub phase_saving: ConfigOption<bool>,

    /// The initial phase of atoms: -1 false, 1 true, 0 decided by [polarity_lean](Config::polarity_lean).
    ///
    /// Indexed, with values for specific atoms kept in [atom_phases](Config::atom_phases).
    pub phase: ConfigOption<i64>,

    /// Initial phases of specific atoms.
    pub atom_phases: HashMap<Atom, i64>,

    /// The probability of assigning positive polarity to an atom when freely choosing an atom.
    pub polarity_lean: ConfigOption<f64>,

    /// The probability of choosing a random atom when making a decision, rather than the most active.
    pub random_decision_bias: ConfigOption<f64>,

    /// The decay of atom and clause activity after each conflict.
    pub activity_decay: ConfigOption<Activity>,

    /// The number of addition clauses kept before the first reduction.
    pub reduction_base: usize,

    /// The growth of [reduction_base](Config::reduction_base) after each reduction.
    pub reduction_growth: usize,

    /// The most clauses read from the import callback in one poll.
    pub import_batch: usize,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick, deterministic, results on small formulas.
    fn default() -> Self {
        Config {
            decision_limit: ConfigOption {
                name: "ipasir.limits.decisions",
                min: -1,
                max: i32::MAX as i64,
                max_state: ContextState::Input,
                tunable: false,
                indexed: false,
                value: -1,
            },

            conflict_limit: ConfigOption {
                name: "ipasir.limits.conflicts",
                min: -1,
                max: i32::MAX as i64,
                max_state: ContextState::Input,
                tunable: false,
                indexed: false,
                value: -1,
            },

            seed: ConfigOption {
                name: "otter.seed",
                min: 0,
                max: i64::MAX as u64,
                max_state: ContextState::Configuration,
                tunable: false,
                indexed: false,
                value: 0,
            },

            restart: ConfigOption {
                name: "otter.restart",
                min: false,
                max: true,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: true,
            },

            luby_u: ConfigOption {
                name: "otter.luby_u",
                min: 1,
                max: 65536,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: 128,
            },

            reduction: ConfigOption {
                name: "otter.reduction",
                min: false,
                max: true,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: true,
            },

            phase_saving: ConfigOption {
                name: "otter.phase_saving",
                min: false,
                max: true,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: true,
            },

            phase: ConfigOption {
                name: "otter.phase",
                min: -1,
                max: 1,
                max_state: ContextState::Input,
                tunable: true,
                indexed: true,
                value: 0,
            },

            atom_phases: HashMap::default(),

            polarity_lean: ConfigOption {
                name: "otter.polarity_lean",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "otter.random_decision_bias",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: 0.0,
            },

            activity_decay: ConfigOption {
                name: "otter.activity_decay",
                min: 0.5,
                max: 0.999,
                max_state: ContextState::Input,
                tunable: true,
                indexed: false,
                value: 0.95,
            },

            reduction_base: 2000,
            reduction_growth: 300,
            import_batch: 256,
        }
    }
}

impl Config {
    /// Descriptors of every option, IPASIR-2 options first.
    pub fn descriptors(&self) -> Vec<OptionDescriptor> {
        vec![
            self.decision_limit.descriptor(OptionId::DecisionLimit),
            self.conflict_limit.descriptor(OptionId::ConflictLimit),
            self.seed.descriptor(OptionId::Seed),
            self.restart.descriptor(OptionId::Restart),
            self.luby_u.descriptor(OptionId::LubyU),
            self.reduction.descriptor(OptionId::Reduction),
            self.phase_saving.descriptor(OptionId::PhaseSaving),
            self.phase.descriptor(OptionId::Phase),
            self.polarity_lean.descriptor(OptionId::PolarityLean),
            self.random_decision_bias.descriptor(OptionId::RandomDecisionBias),
            self.activity_decay.descriptor(OptionId::ActivityDecay),
        ]
    }

    /// Sets the option identified by `id` to `value`.
    ///
    /// `index` is read only for indexed options, and is assumed to be zero or an atom.
    ///
    /// # Errors
    /// [OptionInvalidValue](ErrorKind::OptionInvalidValue) if `value` is of the wrong kind or out of bounds.
    pub fn apply(
        &mut self,
        id: OptionId,
        value: OptionValue,
        index: Atom,
    ) -> Result<(), ErrorKind> {
        fn set<T: OptionRepr>(
            option: &mut ConfigOption<T>,
            value: OptionValue,
        ) -> Result<(), ErrorKind> {
            option.value = option.admits(value).ok_or(ErrorKind::OptionInvalidValue)?;
            Ok(())
        }

        match id {
            OptionId::DecisionLimit => set(&mut self.decision_limit, value),
            OptionId::ConflictLimit => set(&mut self.conflict_limit, value),
            OptionId::Seed => set(&mut self.seed, value),
            OptionId::Restart => set(&mut self.restart, value),
            OptionId::LubyU => set(&mut self.luby_u, value),
            OptionId::Reduction => set(&mut self.reduction, value),
            OptionId::PhaseSaving => set(&mut self.phase_saving, value),
            OptionId::Phase => match index {
                0 => {
                    set(&mut self.phase, value)?;
                    self.atom_phases.clear();
                    Ok(())
                }
                atom => {
                    let phase = self.phase.admits(value).ok_or(ErrorKind::OptionInvalidValue)?;
                    self.atom_phases.insert(atom, phase);
                    Ok(())
                }
            },
            OptionId::PolarityLean => set(&mut self.polarity_lean, value),
            OptionId::RandomDecisionBias => set(&mut self.random_decision_bias, value),
            OptionId::ActivityDecay => set(&mut self.activity_decay, value),
        }
    }

    /// The value of the option identified by `id`.
    ///
    /// For indexed options, the value for the atom `index` if one has been set, and otherwise the value for all atoms.
    pub fn value_of(&self, id: OptionId, index: Atom) -> OptionValue {
        match id {
            OptionId::DecisionLimit => self.decision_limit.value.to_value(),
            OptionId::ConflictLimit => self.conflict_limit.value.to_value(),
            OptionId::Seed => self.seed.value.to_value(),
            OptionId::Restart => self.restart.value.to_value(),
            OptionId::LubyU => self.luby_u.value.to_value(),
            OptionId::Reduction => self.reduction.value.to_value(),
            OptionId::PhaseSaving => self.phase_saving.value.to_value(),
            OptionId::Phase => self.phase_of(index).to_value(),
            OptionId::PolarityLean => self.polarity_lean.value.to_value(),
            OptionId::RandomDecisionBias => self.random_decision_bias.value.to_value(),
            OptionId::ActivityDecay => self.activity_decay.value.to_value(),
        }
    }

    /// The initial phase of `atom`: -1, 0 or 1.
    pub fn phase_of(&self, atom: Atom) -> i64 {
        match self.atom_phases.get(&atom) {
            Some(phase) => *phase,
            None => self.phase.value,
        }
    }

    /// The limit on decisions, if any.
    pub fn decision_limit(&self) -> Option<usize> {
        usize::try_from(self.decision_limit.value).ok()
    }

    /// The limit on conflicts, if any.
    pub fn conflict_limit(&self) -> Option<usize> {
        usize::try_from(self.conflict_limit.value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_namespaced() {
        let descriptors = Config::default().descriptors();
        for (i, a) in descriptors.iter().enumerate() {
            assert!(a.name.starts_with("ipasir.") || a.name.starts_with("otter."));
            for b in &descriptors[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn defaults_within_bounds() {
        let config = Config::default();
        for descriptor in config.descriptors() {
            let value = config.value_of(descriptor.id, 0);
            let mut copy = config.clone();
            assert!(copy.apply(descriptor.id, value, 0).is_ok(), "{}", descriptor.name);
        }
    }

    #[test]
    fn indexed_phase() {
        let mut config = Config::default();
        assert!(config.apply(OptionId::Phase, OptionValue::Int(1), 7).is_ok());
        assert_eq!(config.phase_of(7), 1);
        assert_eq!(config.phase_of(8), 0);

        assert!(config.apply(OptionId::Phase, OptionValue::Int(-1), 0).is_ok());
        assert_eq!(config.phase_of(7), -1);
        assert_eq!(config.value_of(OptionId::Phase, 8), OptionValue::Int(-1));
    }

    #[test]
    fn limits() {
        let mut config = Config::default();
        assert_eq!(config.decision_limit(), None);
        assert!(config.apply(OptionId::DecisionLimit, OptionValue::Int(0), 0).is_ok());
        assert_eq!(config.decision_limit(), Some(0));
        assert_eq!(
            config.apply(OptionId::ConflictLimit, OptionValue::Int(-2), 0),
            Err(ErrorKind::OptionInvalidValue)
        );
    }
}

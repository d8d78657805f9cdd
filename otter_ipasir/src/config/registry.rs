/*!
Descriptors of the options a context supports.

The registry of a context is built once, from its [Config](super::Config), when the context is created, and does not change afterwards.
Descriptors are read through [options](crate::context::GenericContext::options) and used to set and query values through [set_option](crate::context::GenericContext::set_option) and [option_value](crate::context::GenericContext::option_value).

Setting an option is checked in order:
1. The name of the descriptor must be known, else [OptionUnknown](crate::types::err::ErrorKind::OptionUnknown).
2. The value must be of the kind of the descriptor and within its bounds, else [OptionInvalidValue](crate::types::err::ErrorKind::OptionInvalidValue).
3. The state of the context must be at most the max state of the descriptor, else [InvalidState](crate::types::err::ErrorKind::InvalidState).
4. For indexed options, the index must be zero (all atoms) or an atom, else [InvalidArgument](crate::types::err::ErrorKind::InvalidArgument).

Names in the [IPASIR_NAMESPACE] have the meaning given to them by IPASIR-2.
All other options of the library live in the `otter.` namespace.
*/

use crate::context::ContextState;

/// The namespace reserved for options defined by IPASIR-2.
pub const IPASIR_NAMESPACE: &str = "ipasir.";

/// The kind of value an option takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// An integer value.
    Int,

    /// A floating point value.
    Float,
}

/// The value of an option, tagged with its kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptionValue {
    /// An integer value.
    Int(i64),

    /// A floating point value.
    Float(f64),
}

impl OptionValue {
    /// The kind of the value.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Int(_) => OptionKind::Int,
            Self::Float(_) => OptionKind::Float,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Internal identifiers of options, used to route a descriptor to the field of a config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionId {
    DecisionLimit,
    ConflictLimit,
    Seed,
    Restart,
    LubyU,
    Reduction,
    PhaseSaving,
    Phase,
    PolarityLean,
    RandomDecisionBias,
    ActivityDecay,
}

/// An immutable description of an option.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionDescriptor {
    /// A unique, dot-namespaced, name.
    pub name: &'static str,

    /// The kind of value taken.
    pub kind: OptionKind,

    /// The least value, inclusive.
    pub min: OptionValue,

    /// The greatest value, inclusive.
    pub max: OptionValue,

    /// The greatest state in which the option may be set.
    pub max_state: ContextState,

    /// Whether the option is eligible for use by automatic tuners.
    pub tunable: bool,

    /// Whether the option may be set per atom.
    pub indexed: bool,

    pub(crate) id: OptionId,
}

impl OptionDescriptor {
    /// True if the option is defined by IPASIR-2.
    pub fn is_ipasir(&self) -> bool {
        self.name.starts_with(IPASIR_NAMESPACE)
    }

    /// True if `value` is of the kind of the option and within its bounds.
    pub fn admits(&self, value: OptionValue) -> bool {
        match (self.min, value, self.max) {
            (OptionValue::Int(min), OptionValue::Int(v), OptionValue::Int(max)) => {
                min <= v && v <= max
            }
            (OptionValue::Float(min), OptionValue::Float(v), OptionValue::Float(max)) => {
                min <= v && v <= max
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for OptionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: ({},{}) {}",
            self.name, self.min, self.max, self.max_state
        )?;
        if self.tunable {
            write!(f, " tunable")?;
        }
        if self.indexed {
            write!(f, " indexed")?;
        }
        Ok(())
    }
}

use crate::{
    config::registry::{OptionDescriptor, OptionId, OptionKind, OptionValue},
    context::ContextState,
};

/// A typed, bounded, configuration option.
#[derive(Clone)]
pub struct ConfigOption<T> {
    /// The name of the option, unique within a [Config](super::Config).
    pub name: &'static str,

    /// The least value of the option.
    pub min: T,

    /// The greatest value of the option.
    pub max: T,

    /// The greatest state in which the option may be set.
    pub max_state: ContextState,

    /// Whether the option is eligible for use by automatic tuners.
    pub tunable: bool,

    /// Whether the option may be set per atom.
    pub indexed: bool,

    /// The current value of the option.
    pub value: T,
}

/// Types which may be the value of an option, through an [OptionValue].
pub trait OptionRepr: Copy + PartialOrd {
    /// The kind of value the type is represented as.
    const KIND: OptionKind;

    /// The representation of `self`.
    fn to_value(self) -> OptionValue;

    /// The instance represented by `value`, if any.
    fn from_value(value: OptionValue) -> Option<Self>;
}

impl OptionRepr for bool {
    const KIND: OptionKind = OptionKind::Int;

    fn to_value(self) -> OptionValue {
        OptionValue::Int(self as i64)
    }

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(0) => Some(false),
            OptionValue::Int(1) => Some(true),
            _ => None,
        }
    }
}

impl OptionRepr for i64 {
    const KIND: OptionKind = OptionKind::Int;

    fn to_value(self) -> OptionValue {
        OptionValue::Int(self)
    }

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(v) => Some(v),
            OptionValue::Float(_) => None,
        }
    }
}

impl OptionRepr for u32 {
    const KIND: OptionKind = OptionKind::Int;

    fn to_value(self) -> OptionValue {
        OptionValue::Int(self as i64)
    }

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(v) => u32::try_from(v).ok(),
            OptionValue::Float(_) => None,
        }
    }
}

impl OptionRepr for u64 {
    const KIND: OptionKind = OptionKind::Int;

    fn to_value(self) -> OptionValue {
        OptionValue::Int(i64::try_from(self).unwrap_or(i64::MAX))
    }

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(v) => u64::try_from(v).ok(),
            OptionValue::Float(_) => None,
        }
    }
}

impl OptionRepr for f64 {
    const KIND: OptionKind = OptionKind::Float;

    fn to_value(self) -> OptionValue {
        OptionValue::Float(self)
    }

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Float(v) => Some(v),
            OptionValue::Int(_) => None,
        }
    }
}

impl<T: OptionRepr> ConfigOption<T> {
    /// The bounds of the option.
    pub fn min_max(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// The value of the option, if `value` is of the right kind and within bounds.
    pub fn admits(&self, value: OptionValue) -> Option<T> {
        let candidate = T::from_value(value)?;
        match self.min <= candidate && candidate <= self.max {
            true => Some(candidate),
            false => None,
        }
    }

    /// The descriptor of the option, identified by `id`.
    pub fn descriptor(&self, id: OptionId) -> OptionDescriptor {
        OptionDescriptor {
            name: self.name,
            kind: T::KIND,
            min: self.min.to_value(),
            max: self.max.to_value(),
            max_state: self.max_state,
            tunable: self.tunable,
            indexed: self.indexed,
            id,
        }
    }
}

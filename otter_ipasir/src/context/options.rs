//! Querying and setting the options of a context, through the [registry](crate::config::registry).

use crate::{
    config::registry::{OptionDescriptor, OptionId, OptionValue},
    misc::log::targets::{self},
    structures::atom::{Atom, ATOM_MAX},
    types::err::ErrorKind,
};

use super::{legality::Operation, GenericContext};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// The options supported by the context.
    pub fn options(&self) -> Result<&[OptionDescriptor], ErrorKind> {
        self.check(Operation::Options)?;
        Ok(&self.options)
    }

    /// The descriptor of the option named `name`.
    ///
    /// # Errors
    /// [OptionUnknown](ErrorKind::OptionUnknown) if the context has no option named `name`.
    pub fn option_handle(&self, name: &str) -> Result<OptionDescriptor, ErrorKind> {
        self.check(Operation::Options)?;
        self.registered(name).cloned()
    }

    /// Sets the option described by `descriptor` to `value`, for the atom `index` if the option is indexed.
    ///
    /// An index of zero sets the option for all atoms, and for indexed options overrides any value set for a specific atom.
    /// The order in which arguments are checked is given in the [registry](crate::config::registry) documentation.
    pub fn set_option(
        &mut self,
        descriptor: &OptionDescriptor,
        value: OptionValue,
        index: i64,
    ) -> Result<(), ErrorKind> {
        let registered = self.registered(descriptor.name)?.clone();

        if !registered.admits(value) {
            log::debug!(target: targets::OPTIONS, "{value} is not a value of {registered}");
            return Err(ErrorKind::OptionInvalidValue);
        }

        if self.state.ordinal() > registered.max_state.ordinal() {
            log::debug!(target: targets::STATE, "{} may not be set in state {}", registered.name, self.state);
            return Err(ErrorKind::InvalidState);
        }

        let index = match registered.indexed {
            true => checked_index(index)?,
            false => 0,
        };

        self.config.apply(registered.id, value, index)?;
        log::debug!(target: targets::OPTIONS, "{} set to {value} at {index}", registered.name);

        match registered.id {
            OptionId::Seed => self.rng = R::seed_from_u64(self.config.seed.value),

            OptionId::Phase => {
                let atoms = match index {
                    0 => 1..=self.atom_db.atom_max(),
                    atom => atom..=atom.min(self.atom_db.atom_max()),
                };
                for atom in atoms {
                    match self.config.phase_of(atom) {
                        1 => self.atom_db.set_previous_value(atom, true),
                        -1 => self.atom_db.set_previous_value(atom, false),
                        _ => {}
                    }
                }
            }

            OptionId::ActivityDecay => {
                self.atom_db.set_decay(self.config.activity_decay.value);
                self.clause_db.set_decay(self.config.activity_decay.value);
            }

            _ => {}
        }

        Ok(())
    }

    /// The current value of the option described by `descriptor`, for the atom `index` if the option is indexed.
    pub fn option_value(
        &self,
        descriptor: &OptionDescriptor,
        index: i64,
    ) -> Result<OptionValue, ErrorKind> {
        self.check(Operation::OptionValue)?;
        let registered = self.registered(descriptor.name)?;
        let index = match registered.indexed {
            true => checked_index(index)?,
            false => 0,
        };
        Ok(self.config.value_of(registered.id, index))
    }

    /// The registered descriptor with the name `name`.
    fn registered(&self, name: &str) -> Result<&OptionDescriptor, ErrorKind> {
        match self.options.iter().find(|descriptor| descriptor.name == name) {
            Some(descriptor) => Ok(descriptor),
            None => {
                log::debug!(target: targets::OPTIONS, "Unknown option: {name}");
                Err(ErrorKind::OptionUnknown)
            }
        }
    }
}

/// The atom of an index to an indexed option, with zero for all atoms.
fn checked_index(index: i64) -> Result<Atom, ErrorKind> {
    match Atom::try_from(index) {
        Ok(atom) if atom <= ATOM_MAX => Ok(atom),
        _ => Err(ErrorKind::InvalidArgument),
    }
}

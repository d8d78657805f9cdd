/*!
Callbacks associated with a context.

A context supports four kinds of callback, each registered through a [Callback]:

- *Terminate*, polled during a solve. A return of `true` asks the solve to stop, and the solve resolves as [Unknown](crate::reports::Report::Unknown).
- *Export*, called with each clause learnt during a solve, so long as the clause is no longer than the max length of the registration.
- *Import*, polled during a solve for clauses to add. The callback is given an [Importer], to which at most one clause may be added per call.
- *Notify*, called with the changes to the assignment since the last call, as a set of newly assigned literals and a set of newly unassigned literals.

A registration replaces any previous registration of the same [kind](CallbackKind), and registering `None` clears the callback.
If a registration fails, the previous registration (if any) is untouched.

# Callback types

Callbacks may be mutable functions.
Still, information passed from the solver is non-mutable.

```rust
# use otter_ipasir::context::{Context, callbacks::{Callback, Importer}};
# use otter_ipasir::structures::Redundancy;
# use otter_ipasir::types::err::ErrorKind;
let mut the_context = Context::default();

let terminate = Callback::Terminate(Some(Box::new(|| false)));
assert!(the_context.register_callback(terminate).is_ok());

let import = Callback::Import {
    pledge: Redundancy::None,
    callback: Some(Box::new(|_importer: &mut Importer| {})),
};
assert_eq!(the_context.register_callback(import), Err(ErrorKind::UnsupportedArgument));
```
*/

use crate::{
    context::{legality::Operation, GenericContext},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{checked_literal, CLiteral, Literal},
        Redundancy,
    },
    types::err::ErrorKind,
};

pub type CallbackTerminate = dyn FnMut() -> bool;
pub type CallbackExport = dyn FnMut(&[CLiteral]);
pub type CallbackImport = dyn FnMut(&mut Importer);
pub type CallbackNotify = dyn FnMut(&[CLiteral], &[CLiteral]);

/// The least pledge the import callback of a context honours.
///
/// Clauses with redundancy [None](Redundancy::None) must be kept permanently, and the permanent clauses of a context are fixed for the duration of a solve.
pub const MINIMUM_IMPORT_PLEDGE: Redundancy = Redundancy::Forgettable;

/// The kind of a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Terminate,
    Export,
    Import,
    Notify,
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminate => write!(f, "terminate"),
            Self::Export => write!(f, "export"),
            Self::Import => write!(f, "import"),
            Self::Notify => write!(f, "notify"),
        }
    }
}

/// A registration of a callback, or of the absence of a callback.
pub enum Callback {
    /// Polled during a solve, with `true` requesting the solve stop.
    Terminate(Option<Box<CallbackTerminate>>),

    /// Called with learnt clauses of at most `max_length` literals, or of any length if `max_length` is `None`.
    Export {
        max_length: Option<usize>,
        callback: Option<Box<CallbackExport>>,
    },

    /// Polled for clauses to add, each of which must satisfy `pledge`.
    Import {
        pledge: Redundancy,
        callback: Option<Box<CallbackImport>>,
    },

    /// Called with newly assigned and newly unassigned literals.
    Notify(Option<Box<CallbackNotify>>),
}

impl Callback {
    /// The kind of the callback.
    pub fn kind(&self) -> CallbackKind {
        match self {
            Self::Terminate(_) => CallbackKind::Terminate,
            Self::Export { .. } => CallbackKind::Export,
            Self::Import { .. } => CallbackKind::Import,
            Self::Notify(_) => CallbackKind::Notify,
        }
    }
}

pub(crate) struct ExportRegistration {
    pub max_length: Option<usize>,
    pub callback: Box<CallbackExport>,
}

pub(crate) struct ImportRegistration {
    pub pledge: Redundancy,
    pub callback: Box<CallbackImport>,
}

/// The callbacks registered with a context.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub terminate: Option<Box<CallbackTerminate>>,
    pub export: Option<ExportRegistration>,
    pub import: Option<ImportRegistration>,
    pub notify: Option<Box<CallbackNotify>>,
}

/// A handle given to the import callback, through which a clause may be added.
pub struct Importer {
    pledge: Redundancy,
    clause: Option<(CClause, Redundancy)>,
}

impl Importer {
    pub(crate) fn new(pledge: Redundancy) -> Self {
        Importer {
            pledge,
            clause: None,
        }
    }

    /// The pledge of the registration.
    pub fn pledge(&self) -> Redundancy {
        self.pledge
    }

    /// Offers `clause` with `redundancy` to the context.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) if a clause has already been offered during this call.
    /// - [UnsupportedArgument](ErrorKind::UnsupportedArgument) if `redundancy` does not satisfy the pledge.
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if some literal of the clause is invalid.
    pub fn add(&mut self, clause: &[i32], redundancy: Redundancy) -> Result<(), ErrorKind> {
        if self.clause.is_some() {
            return Err(ErrorKind::InvalidState);
        }
        if !Redundancy::satisfies(self.pledge, redundancy) {
            log::debug!(target: targets::IMPORT, "Redundancy {redundancy} below pledge {}", self.pledge);
            return Err(ErrorKind::UnsupportedArgument);
        }
        let clause = clause
            .iter()
            .map(|&literal| checked_literal(literal))
            .collect::<Result<CClause, _>>()?;

        self.clause = Some((clause, redundancy));
        Ok(())
    }

    /// The offered clause, if any.
    pub(crate) fn take(&mut self) -> Option<(CClause, Redundancy)> {
        self.clause.take()
    }
}

/// Assignment changes yet to be reported to the notify callback.
///
/// Changes are noted by atom, and compared against the view of the callback when flushed.
#[derive(Default)]
pub(crate) struct NotifyBuffer {
    /// The value of each atom, as last reported.
    reported: Vec<Option<bool>>,

    /// Atoms whose value may have changed since the last flush.
    touched: Vec<Atom>,

    /// Whether an atom is present in `touched`.
    marked: Vec<bool>,
}

/// Changes to report, in two calls.
#[derive(Default)]
pub(crate) struct NotifyDelta {
    pub assigned: Vec<CLiteral>,
    pub unassigned: Vec<CLiteral>,
    pub reassigned: Vec<CLiteral>,
}

impl NotifyDelta {
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty() && self.unassigned.is_empty() && self.reassigned.is_empty()
    }
}

impl NotifyBuffer {
    /// Forgets everything reported.
    pub fn reset(&mut self) {
        self.reported.clear();
        self.touched.clear();
        self.marked.clear();
    }

    /// Notes `atom` may have changed value.
    pub fn touch(&mut self, atom: Atom) {
        let index = atom as usize;
        if self.marked.len() <= index {
            self.marked.resize(index + 1, false);
        }
        if !self.marked[index] {
            self.marked[index] = true;
            self.touched.push(atom);
        }
    }

    /// The net changes of touched atoms against `valuation`, after which `valuation` is taken as reported.
    ///
    /// An atom which flips value is unassigned (with its old value) and then reassigned, so that no atom appears twice in a single call.
    pub fn delta(&mut self, valuation: &[Option<bool>]) -> NotifyDelta {
        let mut delta = NotifyDelta::default();
        for atom in self.touched.drain(..) {
            let index = atom as usize;
            self.marked[index] = false;
            if self.reported.len() <= index {
                self.reported.resize(index + 1, None);
            }

            let now = valuation.get(index).copied().flatten();
            match (self.reported[index], now) {
                (None, Some(value)) => delta.assigned.push(CLiteral::new(atom, value)),
                (Some(value), None) => delta.unassigned.push(CLiteral::new(atom, value)),
                (Some(before), Some(after)) if before != after => {
                    delta.unassigned.push(CLiteral::new(atom, before));
                    delta.reassigned.push(CLiteral::new(atom, after));
                }
                _ => {}
            }
            self.reported[index] = now;
        }
        delta
    }
}

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Registers `callback`, replacing any previous callback of the same kind.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) if registration is not legal in the current state.
    /// - [UnsupportedArgument](ErrorKind::UnsupportedArgument) if an import callback pledges less than [MINIMUM_IMPORT_PLEDGE].
    pub fn register_callback(&mut self, callback: Callback) -> Result<(), ErrorKind> {
        self.check(Operation::RegisterCallback)?;
        let kind = callback.kind();

        match callback {
            Callback::Terminate(callback) => self.callbacks.terminate = callback,

            Callback::Export {
                max_length,
                callback,
            } => {
                self.callbacks.export = callback.map(|callback| ExportRegistration {
                    max_length,
                    callback,
                })
            }

            Callback::Import { pledge, callback } => {
                if callback.is_some() && pledge < MINIMUM_IMPORT_PLEDGE {
                    log::debug!(target: targets::CALLBACKS, "Import pledge {pledge} is unsupported");
                    return Err(ErrorKind::UnsupportedArgument);
                }
                self.callbacks.import =
                    callback.map(|callback| ImportRegistration { pledge, callback })
            }

            Callback::Notify(callback) => {
                self.notify_buffer.reset();
                if callback.is_some() {
                    for atom in 1..=self.atom_db.atom_max() {
                        if self.atom_db.value_of(atom).is_some() {
                            self.notify_buffer.touch(atom);
                        }
                    }
                }
                self.callbacks.notify = callback;
            }
        }

        log::trace!(target: targets::CALLBACKS, "Registered {kind} callback");
        Ok(())
    }

    /// Sets the terminate callback.
    pub fn set_callback_terminate(
        &mut self,
        callback: Box<CallbackTerminate>,
    ) -> Result<(), ErrorKind> {
        self.register_callback(Callback::Terminate(Some(callback)))
    }

    /// Sets the export callback.
    pub fn set_callback_export(
        &mut self,
        max_length: Option<usize>,
        callback: Box<CallbackExport>,
    ) -> Result<(), ErrorKind> {
        self.register_callback(Callback::Export {
            max_length,
            callback: Some(callback),
        })
    }

    /// Sets the import callback.
    pub fn set_callback_import(
        &mut self,
        pledge: Redundancy,
        callback: Box<CallbackImport>,
    ) -> Result<(), ErrorKind> {
        self.register_callback(Callback::Import {
            pledge,
            callback: Some(callback),
        })
    }

    /// Sets the notify callback.
    pub fn set_callback_notify(&mut self, callback: Box<CallbackNotify>) -> Result<(), ErrorKind> {
        self.register_callback(Callback::Notify(Some(callback)))
    }

    /// True if some terminate callback requests termination.
    pub fn check_callback_terminate(&mut self) -> bool {
        if let Some(callback) = &mut self.callbacks.terminate {
            callback()
        } else {
            false
        }
    }

    /// Calls the export callback with `clause`, if registered and the clause is short enough.
    pub(crate) fn make_callback_export(&mut self, clause: &[CLiteral]) {
        if let Some(registration) = &mut self.callbacks.export {
            let admitted = match registration.max_length {
                Some(max_length) => clause.size() <= max_length,
                None => true,
            };
            if admitted {
                log::trace!(target: targets::CALLBACKS, "Export: {}", clause.as_dimacs(false));
                (registration.callback)(clause);
                self.counters.exports += 1;
            }
        }
    }

    /// Calls the import callback, if registered, returning the clause offered (if any).
    pub(crate) fn make_callback_import(&mut self) -> Option<(CClause, Redundancy)> {
        let registration = self.callbacks.import.as_mut()?;
        let mut importer = Importer::new(registration.pledge);
        (registration.callback)(&mut importer);
        importer.take()
    }

    /// Notes the value of `atom` may have changed, for the notify callback.
    pub(crate) fn note_change(&mut self, atom: Atom) {
        if self.callbacks.notify.is_some() {
            self.notify_buffer.touch(atom);
        }
    }

    /// Reports the net changes to the assignment since the last flush to the notify callback.
    pub(crate) fn flush_notify(&mut self) {
        let Some(callback) = &mut self.callbacks.notify else {
            return;
        };
        let delta = self.notify_buffer.delta(self.atom_db.valuation());
        if delta.is_empty() {
            return;
        }

        if !delta.assigned.is_empty() || !delta.unassigned.is_empty() {
            callback(&delta.assigned, &delta.unassigned);
        }
        if !delta.reassigned.is_empty() {
            callback(&delta.reassigned, &[]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importer_takes_one_clause() {
        let mut importer = Importer::new(Redundancy::Forgettable);
        assert!(importer.add(&[1, -2], Redundancy::Equivalent).is_ok());
        assert_eq!(importer.add(&[3], Redundancy::Equivalent), Err(ErrorKind::InvalidState));
        assert_eq!(importer.take(), Some((vec![1, -2], Redundancy::Equivalent)));
    }

    #[test]
    fn importer_checks_pledge_and_literals() {
        let mut importer = Importer::new(Redundancy::Equisatisfiable);
        assert_eq!(
            importer.add(&[1], Redundancy::Forgettable),
            Err(ErrorKind::UnsupportedArgument)
        );
        assert_eq!(
            importer.add(&[1, 0], Redundancy::Equivalent),
            Err(ErrorKind::InvalidArgument)
        );
        assert!(importer.take().is_none());
    }

    #[test]
    fn notify_delta_splits_flips() {
        let mut buffer = NotifyBuffer::default();
        for atom in 1..=3 {
            buffer.touch(atom);
        }
        let delta = buffer.delta(&[None, Some(true), Some(false), None]);
        assert_eq!(delta.assigned, vec![1, -2]);
        assert!(delta.unassigned.is_empty());

        buffer.touch(1);
        buffer.touch(2);
        buffer.touch(2);
        let delta = buffer.delta(&[None, None, Some(true), None]);
        assert_eq!(delta.unassigned, vec![1, -2]);
        assert_eq!(delta.reassigned, vec![2]);
        assert!(delta.assigned.is_empty());

        buffer.touch(3);
        assert!(buffer.delta(&[None, None, Some(true), None]).is_empty());
    }
}

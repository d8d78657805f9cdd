use std::{
    cell::{Cell, RefCell},
    ffi::{c_int, c_void, CString},
};

use crate::{
    config::registry::{OptionDescriptor, OptionKind, OptionValue},
    context::{
        callbacks::{Callback, Importer},
        Context,
    },
    ipasir::ipasir_two::{ipasir2_option, ExportFn, ImportFn, NotifyFn, TerminateFn},
    misc::log::targets::{self},
    structures::{clause::CClause, literal::CLiteral, Redundancy},
    types::err::ErrorKind,
};

/// A foreign callback together with the data pointer passed to each call.
pub type Foreign<F> = Cell<Option<(F, *mut c_void)>>;

/// State of a bundle shared between a solve and calls made from within the callbacks of the solve.
///
/// A solve holds the only mutable reference to the context of a bundle, and so calls made from within a callback read and write through here instead.
/// Everything is a [Cell] or [RefCell], as all access is through a shared reference.
#[derive(Default)]
pub struct Reentry {
    /// Whether a solve is in progress.
    pub solving: Cell<bool>,

    /// Whether the import callback is being called, in which case a nested add offers a clause.
    pub import_window: Cell<bool>,

    /// The clause offered during the current call to the import callback.
    pub pending: RefCell<Option<(CClause, Redundancy)>>,

    /// The pledge of the import callback.
    pub pledge: Cell<Redundancy>,

    /// The length filter of the export callback.
    pub max_length: Cell<Option<usize>>,

    pub terminate: Foreign<TerminateFn>,
    pub export: Foreign<ExportFn>,
    pub import: Foreign<ImportFn>,
    pub notify: Foreign<NotifyFn>,
}

/// A structure which bundles a context with the structures used by the C bindings.
///
/// During a solve the context is mutably borrowed, and so a reference to the whole bundle is never taken while [solving](Reentry::solving).
/// Fields other than the context remain readable through a raw pointer to the bundle.
pub struct ContextBundle {
    /// A context.
    pub context: Context,

    /// Shared with the callbacks registered in the context, and so boxed to keep a fixed address.
    pub reentry: Box<Reentry>,

    /// The integer options of the context, in the order of [c_options](ContextBundle::c_options).
    pub descriptors: Box<[OptionDescriptor]>,

    /// The C view of [descriptors](ContextBundle::descriptors), terminated by an option with a null name.
    pub c_options: Box<[ipasir2_option]>,

    /// Owners of the names pointed to by [c_options](ContextBundle::c_options).
    pub(crate) c_names: Box<[CString]>,
}

impl ContextBundle {
    /// Registers, with the bundled context, callbacks which dispatch to the foreign callbacks held by `reentry`.
    ///
    /// A dispatcher without a foreign callback does nothing, and so the foreign callbacks may be swapped during a solve.
    fn register_dispatchers(&mut self) {
        let reentry: *const Reentry = &*self.reentry;

        let terminate = Callback::Terminate(Some(Box::new(move || {
            // Safety: The reentry box outlives the context it is registered with.
            let reentry = unsafe { &*reentry };
            match reentry.terminate.get() {
                Some((callback, data)) => callback(data) != 0,
                None => false,
            }
        })));

        let export = Callback::Export {
            max_length: None,
            callback: Some(Box::new(move |clause: &[CLiteral]| {
                // Safety: As above.
                let reentry = unsafe { &*reentry };
                let Some((callback, data)) = reentry.export.get() else {
                    return;
                };
                if reentry.max_length.get().is_some_and(|max| clause.len() > max) {
                    return;
                }
                let mut terminated = clause.to_vec();
                terminated.push(0);
                callback(data, terminated.as_ptr());
            })),
        };

        let import = Callback::Import {
            pledge: Redundancy::Forgettable,
            callback: Some(Box::new(move |importer: &mut Importer| {
                // Safety: As above.
                let reentry = unsafe { &*reentry };
                let Some((callback, data)) = reentry.import.get() else {
                    return;
                };

                reentry.import_window.set(true);
                callback(data, reentry.pledge.get() as c_int);
                reentry.import_window.set(false);

                if let Some((clause, redundancy)) = reentry.pending.borrow_mut().take() {
                    if let Err(e) = importer.add(&clause, redundancy) {
                        log::warn!(target: targets::FFI, "Offered clause refused: {e}");
                    }
                }
            })),
        };

        for callback in [terminate, export, import] {
            if let Err(e) = self.context.register_callback(callback) {
                log::error!(target: targets::FFI, "Failed to register a dispatcher: {e}");
            }
        }
        if let Err(e) = self.register_notify_dispatcher() {
            log::error!(target: targets::FFI, "Failed to register a dispatcher: {e}");
        }
    }

    /// Registers a notify callback which dispatches to the foreign notify callback.
    ///
    /// As with any registration of a notify callback, the view of the callback is reset to the empty assignment.
    pub(crate) fn register_notify_dispatcher(&mut self) -> Result<(), ErrorKind> {
        let reentry: *const Reentry = &*self.reentry;

        let dispatcher = move |assigned: &[CLiteral], unassigned: &[CLiteral]| {
            // Safety: The reentry box outlives the context it is registered with.
            let reentry = unsafe { &*reentry };
            let Some((callback, data)) = reentry.notify.get() else {
                return;
            };
            let assigned = [assigned, &[0][..]].concat();
            let unassigned = [unassigned, &[0][..]].concat();
            callback(data, assigned.as_ptr(), unassigned.as_ptr());
        };
        let notify = Callback::Notify(Some(Box::new(dispatcher)));

        self.context.register_callback(notify)
    }
}

impl Default for ContextBundle {
    fn default() -> Self {
        let context = Context::default();

        let descriptors: Box<[OptionDescriptor]> = match context.options() {
            Ok(options) => options
                .iter()
                .filter(|descriptor| descriptor.kind == OptionKind::Int)
                .cloned()
                .collect(),
            Err(_) => Box::default(),
        };

        let c_names: Box<[CString]> = descriptors
            .iter()
            .filter_map(|descriptor| CString::new(descriptor.name).ok())
            .collect();

        let mut c_options: Vec<ipasir2_option> = descriptors
            .iter()
            .zip(c_names.iter())
            .map(|(descriptor, c_name)| ipasir2_option {
                name: c_name.as_ptr(),
                min: int_of(descriptor.min),
                max: int_of(descriptor.max),
                max_state: descriptor.max_state.into(),
                tunable: descriptor.tunable as c_int,
                indexed: descriptor.indexed as c_int,
                handle: descriptor as *const OptionDescriptor as *const c_void,
            })
            .collect();
        c_options.push(ipasir2_option::terminator());

        let mut bundle = ContextBundle {
            context,
            reentry: Box::default(),
            descriptors,
            c_options: c_options.into_boxed_slice(),
            c_names,
        };
        bundle.register_dispatchers();
        bundle
    }
}

fn int_of(value: OptionValue) -> i64 {
    match value {
        OptionValue::Int(v) => v,
        OptionValue::Float(v) => v as i64,
    }
}

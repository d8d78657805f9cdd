//! Reading results: the model of a satisfiable solve, and the assignment stack.
//!
//! When a solve resolves as satisfiable the valuation (and any [completion](crate::procedures::completion)) is noted as the model of the solve.
//! The model is kept until the context leaves SAT, regardless of any later change to the valuation of the context.
//!
//! The assignment stack is the model, in the order literals were assigned, while the context is SAT.
//! While the context is INPUT the stack is the current (partial) valuation, as recorded on the trail.

use crate::{
    context::{legality::Operation, ContextState, GenericContext},
    procedures::completion::Completion,
    structures::literal::{checked_literal, CLiteral, Literal},
    types::err::ErrorKind,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Notes the current valuation, extended by `completion` if given, as the model of the solve.
    pub(crate) fn record_model(&mut self, completion: Option<Completion>) {
        self.model_stack = self.trail.literals.clone();
        match completion {
            Some(completion) => {
                self.model = completion.valuation;
                self.model_stack.extend(completion.extension);
            }
            None => self.model = self.atom_db.valuation().to_vec(),
        }
    }

    /// The value of `literal` in the model: `literal` if true, its negation if false, and 0 if the atom of `literal` is unknown.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) unless the context is satisfiable.
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if `literal` is `0` or `i32::MIN`.
    pub fn val(&self, literal: i32) -> Result<i32, ErrorKind> {
        self.check(Operation::Val)?;
        let literal = checked_literal(literal)?;

        match self.model.get(literal.atom() as usize).copied().flatten() {
            Some(value) if value == literal.polarity() => Ok(literal),
            Some(_) => Ok(literal.negate()),
            None => Ok(0),
        }
    }

    /// The number of literals on the assignment stack.
    pub fn assignment_size(&self) -> Result<usize, ErrorKind> {
        self.check(Operation::Assignment)?;
        Ok(self.assignment_stack().len())
    }

    /// The literal at `index` on the assignment stack.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) unless the context is INPUT or SAT.
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if `index` is not less than the size of the stack.
    pub fn assignment(&self, index: usize) -> Result<CLiteral, ErrorKind> {
        self.check(Operation::Assignment)?;
        self.assignment_stack()
            .get(index)
            .copied()
            .ok_or(ErrorKind::InvalidArgument)
    }

    fn assignment_stack(&self) -> &[CLiteral] {
        match self.state {
            ContextState::Satisfiable => &self.model_stack,
            _ => &self.trail.literals,
        }
    }
}

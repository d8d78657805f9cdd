//! Various procedures for mutating a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.
//!
//! - Input: [addition] of clauses, and [assumptions].
//! - The solve: [solve], built from [bcp], [analysis], [backjump], [decision], [reduction], [import], and [completion].
//! - Results: the [model], and the failure core through [assumptions].

pub mod addition;
pub mod analysis;
pub mod assumptions;
pub mod backjump;
pub mod bcp;
pub mod completion;
pub mod decision;
pub mod import;
pub mod model;
pub mod reduction;
pub mod solve;

//! CSS Transform Matrix Library
//!
//! This crate provides the 4x4 homogeneous matrix model used by CSS
//! transforms: construction from transform-list strings, composition of
//! geometric operations, and application to homogeneous points.
//!
//! ## Core Types
//!
//! - [`Tuple`] - homogeneous point/direction with x, y, z, w components
//! - [`Matrix`] - 4x4 matrix with the sixteen named CSS components m11..m44
//! - [`TransformMatrix`] - capability trait for alternative matrix backings
//! - [`TransformError`] - parse, singular-matrix, and argument errors
//!
//! ## Conventions
//!
//! Components are named `m{col}{row}` and serialized column-major, exactly
//! as the `matrix()`/`matrix3d()` CSS grammar lists them. Composition is
//! always post-multiplication: `a.translate(...)` yields `a * T`, so the
//! rightmost operation applies first when the matrix later transforms a
//! [`Tuple`]. All angles are degrees.

mod backend;
mod error;
mod matrix;
mod parser;
mod tuple;

pub use backend::{DefaultMatrix, TransformMatrix};
pub use error::TransformError;
pub use matrix::{Matrix, SMALL_NUMBER};
pub use tuple::Tuple;

//! Domain models with fully-typed dates, independent of the wire DTOs in
//! the `shared` crate. The REST mappers convert between the two.

pub mod assessment;
pub mod athlete;
pub mod branch;
pub mod discount;
pub mod package;
pub mod program;

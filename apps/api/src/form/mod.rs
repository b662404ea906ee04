// Form <-> document synchronisation.
// The registry declares each repeatable section once; `sync` runs the same
// generic algorithm over every section in both directions.

pub mod handlers;
pub mod registry;
pub mod sync;

pub use sync::{collect, populate, FormState, PopulatedForm};

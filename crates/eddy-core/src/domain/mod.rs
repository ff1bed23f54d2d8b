//! Domain model (names, input values, records, errors).

pub mod errors;
pub mod name;
pub mod record;
pub mod value;

pub use errors::ResolveError;
pub use name::PropName;
pub use record::PropRecord;
pub use value::{InputKey, ProducerId, PropInput, ValueProducer};

//! Persistence for learned weight tables.
//!
//! The format is a plain little-endian dump: a leading table count, then for
//! each table its entry count and raw `f32` bits. Loading checks the result
//! against the tuple scheme it is meant for.

mod weights;

pub use weights::{
    PersistError,
    write_tables,
    read_tables,
    encode_weights,
    parse_weights_bytes,
    write_weights_to_path,
    read_weights_from_path,
};

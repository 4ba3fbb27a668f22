//! Well-known text reading and writing.
//!
//! The supported subset mirrors what the kernel can represent losslessly:
//! `POINT`, `LINESTRING`, `MULTIPOINT` (both point styles) and
//! `MULTILINESTRING`. The writer emits one canonical form, so a parsed
//! geometry written back produces normalized text.

use pest_derive::Parser;

mod parser;
mod writer;

pub use parser::parse;
pub use writer::write;

#[derive(Parser)]
#[grammar = "wkt/wkt.pest"]
struct WktParser;

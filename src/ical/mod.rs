//! This module handles conversion between iCal VTODO components and [`Task`](crate::Task)s
//!
//! Parsing and generation use different third-party crates (one tokenizes
//! property lines, the other escapes text), since no single crate covers both
//! directions well

mod parser;
pub use parser::parse;
pub use parser::HANDLED_PROPERTIES;
mod builder;
pub use builder::build_from;
mod datetime;
pub use datetime::CalDateTime;

pub mod course_xml;

pub use course_xml::{Course, ParseError, ParseResult, parse_str};

pub mod string_util;
pub mod ticket_extractor;

pub mod fields;
pub mod parser;
pub mod title;

pub use fields::Submission;
pub use parser::BodySource;

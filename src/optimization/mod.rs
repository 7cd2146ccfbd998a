pub mod report;
pub mod simplify;

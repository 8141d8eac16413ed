pub mod career;
pub mod resume;

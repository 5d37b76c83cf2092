pub mod batch;
pub mod synthesis;

pub mod fetch;
pub mod status;

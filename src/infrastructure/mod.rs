pub mod config;
pub mod input;
pub mod network;
pub mod storage;

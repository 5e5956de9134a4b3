pub mod account;
pub mod atcoder;
pub mod cache;
pub mod checker;
pub mod config;
pub mod runner;
pub mod tester;
pub mod types;

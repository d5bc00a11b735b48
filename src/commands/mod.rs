pub mod login;
pub mod profile;
pub mod send;
pub mod utils;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;

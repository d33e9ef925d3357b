//! Core domain logic: password policy, credential flows and persistence

pub mod auth;
pub mod config;
pub mod db;
#[cfg(test)]
mod tests;

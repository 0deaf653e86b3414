// src/lib.rs
// DOCUMENTATION: Crate root shared by the API server and the import tool
// PURPOSE: Declare modules

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

#[cfg(test)]
mod test_support;

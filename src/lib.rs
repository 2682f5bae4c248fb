pub mod api;
pub mod config;
pub mod generation;
pub mod pages;
pub mod server;
pub mod state;
pub mod store;
pub mod tab;
pub mod types;
pub mod web;

#[cfg(test)]
mod tests;

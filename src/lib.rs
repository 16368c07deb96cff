pub mod admin;
pub mod app;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod output;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

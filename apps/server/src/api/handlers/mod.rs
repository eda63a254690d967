//! Request handlers

pub mod chairs;
pub mod estates;
pub mod system;

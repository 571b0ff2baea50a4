//! Route handlers

pub mod auth;
pub mod mood;
pub mod oauth;
pub mod playlists;
pub mod search;
pub mod settings;

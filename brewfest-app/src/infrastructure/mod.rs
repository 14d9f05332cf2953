pub mod auth;
pub mod db;
pub mod image_host;
pub mod security;

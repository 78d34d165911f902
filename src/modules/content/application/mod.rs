pub mod domain;
pub mod hooks;
pub mod services;

pub mod admin;
pub mod contact;
pub mod content;
pub mod remote_table;

//! Command modules for the cluster API CLI.
//!
//! - `config_cmd`: Configuration file management
//! - `htpasswd_users_cmd`: List, show, create, update and delete htpasswd users

pub mod config_cmd;
pub mod htpasswd_users_cmd;

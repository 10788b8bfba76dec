pub mod config;
pub mod run;
pub mod sections;
pub mod session;

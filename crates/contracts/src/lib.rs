pub mod domain;
pub mod enums;
pub mod integration;
pub mod system;

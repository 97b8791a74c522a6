pub mod interactions;
pub mod phi;
pub mod records;
pub mod search;
pub mod symptoms;
pub mod system;

pub mod registrant;
pub mod registration;

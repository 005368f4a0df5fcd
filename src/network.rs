pub mod api;
pub mod errors;
pub mod requests;
pub mod responses;

#[cfg(test)]
pub mod fake;

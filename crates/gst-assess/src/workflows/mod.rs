pub mod assessment;
pub mod business;
pub mod filings;
pub mod lending;
pub mod schemes;

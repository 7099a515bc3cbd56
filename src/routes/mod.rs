pub mod health_check;
pub mod order;
pub mod raw;
pub mod report;

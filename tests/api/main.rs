mod orders;
mod raw;
mod reports;

pub mod feed;
pub mod output;
pub mod policy;
pub mod scoring;

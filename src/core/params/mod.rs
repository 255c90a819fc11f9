pub mod bucket;

pub use bucket::ParamBucket;

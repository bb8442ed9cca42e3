mod completeness;
mod merge;
mod mutations;
mod sharing;
mod traits;

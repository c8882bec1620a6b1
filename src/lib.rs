#[doc = include_str!("../README.md")]
#[macro_use]
extern crate doc_comment;
doc_comment!(include_str!("../README.md"));

mod config;
pub use config::Config;

mod distance;
pub use distance::{Distance, DistanceVector};

mod error;
pub use error::{Error, ErrorKind};

pub mod graph;
pub use graph::Graph;

mod graph_distances;
pub use graph_distances::GraphDistances;

mod outliers;
pub use outliers::{OutlierResults, OutlierStats, OutlierTools};

mod queries;
pub use queries::{Queries, QueriesFormat};

pub mod readwrite;

mod search_jobs;
pub use search_jobs::{SearchJob, SearchJobs};

mod sgg;
pub use sgg::{build_sgg, compress_subgraph, CompressedPath, SingleGenomeGraph};

mod sgg_distances;
pub use sgg_distances::{calculate_sgg_distances, SingleGenomeGraphDistances};

pub mod types;

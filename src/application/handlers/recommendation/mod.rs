//! Cluster recommendation handlers.

mod recommend_clusters;

pub use recommend_clusters::{
    RecommendClustersCommand, RecommendClustersHandler, RecommendClustersResult,
};

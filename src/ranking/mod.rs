//! Recency-weighted ranking of raw index hits.
//!
//! Each hit's distance becomes `similarity_score = 1 / (1 + distance)`;
//! document age becomes `date_weight = exp(-alpha * days / 365)`; the
//! product orders the results. Older documents therefore need a better
//! vector match to outrank newer ones.

pub mod scorer;
pub mod types;


pub use scorer::{RecencyRanker, date_weight, similarity_from_distance};
pub use types::RankedSource;

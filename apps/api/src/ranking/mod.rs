// Candidate Ranking Engine
// Pure, synchronous scoring over already-parsed candidate records.
// No storage, HTTP, or file-format knowledge below `handlers`.

pub mod aggregator;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod ranker;
pub mod reasoning;
pub mod similarity;
pub mod skills;
pub mod text_similarity;
pub mod weights;

pub use ranker::{Ranker, RankerConfig, RankingError};

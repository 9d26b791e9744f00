pub mod engine;
pub mod evidence;
pub mod independence;
pub mod record;
pub mod types;

pub use engine::{
    compute_score, evaluate, Clock, Evaluation, RunIdGenerator, Scorer, SystemClock,
    UuidGenerator,
};
pub use evidence::EvidenceCounts;
pub use independence::independent_sources;
pub use record::{Citation, Meta, ScoreRecord};
pub use types::{Post, Source, Stance, Tier};

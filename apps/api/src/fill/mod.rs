// Field matching and value injection.
// Pure and synchronous: everything here runs after the profile fetch, with no
// further suspension points. Page access goes through the writer traits only.

pub mod engine;
pub mod experience;
pub mod filler;
pub mod flatten;
pub mod handlers;
pub mod matcher;
pub mod normalize;
pub mod synonyms;
pub mod writer;

// Re-export the public API consumed by state, handlers and main.
pub use engine::{Detection, FillEngine, FillReport};
pub use matcher::KeyMatcher;
pub use synonyms::{default_synonyms, SynonymTable};
pub use writer::{FillAction, FillPlan};

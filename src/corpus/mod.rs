mod load;
mod parse;
mod record;

pub use load::load_corpus;
pub use record::{Corpus, EntitySummary, Record, Ruling};

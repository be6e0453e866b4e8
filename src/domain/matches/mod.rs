// Match domain module

pub mod match_record;

pub use match_record::{Match, MatchDetails, MatchResult, NewMatch, ScoreRow};

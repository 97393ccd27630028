//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
pub mod linter_list;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use linter_list::{LinterListHumanFormatter, LinterListJsonlFormatter, LinterSource, LinterStatus};

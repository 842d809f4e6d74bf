pub mod history;

pub use history::HistoryLedger;

pub mod cards;
pub mod history;
pub mod kits;
pub mod prizes;
pub mod ranking;
pub mod round_engine;

pub use cards::CardService;
pub use history::HistoryService;
pub use kits::KitService;
pub use prizes::PrizeService;
pub use ranking::RankingService;
pub use round_engine::RoundEngine;

pub mod account;
pub mod export;
pub mod heuristic;
pub mod init;
pub mod progress;
pub mod report;
pub mod save;
pub mod site;
pub mod step;

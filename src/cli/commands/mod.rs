//! CLI command implementations.

mod analyze;
mod config;
mod delete;
mod dictate;
mod doctor;
mod generate;
mod history;
mod refine;
mod show;
mod summary;

pub use analyze::run_analyze;
pub use config::run_config;
pub use delete::run_delete;
pub use dictate::run_dictate;
pub use doctor::run_doctor;
pub use generate::run_generate;
pub use history::run_history;
pub use refine::run_refine;
pub use show::run_show;
pub use summary::run_summary;

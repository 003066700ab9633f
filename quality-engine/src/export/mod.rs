pub mod html;
pub mod jsonl;
pub mod report;
pub mod save_all;

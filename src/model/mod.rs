// File: ./src/model/mod.rs
pub mod adapter;
pub mod display;
pub mod item;
pub mod matcher;
pub mod parser;

pub use adapter::ChoresPayload;
pub use display::speakable_summary;
pub use item::{Chore, ChoreStatus, FamilyMember, Period};
pub use matcher::filter_chores;
pub use parser::{ParsedQuery, parse_query};

// File: ./src/model/parser.rs
//! Extracts a family member and a time period from a spoken query.
//!
//! Matching is plain substring containment on the lower-cased text, checked in
//! table order. There is no tokenization: "milestone" contains "miles", and a
//! query mentioning both "evening" and "today" resolves to "evening" because it
//! comes first in the period table.
use crate::model::item::{FamilyMember, Period};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub person: Option<FamilyMember>,
    pub period: Option<Period>,
}

pub fn parse_query(query: &str) -> ParsedQuery {
    let lower = query.to_lowercase();
    ParsedQuery {
        person: find_person(&lower),
        period: find_period(&lower),
    }
}

fn find_person(lower: &str) -> Option<FamilyMember> {
    FamilyMember::all().find(|m| lower.contains(m.as_str()))
}

fn find_period(lower: &str) -> Option<Period> {
    Period::all().find(|p| lower.contains(p.as_str()))
}

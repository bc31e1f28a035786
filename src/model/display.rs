// File: ./src/model/display.rs
use crate::model::item::{Chore, FamilyMember, Period};

/// Number of chore names read out before switching to "including ...".
const MAX_SPOKEN_NAMES: usize = 3;

/// Renders the sentence the voice assistant reads back for a filtered list.
pub fn speakable_summary(
    chores: &[Chore],
    person: Option<FamilyMember>,
    period: Option<Period>,
) -> String {
    let count = chores.len();

    if count == 0 {
        return match (person, period) {
            (Some(who), Some(when)) => format!("{} has no {} tasks left.", who.title(), when),
            (Some(who), None) => format!("{} has no tasks left today.", who.title()),
            _ => "No tasks found.".to_string(),
        };
    }

    let subject = person.map_or_else(|| "There".to_string(), |who| who.title());
    let period_text = match period {
        Some(when) if !when.spans_whole_day() => format!(" {}", when),
        _ => String::new(),
    };

    if count == 1 {
        return format!(
            "{} has 1{} task left: {}.",
            subject, period_text, chores[0].name
        );
    }

    let names: Vec<&str> = chores
        .iter()
        .take(MAX_SPOKEN_NAMES)
        .map(|c| c.name.as_str())
        .collect();

    if count <= MAX_SPOKEN_NAMES {
        let (rest, last) = names.split_at(names.len() - 1);
        format!(
            "{} has {}{} tasks left: {} and {}.",
            subject,
            count,
            period_text,
            rest.join(", "),
            last[0]
        )
    } else {
        format!(
            "{} has {}{} tasks left, including {}.",
            subject,
            count,
            period_text,
            names.join(", ")
        )
    }
}

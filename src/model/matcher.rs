// Deterministic narrowing of a chore list by person, period and status.
//
// A chore survives when:
//   - no person is given, or its assignee equals the person (case-insensitive)
//   - no period is given, the period spans the whole day, or the chore has an
//     hour inside the period's half-open range
//   - it is not complete (always applied)
//
// The input order is preserved and the input slice is never touched.

use crate::model::item::{Chore, FamilyMember, Period};

impl Chore {
    pub fn is_assigned_to(&self, person: FamilyMember) -> bool {
        self.assigned_to.to_lowercase() == person.as_str()
    }

    pub fn falls_within(&self, period: Period) -> bool {
        if period.spans_whole_day() {
            return true;
        }
        match self.hour {
            Some(h) => period.contains_hour(h),
            None => false,
        }
    }

    pub fn matches_filter(&self, person: Option<FamilyMember>, period: Option<Period>) -> bool {
        if let Some(p) = person
            && !self.is_assigned_to(p)
        {
            return false;
        }
        if let Some(p) = period
            && !self.falls_within(p)
        {
            return false;
        }
        !self.is_done()
    }
}

pub fn filter_chores(
    chores: &[Chore],
    person: Option<FamilyMember>,
    period: Option<Period>,
) -> Vec<Chore> {
    chores
        .iter()
        .filter(|c| c.matches_filter(person, period))
        .cloned()
        .collect()
}

/// Chores that are not yet complete, in their original order.
pub fn incomplete(chores: &[Chore]) -> Vec<&Chore> {
    chores.iter().filter(|c| !c.is_done()).collect()
}

//! Display form of a day sheet
//!
//! The derived values (prep time, eat time, food summaries) are computed here,
//! per record, at render time. Nothing is cached on the records themselves.

use crate::core::{food_summary, normalize_time, prep_time};
use crate::types::{DaySheet, PartyRecord};
use serde::Serialize;

/// Stand-in for a blank field
pub const NONE_PLACEHOLDER: &str = "(none)";

/// One party with every field as display text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedParty {
    pub prep_time: String,
    pub eat_time: String,
    pub name: String,
    pub party_room: String,
    pub kids: String,
    pub party_type: String,
    pub kids_food: String,
    pub adult_food: String,
    pub comments: String,
}

impl RenderedParty {
    pub fn from_record(record: &PartyRecord) -> Self {
        Self {
            prep_time: prep_time(record.eat_in_time()),
            eat_time: normalize_time(record.eat_in_time()),
            name: record.name().to_string(),
            party_room: record.party_room().display_text(),
            kids: record.num_kids().display_text(),
            party_type: or_placeholder(record.party_type().display_text()),
            kids_food: or_placeholder(food_summary(record.kids_food())),
            adult_food: or_placeholder(food_summary(record.adult_food())),
            comments: or_placeholder(record.comments().to_string()),
        }
    }

    /// The four labelled blocks of a party card, in display order
    pub fn blocks(&self) -> [(&'static str, String); 4] {
        [
            ("Prep time:", self.overview()),
            ("Kids Food:", self.kids_food.clone()),
            ("Adult Food:", self.adult_food.clone()),
            ("Comment:", self.comments.clone()),
        ]
    }

    /// Everything after "Prep time:" on the first line of the card
    pub fn overview(&self) -> String {
        format!(
            "{}  Eat time: {}  Kid's Name: {}  Party Room: {}  Kids: {}  Party Type: {}",
            self.prep_time, self.eat_time, self.name, self.party_room, self.kids, self.party_type
        )
    }
}

/// A rendered day: date label plus party cards in sheet order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Printout {
    pub date_label: String,
    pub parties: Vec<RenderedParty>,
}

impl Printout {
    pub fn render(sheet: &DaySheet) -> Self {
        Self {
            date_label: sheet.date_label().to_string(),
            parties: sheet.parties().iter().map(RenderedParty::from_record).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Plain-text printout, one block per line and a blank line between parties
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if !self.date_label.is_empty() {
            out.push_str(&self.date_label);
            out.push_str("\n\n");
        }
        for party in &self.parties {
            for (label, value) in party.blocks() {
                out.push_str(label);
                out.push(' ');
                out.push_str(&value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

fn or_placeholder(text: String) -> String {
    if text.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        text
    }
}

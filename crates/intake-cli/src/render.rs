//! Plain-text output for stored forms.

use intake_core::body_part::BodyPart;
use intake_core::models::pain_map::PainBodyMap;
use intake_instruments::Instrument;
use intake_instruments::inventory::Inventory;

/// How a form prints on the terminal.
pub trait Render {
    /// One line for `list` output.
    fn headline(&self) -> String;

    /// Full record for `show` output.
    fn detail(&self) -> String;
}

fn join_parts(parts: &[BodyPart]) -> String {
    if parts.is_empty() {
        return "none".to_string();
    }
    parts
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn id_text(id: Option<i64>) -> String {
    id.map_or_else(|| "unsaved".to_string(), |id| id.to_string())
}

impl Render for PainBodyMap {
    fn headline(&self) -> String {
        format!(
            "{}  case {}  {} affected, max {}  {}",
            id_text(self.id()),
            self.case_id(),
            self.affected_count(),
            self.max_intensity(),
            self.created_at().strftime("%Y-%m-%d %H:%M"),
        )
    }

    fn detail(&self) -> String {
        let mut out = format!(
            "Pain body map {} (case {})\nCreated {}  Updated {}\n\n",
            id_text(self.id()),
            self.case_id(),
            self.created_at(),
            self.updated_at(),
        );
        for (part, entry) in self.entries() {
            let sides = match (entry.left, entry.right) {
                (true, true) => "both",
                (true, false) => "left",
                (false, true) => "right",
                (false, false) => "-",
            };
            out.push_str(&format!(
                "  {:<16} {:>2}/10  {:<5} {}\n",
                part.label(),
                entry.intensity,
                sides,
                entry.note
            ));
        }
        out.push_str(&format!(
            "\nAffected: {}  Max: {}  Average: {:.2}\n",
            self.affected_count(),
            self.max_intensity(),
            self.average_intensity()
        ));
        out.push_str(&format!("Severe (7+): {}\n", join_parts(&self.entries_at_or_above(7))));
        out.push_str(&format!("Left: {}\n", join_parts(&self.left_affected())));
        out.push_str(&format!("Right: {}\n", join_parts(&self.right_affected())));
        out.push_str(&format!("Bilateral: {}\n", join_parts(&self.bilateral_affected())));
        if !self.additional_notes().is_empty() {
            out.push_str(&format!("\nNotes: {}\n", self.additional_notes()));
        }
        out
    }
}

impl<I: Instrument> Render for Inventory<I> {
    fn headline(&self) -> String {
        let label = self.severity().map_or("unbanded", |band| band.label);
        format!(
            "{}  case {}  {} {} ({label})  {}",
            id_text(self.id()),
            self.case_id(),
            self.instrument().name(),
            self.total_score(),
            self.created_at().strftime("%Y-%m-%d %H:%M"),
        )
    }

    fn detail(&self) -> String {
        format!(
            "Form {} (case {})\nCreated {}  Updated {}\n\n{}",
            id_text(self.id()),
            self.case_id(),
            self.created_at(),
            self.updated_at(),
            self.summary_text()
        )
    }
}

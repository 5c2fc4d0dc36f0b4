//! Pain body map: a relational shell around a JSON payload of per-region
//! pain entries.
//!
//! The record keeps two views of the same data: `entries`, a map ordered by
//! [`BodyPart`], and `payload`, the JSON text stored in the database column.
//! Every public mutator leaves them describing the same entries. Normally
//! the text is derived from the map; after [`PainBodyMap::set_payload_text`]
//! (and on rehydration) the map is derived from the text instead.
//!
//! Writes through `set_entry`/`put_entry` are strict. Reads of payload text
//! are lenient: anything that cannot be turned into a valid entry is skipped
//! and logged, never raised.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde_json::Value;
use tracing::{debug, warn};

use crate::body_part::BodyPart;
use crate::error::{ValidationError, ValidationResult, check_length};
use crate::ids::{FormKind, check_case_id, is_valid_case_id};
use crate::models::pain_entry::PainEntry;

/// Character limit for the record-level free text.
pub const ADDITIONAL_NOTES_MAX_CHARS: usize = 2000;

/// Payload of a map with no entries.
pub const EMPTY_PAYLOAD: &str = "{}";

#[derive(Debug, Clone, PartialEq)]
pub struct PainBodyMap {
    id: Option<i64>,
    case_id: i64,
    payload: String,
    entries: BTreeMap<BodyPart, PainEntry>,
    /// Entries of `payload` that `entries` could not represent.
    rejected_entries: usize,
    additional_notes: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PainBodyMap {
    pub const KIND: FormKind = FormKind::PainBodyMap;

    /// An empty map for `case_id`. The id is assigned when the record is
    /// first stored.
    pub fn new(case_id: i64) -> ValidationResult<Self> {
        check_case_id(case_id)?;
        let now = Timestamp::now();
        Ok(Self {
            id: None,
            case_id,
            payload: EMPTY_PAYLOAD.to_string(),
            entries: BTreeMap::new(),
            rejected_entries: 0,
            additional_notes: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a stored record. The payload is kept verbatim and parsed
    /// leniently into entries.
    pub fn from_parts(
        id: i64,
        case_id: i64,
        payload: impl Into<String>,
        additional_notes: impl Into<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> ValidationResult<Self> {
        check_case_id(case_id)?;
        let payload = payload.into();
        let decoded = decode_entries(&payload);
        Ok(Self {
            id: Some(id),
            case_id,
            payload,
            entries: decoded.entries,
            rejected_entries: decoded.rejected,
            additional_notes: additional_notes.into(),
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Records the id the store allocated on insert.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn case_id(&self) -> i64 {
        self.case_id
    }

    pub fn set_case_id(&mut self, case_id: i64) -> ValidationResult<()> {
        check_case_id(case_id)?;
        self.case_id = case_id;
        self.touch();
        Ok(())
    }

    pub fn form_type(&self) -> &'static str {
        Self::KIND.form_type()
    }

    /// The serialized payload, as it will be written to storage.
    pub fn payload_text(&self) -> &str {
        &self.payload
    }

    pub fn entries(&self) -> &BTreeMap<BodyPart, PainEntry> {
        &self.entries
    }

    /// Looks up an entry by location key. Unknown keys simply miss.
    pub fn entry(&self, location: &str) -> Option<&PainEntry> {
        let part: BodyPart = location.parse().ok()?;
        self.entries.get(&part)
    }

    pub fn has_entry(&self, location: &str) -> bool {
        self.entry(location).is_some()
    }

    /// Entries in the payload text that were skipped when it was read.
    /// Zero whenever the text was produced from the entry map.
    pub fn rejected_entries(&self) -> usize {
        self.rejected_entries
    }

    pub fn additional_notes(&self) -> &str {
        &self.additional_notes
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Inserts or fully replaces the entry for `location`.
    pub fn set_entry(
        &mut self,
        location: &str,
        left: bool,
        right: bool,
        intensity: i32,
        note: &str,
    ) -> ValidationResult<()> {
        self.put_entry(PainEntry {
            location: location.to_string(),
            left,
            right,
            intensity,
            note: note.to_string(),
        })
    }

    /// Inserts or fully replaces the entry keyed by `entry.location`.
    pub fn put_entry(&mut self, entry: PainEntry) -> ValidationResult<()> {
        let part = entry.validate()?;
        self.entries.insert(part, entry);
        self.refresh_payload();
        Ok(())
    }

    /// Removes the entry for `location`, if any. Returns whether one was removed.
    pub fn remove_entry(&mut self, location: &str) -> bool {
        let Ok(part) = location.parse::<BodyPart>() else {
            return false;
        };
        if self.entries.remove(&part).is_none() {
            return false;
        }
        self.refresh_payload();
        true
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.rejected_entries = 0;
        self.payload = EMPTY_PAYLOAD.to_string();
        self.touch();
    }

    /// Whole-payload replace: stores `text` verbatim and rebuilds the entry
    /// map from it. Regions absent from `text` are dropped.
    pub fn set_payload_text(&mut self, text: impl Into<String>) {
        self.payload = text.into();
        let decoded = decode_entries(&self.payload);
        self.entries = decoded.entries;
        self.rejected_entries = decoded.rejected;
        self.touch();
    }

    /// Fails when the payload text holds entries the map had to skip, so
    /// the stored text and the entry map would disagree.
    pub fn check_payload(&self) -> ValidationResult<()> {
        if self.rejected_entries > 0 {
            return Err(ValidationError::RejectedPayloadEntries(self.rejected_entries));
        }
        Ok(())
    }

    pub fn set_additional_notes(&mut self, text: impl Into<String>) -> ValidationResult<()> {
        let text = text.into();
        check_length("additional notes", &text, ADDITIONAL_NOTES_MAX_CHARS)?;
        self.additional_notes = text;
        self.touch();
        Ok(())
    }

    /// Number of regions with intensity above zero.
    pub fn affected_count(&self) -> usize {
        self.affected().count()
    }

    pub fn max_intensity(&self) -> i32 {
        self.entries
            .values()
            .map(|entry| entry.intensity)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Mean intensity over affected regions; 0.0 when none are affected.
    pub fn average_intensity(&self) -> f64 {
        let (sum, count) = self
            .affected()
            .fold((0i64, 0usize), |(sum, count), entry| {
                (sum + i64::from(entry.intensity), count + 1)
            });
        if count == 0 {
            return 0.0;
        }
        sum as f64 / count as f64
    }

    pub fn entries_at_or_above(&self, threshold: i32) -> Vec<BodyPart> {
        self.parts_where(|entry| entry.intensity >= threshold)
    }

    pub fn left_affected(&self) -> Vec<BodyPart> {
        self.parts_where(|entry| entry.left && entry.is_affected())
    }

    pub fn right_affected(&self) -> Vec<BodyPart> {
        self.parts_where(|entry| entry.right && entry.is_affected())
    }

    pub fn bilateral_affected(&self) -> Vec<BodyPart> {
        self.parts_where(|entry| entry.left && entry.right && entry.is_affected())
    }

    /// Pre-persist guard over the whole record.
    pub fn is_valid_record(&self) -> bool {
        if !is_valid_case_id(self.case_id) || self.check_payload().is_err() {
            return false;
        }
        if check_length("additional notes", &self.additional_notes, ADDITIONAL_NOTES_MAX_CHARS).is_err() {
            return false;
        }
        self.entries
            .iter()
            .all(|(part, entry)| matches!(entry.validate(), Ok(p) if p == *part))
    }

    fn affected(&self) -> impl Iterator<Item = &PainEntry> {
        self.entries.values().filter(|entry| entry.is_affected())
    }

    fn parts_where(&self, predicate: impl Fn(&PainEntry) -> bool) -> Vec<BodyPart> {
        self.entries
            .iter()
            .filter(|(_, entry)| predicate(entry))
            .map(|(part, _)| *part)
            .collect()
    }

    fn refresh_payload(&mut self) {
        self.payload = encode_entries(&self.entries);
        self.rejected_entries = 0;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Concatenates entries, in body-part order, into one JSON object.
pub fn encode_entries(entries: &BTreeMap<BodyPart, PainEntry>) -> String {
    let mut out = String::from("{");
    for (i, (part, entry)) in entries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(part.as_str());
        out.push_str("\":");
        out.push_str(&entry.to_json());
    }
    out.push('}');
    out
}

/// Entries read back from payload text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedPayload {
    pub entries: BTreeMap<BodyPart, PainEntry>,
    /// Entries that were skipped. Text that is not a JSON object counts as one.
    pub rejected: usize,
}

/// Lenient inverse of [`encode_entries`].
///
/// The object key decides the region; the entry's own `body_part` is
/// realigned to it. Entries for unknown regions, with mistyped fields, or
/// with out-of-range values are skipped and counted.
pub fn decode_entries(text: &str) -> DecodedPayload {
    let mut decoded = DecodedPayload::default();
    if text.trim().is_empty() {
        return decoded;
    }

    let object = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            warn!("pain payload is not a JSON object; no entries loaded");
            decoded.rejected = 1;
            return decoded;
        }
        Err(e) => {
            warn!(error = %e, "pain payload is not valid JSON; no entries loaded");
            decoded.rejected = 1;
            return decoded;
        }
    };

    for (key, value) in object {
        let Ok(part) = key.parse::<BodyPart>() else {
            warn!(location = %key, "skipping pain entry for unknown body part");
            decoded.rejected += 1;
            continue;
        };
        let mut entry = match PainEntry::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(location = %key, error = %e, "skipping malformed pain entry");
                decoded.rejected += 1;
                continue;
            }
        };
        if entry.location != key {
            debug!(location = %key, body_part = %entry.location, "realigning body_part to payload key");
            entry.location = key;
        }
        if let Err(e) = entry.validate() {
            warn!(location = %part, error = %e, "skipping out-of-range pain entry");
            decoded.rejected += 1;
            continue;
        }
        decoded.entries.insert(part, entry);
    }
    decoded
}

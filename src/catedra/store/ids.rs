use crate::model::EntityKind;
use chrono::{DateTime, SecondsFormat, Utc};

const COUNTER_START: u64 = 1000;

/// Generates `{kind}-{millis}-{counter}` ids.
///
/// The counter is shared by every table and only moves forward, so ids are
/// unique for the lifetime of one generator even within the same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    counter: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            counter: COUNTER_START,
        }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, kind: EntityKind, now: DateTime<Utc>) -> String {
        self.counter += 1;
        format!(
            "{}-{}-{}",
            kind.id_prefix(),
            now.timestamp_millis(),
            self.counter
        )
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn first_id_uses_counter_1001() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(
            ids.next_id(EntityKind::BlogPost, now),
            "blogpost-1700000000123-1001"
        );
        assert_eq!(
            ids.next_id(EntityKind::Event, now),
            "event-1700000000123-1002"
        );
    }

    #[test]
    fn timestamp_is_iso_millis_utc() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(timestamp(now), "2023-11-14T22:13:20.123Z");
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One availability entry: a day plus the open time slots within it.
/// Order is meaningful and preserved as sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessagePayload {
    pub schedule: Vec<ScheduleEntry>,
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1))]
    pub agency_name: String,
    #[validate(email)]
    pub agency_email: String,
    #[validate(email)]
    pub user_email: String,
    #[validate(length(min = 1))]
    pub user_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessagePayload {
    pub status: Option<String>,
    pub response: Option<String>,
}

impl SendMessagePayload {
    /// The availability grid cannot be expressed with field-level
    /// validator rules: every entry needs a day and at least one slot.
    pub fn validate_schedule(&self) -> Result<(), String> {
        if self.schedule.is_empty() {
            return Err("schedule must contain at least one day".into());
        }
        for entry in &self.schedule {
            if entry.day.trim().is_empty() {
                return Err("schedule entries must name a day".into());
            }
            if entry.slots.is_empty() || entry.slots.iter().any(|s| s.trim().is_empty()) {
                return Err(format!("no time slots given for {}", entry.day));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(schedule: Vec<ScheduleEntry>) -> SendMessagePayload {
        SendMessagePayload {
            schedule,
            message: "Intro call".into(),
            agency_name: "Acme Digital".into(),
            agency_email: "hello@acme.test".into(),
            user_email: "brand@corp.test".into(),
            user_phone: "+15550100".into(),
        }
    }

    #[test]
    fn empty_schedule_is_rejected() {
        assert!(payload(vec![]).validate_schedule().is_err());
    }

    #[test]
    fn day_without_slots_is_rejected() {
        let p = payload(vec![ScheduleEntry {
            day: "2026-08-10".into(),
            slots: vec![],
        }]);
        assert!(p.validate_schedule().is_err());
    }

    #[test]
    fn well_formed_schedule_passes() {
        let p = payload(vec![ScheduleEntry {
            day: "2026-08-10".into(),
            slots: vec!["10:00".into(), "14:30".into()],
        }]);
        assert!(p.validate_schedule().is_ok());
    }
}

use crate::core::model::{Location, LocationId};

/// Edge length, in logical pixels, of a rendered location code.
pub const QR_DISPLAY_SIZE: f32 = 150.0;

/// Text a participant's scanner reads from a location's printed code.
pub fn qr_payload(id: &LocationId) -> String {
    format!("Location ID: {id}")
}

/// The one location whose code is currently shown, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrSlot {
    location: Option<Location>,
}

impl QrSlot {
    /// Replace whatever code was showing with `location`'s.
    pub fn show(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn close(&mut self) {
        self.location = None;
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn payload(&self) -> Option<String> {
        self.location.as_ref().map(|location| qr_payload(&location.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LocationTrigger, ProjectId};

    fn location(id: &str) -> Location {
        Location {
            id: LocationId::from(id),
            project_id: ProjectId::from("p1"),
            location_name: format!("Stop {id}"),
            location_trigger: LocationTrigger::QrCodeScan,
            location_position: "-27.4975, 153.0137".into(),
            score_points: 5,
            clue: None,
            location_content: String::new(),
        }
    }

    #[test]
    fn payload_uses_location_id() {
        assert_eq!(qr_payload(&LocationId::from("42")), "Location ID: 42");
    }

    #[test]
    fn only_one_code_is_shown() {
        let mut slot = QrSlot::default();
        slot.show(location("a"));
        slot.show(location("b"));
        assert_eq!(slot.payload().as_deref(), Some("Location ID: b"));
        slot.close();
        assert!(slot.location().is_none());
        assert!(slot.payload().is_none());
    }
}

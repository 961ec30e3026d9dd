use async_trait::async_trait;

use crate::application::ports::{GenerationError, ItineraryGenerator};
use crate::domain::{Activity, DayPlan, TimeSlot};

/// Deterministic generator for tests and offline runs.
pub struct MockItineraryGenerator;

#[async_trait]
impl ItineraryGenerator for MockItineraryGenerator {
    async fn generate(
        &self,
        destination: &str,
        duration_days: u32,
    ) -> Result<Vec<DayPlan>, GenerationError> {
        let itinerary = (1..=duration_days)
            .map(|day| DayPlan {
                day,
                theme: format!("Day {} in {}", day, destination),
                activities: vec![
                    Activity {
                        time: TimeSlot::Morning,
                        description: format!("Morning walk around {}", destination),
                        location: destination.to_string(),
                    },
                    Activity {
                        time: TimeSlot::Afternoon,
                        description: "Local museum visit".to_string(),
                        location: "City center".to_string(),
                    },
                    Activity {
                        time: TimeSlot::Evening,
                        description: "Dinner at a local restaurant".to_string(),
                        location: "Old town".to_string(),
                    },
                ],
            })
            .collect();

        Ok(itinerary)
    }
}

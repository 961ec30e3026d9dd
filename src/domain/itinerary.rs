use std::fmt;
use std::str::FromStr;

/// Number of activities every day plan must carry, one per time slot.
pub const ACTIVITIES_PER_DAY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(TimeSlot::Morning),
            "Afternoon" => Ok(TimeSlot::Afternoon),
            "Evening" => Ok(TimeSlot::Evening),
            _ => Err(format!("Invalid time slot: {}", s)),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub time: TimeSlot,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub theme: String,
    pub activities: Vec<Activity>,
}

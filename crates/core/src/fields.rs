//! Closed field domains for the booking draft.
//!
//! Every selectable field in the wizard draws from one of these
//! enumerations. The serde representation of each variant is the exact
//! label stored in the `bookings` table, so a serialized payload needs no
//! further mapping.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tattoo size
// ---------------------------------------------------------------------------

/// Size bracket for the requested tattoo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TattooSize {
    #[serde(rename = "1-2 inches")]
    OneToTwoInches,
    #[serde(rename = "3-5 inches")]
    ThreeToFiveInches,
    #[serde(rename = "6-9 inches")]
    SixToNineInches,
    #[serde(rename = "9+ inches")]
    NinePlusInches,
    Other,
}

/// All size brackets, in display order.
pub const ALL_SIZES: [TattooSize; 5] = [
    TattooSize::OneToTwoInches,
    TattooSize::ThreeToFiveInches,
    TattooSize::SixToNineInches,
    TattooSize::NinePlusInches,
    TattooSize::Other,
];

impl TattooSize {
    /// Parse a size label from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "1-2 inches" => Ok(Self::OneToTwoInches),
            "3-5 inches" => Ok(Self::ThreeToFiveInches),
            "6-9 inches" => Ok(Self::SixToNineInches),
            "9+ inches" => Ok(Self::NinePlusInches),
            "Other" => Ok(Self::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid tattoo size '{s}'. Must be one of: 1-2 inches, 3-5 inches, \
                 6-9 inches, 9+ inches, Other"
            ))),
        }
    }

    /// Convert to the database-compatible label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToTwoInches => "1-2 inches",
            Self::ThreeToFiveInches => "3-5 inches",
            Self::SixToNineInches => "6-9 inches",
            Self::NinePlusInches => "9+ inches",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Tattoo placement
// ---------------------------------------------------------------------------

/// Body placement for the requested tattoo.
///
/// Variant names double as wire labels, so no serde renames are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TattooPlacement {
    Back,
    Shoulder,
    Legs,
    Chest,
    Abdomen,
    Hands,
    Arms,
    Feet,
    Neck,
    Other,
}

/// All placements, in display order.
pub const ALL_PLACEMENTS: [TattooPlacement; 10] = [
    TattooPlacement::Back,
    TattooPlacement::Shoulder,
    TattooPlacement::Legs,
    TattooPlacement::Chest,
    TattooPlacement::Abdomen,
    TattooPlacement::Hands,
    TattooPlacement::Arms,
    TattooPlacement::Feet,
    TattooPlacement::Neck,
    TattooPlacement::Other,
];

impl TattooPlacement {
    /// Parse a placement label from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "Back" => Ok(Self::Back),
            "Shoulder" => Ok(Self::Shoulder),
            "Legs" => Ok(Self::Legs),
            "Chest" => Ok(Self::Chest),
            "Abdomen" => Ok(Self::Abdomen),
            "Hands" => Ok(Self::Hands),
            "Arms" => Ok(Self::Arms),
            "Feet" => Ok(Self::Feet),
            "Neck" => Ok(Self::Neck),
            "Other" => Ok(Self::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid tattoo placement '{s}'. Must be one of: Back, Shoulder, Legs, \
                 Chest, Abdomen, Hands, Arms, Feet, Neck, Other"
            ))),
        }
    }

    /// Convert to the database-compatible label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Shoulder => "Shoulder",
            Self::Legs => "Legs",
            Self::Chest => "Chest",
            Self::Abdomen => "Abdomen",
            Self::Hands => "Hands",
            Self::Arms => "Arms",
            Self::Feet => "Feet",
            Self::Neck => "Neck",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Weekday availability
// ---------------------------------------------------------------------------

/// Day of the week a client is available.
///
/// Ordered Monday through Sunday so sets of days serialize in calendar
/// order regardless of selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// All weekdays, Monday first.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Parse a weekday label from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "Monday" => Ok(Self::Monday),
            "Tuesday" => Ok(Self::Tuesday),
            "Wednesday" => Ok(Self::Wednesday),
            "Thursday" => Ok(Self::Thursday),
            "Friday" => Ok(Self::Friday),
            "Saturday" => Ok(Self::Saturday),
            "Sunday" => Ok(Self::Sunday),
            _ => Err(CoreError::Validation(format!(
                "Invalid weekday '{s}'. Must be one of: Monday, Tuesday, Wednesday, \
                 Thursday, Friday, Saturday, Sunday"
            ))),
        }
    }

    /// Convert to the database-compatible label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking status
// ---------------------------------------------------------------------------

/// Lifecycle status of a stored booking.
///
/// The wizard only ever creates `Pending` bookings; the other states are
/// assigned by the studio when reviewing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'. Must be one of: pending, confirmed, cancelled"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking option
// ---------------------------------------------------------------------------

/// The two ways into the wizard from the choosing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingOption {
    /// Start a custom design from scratch (wizard step 1).
    Custom,
    /// Browse the flash gallery and book a pre-made design.
    Flash,
}

impl BookingOption {
    /// Convert to a wire-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Flash => "flash",
        }
    }
}

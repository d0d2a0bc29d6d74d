//! # Locality
//!
//! The closed set of Indian states and union territories a customer can be
//! billed in, each with its two-digit GST state code.
//!
//! ```text
//! GSTIN  09CAFPB2385C1Z1
//!        ││
//!        └┴── state code 09 = Uttar Pradesh
//! ```
//!
//! The state decides the supply type of an invoice (see
//! [`crate::tax::SupplyType::between`]); the code is used for display and for
//! checking the GSTIN prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// A state or union territory with a GST state code.
///
/// Serialized by display name (`"Uttar Pradesh"`), matching what a form
/// dropdown submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum State {
    #[serde(rename = "Andhra Pradesh")]
    AndhraPradesh,
    #[serde(rename = "Arunachal Pradesh")]
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    #[serde(rename = "Himachal Pradesh")]
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    #[serde(rename = "Madhya Pradesh")]
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    #[serde(rename = "Tamil Nadu")]
    TamilNadu,
    Telangana,
    Tripura,
    #[serde(rename = "Uttar Pradesh")]
    UttarPradesh,
    Uttarakhand,
    #[serde(rename = "West Bengal")]
    WestBengal,
    Delhi,
    #[serde(rename = "Jammu and Kashmir")]
    JammuAndKashmir,
    Ladakh,
}

impl State {
    /// Every selectable state, in dropdown order.
    pub const ALL: [State; 31] = [
        State::AndhraPradesh,
        State::ArunachalPradesh,
        State::Assam,
        State::Bihar,
        State::Chhattisgarh,
        State::Goa,
        State::Gujarat,
        State::Haryana,
        State::HimachalPradesh,
        State::Jharkhand,
        State::Karnataka,
        State::Kerala,
        State::MadhyaPradesh,
        State::Maharashtra,
        State::Manipur,
        State::Meghalaya,
        State::Mizoram,
        State::Nagaland,
        State::Odisha,
        State::Punjab,
        State::Rajasthan,
        State::Sikkim,
        State::TamilNadu,
        State::Telangana,
        State::Tripura,
        State::UttarPradesh,
        State::Uttarakhand,
        State::WestBengal,
        State::Delhi,
        State::JammuAndKashmir,
        State::Ladakh,
    ];

    /// Display name as printed on the invoice.
    pub const fn name(&self) -> &'static str {
        match self {
            State::AndhraPradesh => "Andhra Pradesh",
            State::ArunachalPradesh => "Arunachal Pradesh",
            State::Assam => "Assam",
            State::Bihar => "Bihar",
            State::Chhattisgarh => "Chhattisgarh",
            State::Goa => "Goa",
            State::Gujarat => "Gujarat",
            State::Haryana => "Haryana",
            State::HimachalPradesh => "Himachal Pradesh",
            State::Jharkhand => "Jharkhand",
            State::Karnataka => "Karnataka",
            State::Kerala => "Kerala",
            State::MadhyaPradesh => "Madhya Pradesh",
            State::Maharashtra => "Maharashtra",
            State::Manipur => "Manipur",
            State::Meghalaya => "Meghalaya",
            State::Mizoram => "Mizoram",
            State::Nagaland => "Nagaland",
            State::Odisha => "Odisha",
            State::Punjab => "Punjab",
            State::Rajasthan => "Rajasthan",
            State::Sikkim => "Sikkim",
            State::TamilNadu => "Tamil Nadu",
            State::Telangana => "Telangana",
            State::Tripura => "Tripura",
            State::UttarPradesh => "Uttar Pradesh",
            State::Uttarakhand => "Uttarakhand",
            State::WestBengal => "West Bengal",
            State::Delhi => "Delhi",
            State::JammuAndKashmir => "Jammu and Kashmir",
            State::Ladakh => "Ladakh",
        }
    }

    /// Two-digit GST state code (`"09"` for Uttar Pradesh).
    pub const fn code(&self) -> &'static str {
        match self {
            State::AndhraPradesh => "37",
            State::ArunachalPradesh => "12",
            State::Assam => "18",
            State::Bihar => "10",
            State::Chhattisgarh => "22",
            State::Goa => "30",
            State::Gujarat => "24",
            State::Haryana => "06",
            State::HimachalPradesh => "02",
            State::Jharkhand => "20",
            State::Karnataka => "29",
            State::Kerala => "32",
            State::MadhyaPradesh => "23",
            State::Maharashtra => "27",
            State::Manipur => "14",
            State::Meghalaya => "17",
            State::Mizoram => "15",
            State::Nagaland => "13",
            State::Odisha => "21",
            State::Punjab => "03",
            State::Rajasthan => "08",
            State::Sikkim => "11",
            State::TamilNadu => "33",
            State::Telangana => "36",
            State::Tripura => "16",
            State::UttarPradesh => "09",
            State::Uttarakhand => "05",
            State::WestBengal => "19",
            State::Delhi => "07",
            State::JammuAndKashmir => "01",
            State::Ladakh => "38",
        }
    }

    /// Looks a state up by its GST code.
    pub fn from_code(code: &str) -> Option<State> {
        State::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the display name (any case) or the two-digit code.
impl FromStr for State {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        State::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(wanted) || st.code() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "state".to_string(),
                allowed: State::ALL.iter().map(|st| st.name().to_string()).collect(),
            })
    }
}

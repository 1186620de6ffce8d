//! Common fixture values
//!
//! Stable, realistic values so tests only spell out what they care about.

use chrono::{NaiveDate, Utc};

use core_kernel::{DemandId, FamilyMemberId, ProfileId};

/// Identifier fixtures
pub struct IdFixtures;

impl IdFixtures {
    pub fn profile_id() -> ProfileId {
        ProfileId::new_v7()
    }

    pub fn family_member_id() -> FamilyMemberId {
        FamilyMemberId::new_v7()
    }

    pub fn demand_id() -> DemandId {
        DemandId::new_v7()
    }
}

/// String fixtures
pub struct StringFixtures;

impl StringFixtures {
    pub fn member_name() -> &'static str {
        "Koffi Agbodjan"
    }

    pub fn controller_name() -> &'static str {
        "Chantal Hounsou"
    }

    pub fn administrator_name() -> &'static str {
        "Adetokunbo Moreira"
    }

    pub fn service_type() -> &'static str {
        "allocation naissance"
    }

    pub fn beneficiary_name() -> &'static str {
        "Ama Agbodjan"
    }

    pub fn national_id() -> &'static str {
        "1996-0420-187"
    }

    pub fn birth_certificate_ref() -> &'static str {
        "AC-2024-1187"
    }

    pub fn email() -> &'static str {
        "koffi@exemple.bj"
    }
}

/// Temporal fixtures
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A date of birth safely in the past
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1996, 4, 20).expect("valid date")
    }

    /// A qualifying event a few days back
    pub fn event_date() -> NaiveDate {
        Utc::now().date_naive() - chrono::Days::new(5)
    }
}

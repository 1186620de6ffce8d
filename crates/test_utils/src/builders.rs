//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{ProfileId, Role};
use domain_demands::demand::SubmittedFields;
use domain_demands::{Demand, DemandStatus, Reviewer};
use domain_family::member::RegistrationFields;
use domain_family::{FamilyMember, Relation};
use domain_profile::{NewProfile, Profile};

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for constructing test demands
pub struct TestDemandBuilder {
    member_id: ProfileId,
    member_name: String,
    service_type: String,
    beneficiary_name: String,
    beneficiary_relation: String,
    amount: Option<Decimal>,
    event_date: Option<NaiveDate>,
    status: DemandStatus,
}

impl Default for TestDemandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDemandBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            member_id: ProfileId::new_v7(),
            member_name: StringFixtures::member_name().to_string(),
            service_type: StringFixtures::service_type().to_string(),
            beneficiary_name: StringFixtures::beneficiary_name().to_string(),
            beneficiary_relation: "enfant".to_string(),
            amount: None,
            event_date: Some(TemporalFixtures::event_date()),
            status: DemandStatus::Pending,
        }
    }

    /// Sets the submitting member
    pub fn with_member(mut self, id: ProfileId, name: impl Into<String>) -> Self {
        self.member_id = id;
        self.member_name = name.into();
        self
    }

    /// Sets the service type
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Sets the beneficiary
    pub fn with_beneficiary(
        mut self,
        name: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        self.beneficiary_name = name.into();
        self.beneficiary_relation = relation.into();
        self
    }

    /// Sets the requested amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Drives the built demand to the given status through legal transitions
    pub fn with_status(mut self, status: DemandStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the demand
    ///
    /// Non-pending statuses are reached through the real transition
    /// machinery, so reviewer stamps are consistent with the status.
    pub fn build(self) -> Demand {
        let mut demand = Demand::submit(
            self.member_id,
            self.member_name,
            SubmittedFields {
                service_type: self.service_type,
                beneficiary_name: self.beneficiary_name,
                beneficiary_relation: self.beneficiary_relation,
                amount: self.amount,
                event_date: self.event_date,
            },
            None,
        );

        let controller = Reviewer::new(ProfileId::new_v7(), StringFixtures::controller_name());
        let administrator =
            Reviewer::new(ProfileId::new_v7(), StringFixtures::administrator_name());

        match self.status {
            DemandStatus::Pending => {}
            DemandStatus::Accepted => {
                demand
                    .transition(DemandStatus::Accepted, controller, None)
                    .expect("pending -> accepted");
            }
            DemandStatus::Rejected => {
                demand
                    .transition(DemandStatus::Rejected, controller, None)
                    .expect("pending -> rejected");
            }
            DemandStatus::Validated => {
                demand
                    .transition(DemandStatus::Accepted, controller, None)
                    .expect("pending -> accepted");
                demand
                    .transition(DemandStatus::Validated, administrator, None)
                    .expect("accepted -> validated");
            }
        }

        demand
    }
}

/// Builder for constructing test family members
pub struct TestFamilyMemberBuilder {
    owner_id: ProfileId,
    first_name: String,
    last_name: String,
    national_id: String,
    birth_certificate_ref: String,
    date_of_birth: NaiveDate,
    relation: Relation,
}

impl Default for TestFamilyMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFamilyMemberBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            owner_id: ProfileId::new_v7(),
            first_name: "Ama".to_string(),
            last_name: "Agbodjan".to_string(),
            national_id: StringFixtures::national_id().to_string(),
            birth_certificate_ref: StringFixtures::birth_certificate_ref().to_string(),
            date_of_birth: TemporalFixtures::date_of_birth(),
            relation: Relation::Child,
        }
    }

    /// Sets the owning member
    pub fn with_owner(mut self, owner_id: ProfileId) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Sets the relation
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    /// Sets the dependent's name
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Builds the family member
    pub fn build(self) -> FamilyMember {
        FamilyMember::register(
            self.owner_id,
            RegistrationFields {
                first_name: self.first_name,
                last_name: self.last_name,
                national_id: self.national_id,
                birth_certificate_ref: self.birth_certificate_ref,
                date_of_birth: self.date_of_birth,
                relation: self.relation,
            },
            None,
        )
    }
}

/// Builder for constructing test profiles
pub struct TestProfileBuilder {
    email: String,
    first_name: String,
    last_name: String,
    role: Role,
    is_active: bool,
    phone: Option<String>,
}

impl Default for TestProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProfileBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            email: StringFixtures::email().to_string(),
            first_name: "Koffi".to_string(),
            last_name: "Agbodjan".to_string(),
            role: Role::Member,
            is_active: true,
            phone: None,
        }
    }

    /// Sets the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the activation flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Builds the profile
    pub fn build(self) -> Profile {
        Profile::create(NewProfile {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            is_active: self.is_active,
            phone: self.phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_builder_defaults_to_pending() {
        let demand = TestDemandBuilder::new().build();
        assert_eq!(demand.status, DemandStatus::Pending);
        assert!(demand.controller_id.is_none());
    }

    #[test]
    fn test_demand_builder_reaches_validated_consistently() {
        let demand = TestDemandBuilder::new()
            .with_status(DemandStatus::Validated)
            .build();

        assert_eq!(demand.status, DemandStatus::Validated);
        assert!(demand.controller_id.is_some());
        assert!(demand.administrator_id.is_some());
    }

    #[test]
    fn test_family_member_builder() {
        let owner = ProfileId::new_v7();
        let member = TestFamilyMemberBuilder::new()
            .with_owner(owner)
            .with_relation(Relation::Wife)
            .build();

        assert_eq!(member.owner_id, owner);
        assert_eq!(member.relation, Relation::Wife);
    }

    #[test]
    fn test_profile_builder() {
        let profile = TestProfileBuilder::new()
            .with_role(Role::Controller)
            .with_active(false)
            .build();

        assert_eq!(profile.role, Role::Controller);
        assert!(!profile.is_active);
    }
}

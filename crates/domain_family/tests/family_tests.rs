//! Tests for the family registry domain

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::ProfileId;
use domain_family::{can_add_relation, quota, FamilyMember, Relation, MAX_CHILDREN};
use domain_family::member::RegistrationFields;

fn dependent(owner: ProfileId, relation: Relation) -> FamilyMember {
    FamilyMember::register(
        owner,
        RegistrationFields {
            first_name: "Sena".to_string(),
            last_name: "Akplogan".to_string(),
            national_id: "1995-204-889".to_string(),
            birth_certificate_ref: "AC-1995-1204".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 12, 4).unwrap(),
            relation,
        },
        None,
    )
}

// ============================================================================
// Rule table
// ============================================================================

#[test]
fn test_quota_table() {
    assert_eq!(quota(Relation::Child), MAX_CHILDREN);
    for relation in [
        Relation::Husband,
        Relation::Wife,
        Relation::Father,
        Relation::Mother,
        Relation::StepFather,
        Relation::StepMother,
    ] {
        assert_eq!(quota(relation), 1);
    }
}

#[test]
fn test_sixth_child_is_last() {
    let owner = ProfileId::new();
    let mut registry = vec![dependent(owner, Relation::Child)];

    // One child registered: five more fit
    for _ in 0..5 {
        assert!(can_add_relation(&registry, Relation::Child));
        registry.push(dependent(owner, Relation::Child));
    }

    assert!(!can_add_relation(&registry, Relation::Child));
}

#[test]
fn test_full_household_is_reachable() {
    let owner = ProfileId::new();
    let mut registry = Vec::new();

    let full_house = [
        Relation::Wife,
        Relation::Father,
        Relation::Mother,
        Relation::StepFather,
        Relation::StepMother,
    ];

    for relation in full_house {
        assert!(can_add_relation(&registry, relation));
        registry.push(dependent(owner, relation));
    }
    for _ in 0..MAX_CHILDREN {
        assert!(can_add_relation(&registry, Relation::Child));
        registry.push(dependent(owner, Relation::Child));
    }

    // Everything is now at its cap
    for relation in Relation::ALL {
        assert!(!can_add_relation(&registry, relation));
    }
}

// ============================================================================
// Cardinality invariant under arbitrary add/delete sequences
// ============================================================================

#[derive(Debug, Clone)]
enum RegistryOp {
    Add(Relation),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        3 => (0usize..Relation::ALL.len()).prop_map(|i| RegistryOp::Add(Relation::ALL[i])),
        1 => (0usize..16).prop_map(RegistryOp::Delete),
    ]
}

fn spouse_count(registry: &[FamilyMember]) -> usize {
    registry.iter().filter(|m| m.relation.is_spouse()).count()
}

fn relation_count(registry: &[FamilyMember], relation: Relation) -> usize {
    registry.iter().filter(|m| m.relation == relation).count()
}

proptest! {
    /// After any sequence of gated adds and deletes, no relation ever
    /// exceeds its cardinality cap.
    #[test]
    fn prop_caps_hold_under_any_sequence(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let owner = ProfileId::new();
        let mut registry: Vec<FamilyMember> = Vec::new();

        for op in ops {
            match op {
                RegistryOp::Add(relation) => {
                    if can_add_relation(&registry, relation) {
                        registry.push(dependent(owner, relation));
                    }
                }
                RegistryOp::Delete(index) => {
                    if !registry.is_empty() {
                        registry.remove(index % registry.len());
                    }
                }
            }

            prop_assert!(spouse_count(&registry) <= 1);
            prop_assert!(relation_count(&registry, Relation::Father) <= 1);
            prop_assert!(relation_count(&registry, Relation::Mother) <= 1);
            prop_assert!(relation_count(&registry, Relation::StepFather) <= 1);
            prop_assert!(relation_count(&registry, Relation::StepMother) <= 1);
            prop_assert!(relation_count(&registry, Relation::Child) <= MAX_CHILDREN);
        }
    }

    /// A refused add would indeed have breached a cap.
    #[test]
    fn prop_refusal_means_cap_reached(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let owner = ProfileId::new();
        let mut registry: Vec<FamilyMember> = Vec::new();

        for op in ops {
            if let RegistryOp::Add(relation) = op {
                if can_add_relation(&registry, relation) {
                    registry.push(dependent(owner, relation));
                } else if relation.is_spouse() {
                    prop_assert_eq!(spouse_count(&registry), 1);
                } else {
                    prop_assert_eq!(relation_count(&registry, relation), quota(relation));
                }
            }
        }
    }
}

//! Eligibility rule engine
//!
//! Pure predicates over a snapshot of an owner's registry. No side effects;
//! the registry service evaluates these immediately before insertion.

use crate::member::FamilyMember;
use crate::relation::Relation;

/// Maximum number of children per member
pub const MAX_CHILDREN: usize = 6;

/// Cardinality cap for a relation category
///
/// Both spouse variants share the single spouse slot.
pub fn quota(relation: Relation) -> usize {
    match relation {
        Relation::Child => MAX_CHILDREN,
        Relation::Husband
        | Relation::Wife
        | Relation::Father
        | Relation::Mother
        | Relation::StepFather
        | Relation::StepMother => 1,
    }
}

/// Number of registered dependents counting against the candidate's quota
pub fn count_against_quota(existing: &[FamilyMember], candidate: Relation) -> usize {
    existing
        .iter()
        .filter(|member| {
            if candidate.is_spouse() {
                member.relation.is_spouse()
            } else {
                member.relation == candidate
            }
        })
        .count()
}

/// Whether one more dependent with this relation fits under the caps
pub fn can_add_relation(existing: &[FamilyMember], candidate: Relation) -> bool {
    count_against_quota(existing, candidate) < quota(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::ProfileId;
    use crate::member::{FamilyMember, RegistrationFields};

    fn member_with(relation: Relation) -> FamilyMember {
        FamilyMember::register(
            ProfileId::new(),
            RegistrationFields {
                first_name: "Test".to_string(),
                last_name: "Dependent".to_string(),
                national_id: "0000".to_string(),
                birth_certificate_ref: "AC-0".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                relation,
            },
            None,
        )
    }

    #[test]
    fn test_empty_registry_accepts_everything() {
        for relation in Relation::ALL {
            assert!(can_add_relation(&[], relation), "{relation} rejected on empty registry");
        }
    }

    #[test]
    fn test_spouse_quota_spans_both_variants() {
        let registry = vec![member_with(Relation::Husband)];

        assert!(!can_add_relation(&registry, Relation::Husband));
        assert!(!can_add_relation(&registry, Relation::Wife));

        let registry = vec![member_with(Relation::Wife)];
        assert!(!can_add_relation(&registry, Relation::Husband));
    }

    #[test]
    fn test_single_slot_relations() {
        for relation in [
            Relation::Father,
            Relation::Mother,
            Relation::StepFather,
            Relation::StepMother,
        ] {
            let registry = vec![member_with(relation)];
            assert!(!can_add_relation(&registry, relation), "{relation} cap not enforced");
        }
    }

    #[test]
    fn test_step_parents_do_not_consume_parent_slots() {
        let registry = vec![member_with(Relation::StepFather)];
        assert!(can_add_relation(&registry, Relation::Father));
    }

    #[test]
    fn test_child_quota_is_six() {
        let mut registry = vec![member_with(Relation::Child)];
        assert!(can_add_relation(&registry, Relation::Child));

        for _ in 0..5 {
            registry.push(member_with(Relation::Child));
        }

        assert_eq!(count_against_quota(&registry, Relation::Child), 6);
        assert!(!can_add_relation(&registry, Relation::Child));
    }

    #[test]
    fn test_children_do_not_block_other_relations() {
        let registry: Vec<_> = (0..6).map(|_| member_with(Relation::Child)).collect();
        assert!(can_add_relation(&registry, Relation::Mother));
        assert!(can_add_relation(&registry, Relation::Wife));
    }
}

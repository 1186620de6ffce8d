//! Assertion helpers

use domain_demands::{Demand, DemandStatus};

/// Asserts a demand carries consistent first-stage reviewer stamps
pub fn assert_controller_stamped(demand: &Demand) {
    assert!(
        demand.controller_id.is_some(),
        "controller_id missing on {}",
        demand.id
    );
    assert!(
        demand.controller_name.is_some(),
        "controller_name missing on {}",
        demand.id
    );
    assert!(
        demand.processing_date.is_some(),
        "processing_date missing on {}",
        demand.id
    );
}

/// Asserts a demand carries consistent final-stage reviewer stamps
pub fn assert_administrator_stamped(demand: &Demand) {
    assert!(
        demand.administrator_id.is_some(),
        "administrator_id missing on {}",
        demand.id
    );
    assert!(
        demand.administrator_name.is_some(),
        "administrator_name missing on {}",
        demand.id
    );
    assert!(
        demand.validation_date.is_some(),
        "validation_date missing on {}",
        demand.id
    );
}

/// Asserts a demand is still untouched by any reviewer
pub fn assert_unreviewed(demand: &Demand) {
    assert_eq!(demand.status, DemandStatus::Pending);
    assert!(demand.controller_id.is_none());
    assert!(demand.processing_date.is_none());
    assert!(demand.administrator_id.is_none());
    assert!(demand.validation_date.is_none());
}

/// Asserts a list is ordered newest-created first
pub fn assert_newest_first(demands: &[Demand]) {
    for window in demands.windows(2) {
        assert!(
            window[0].created_at >= window[1].created_at,
            "demands out of order: {} before {}",
            window[0].id,
            window[1].id
        );
    }
}

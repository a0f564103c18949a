//! Derivation pipeline - KPIs and recommendations recomputed from a
//! department collection.

use rand::Rng;
use wardflow_logic::department::Department;
use wardflow_logic::kpi::{compute_kpis, KpiSnapshot};
use wardflow_logic::recommendations::{
    generate_recommendations, Recommendation, RecommendationPolicy,
};

use crate::store::Slice;

/// KPIs relative to `previous` and the ordered recommendation list.
pub fn derive(
    departments: &[Department],
    previous: &KpiSnapshot,
    policy: &RecommendationPolicy,
    rng: &mut impl Rng,
) -> (KpiSnapshot, Vec<Recommendation>) {
    let kpis = compute_kpis(departments, previous);
    let recommendations = generate_recommendations(departments, policy, rng);
    (kpis, recommendations)
}

/// Slices to publish alongside `departments` so readers never see the
/// departments without their derived state.
pub fn derived_slices(
    departments: &[Department],
    previous: &KpiSnapshot,
    policy: &RecommendationPolicy,
    rng: &mut impl Rng,
) -> [Slice; 2] {
    let (kpis, recommendations) = derive(departments, previous, policy, rng);
    [Slice::Kpis(kpis), Slice::Recommendations(recommendations)]
}

//! Staffing recommendations derived from department load.
//!
//! Two rules fire per department:
//! - utilization > 85 → `add_staff` (high priority above 95, else medium)
//! - utilization < 50 with more than 4 staff → `remove_staff` (low priority)
//!
//! The result is ordered by priority weight and truncated. Ordering among
//! equal priorities is decided by [`TieBreak`].

use std::cmp::Reverse;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::staffing;
use crate::department::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    AddStaff,
    RemoveStaff,
    ReallocateBeds,
    ScheduleChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// high 3, medium 2, low 1.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    /// Percent.
    pub wait_time_reduction: u32,
    /// Percent.
    pub efficiency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationDetails {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    /// Display name of the department concerned.
    pub department: String,
    pub priority: Priority,
    pub description: String,
    /// Percent, 0-100.
    pub confidence: u32,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<RecommendationDetails>,
}

/// How recommendations of equal priority are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Keep generation order (department order, add before remove).
    #[default]
    Insertion,
    /// Higher confidence first.
    Confidence,
    /// Department name, alphabetical.
    Department,
}

/// Limits and ordering applied to generated recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationPolicy {
    pub max_items: usize,
    pub tie_break: TieBreak,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            max_items: staffing::MAX_RECOMMENDATIONS,
            tie_break: TieBreak::Insertion,
        }
    }
}

/// Generate, order and truncate recommendations for `departments`.
pub fn generate_recommendations<R: Rng + ?Sized>(
    departments: &[Department],
    policy: &RecommendationPolicy,
    rng: &mut R,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for dept in departments {
        if dept.utilization > staffing::ADD_STAFF_ABOVE {
            recs.push(add_staff(dept, rng));
        }
        if dept.utilization < staffing::REMOVE_STAFF_BELOW
            && dept.staff > staffing::MIN_STAFF_TO_RELEASE
        {
            recs.push(remove_staff(dept, rng));
        }
    }

    // sort_by_key is stable, so Insertion keeps generation order
    match policy.tie_break {
        TieBreak::Insertion => recs.sort_by_key(|r| Reverse(r.priority.weight())),
        TieBreak::Confidence => {
            recs.sort_by_key(|r| (Reverse(r.priority.weight()), Reverse(r.confidence)))
        }
        TieBreak::Department => recs.sort_by(|a, b| {
            b.priority
                .weight()
                .cmp(&a.priority.weight())
                .then_with(|| a.department.cmp(&b.department))
        }),
    }

    recs.truncate(policy.max_items);
    recs
}

fn add_staff<R: Rng + ?Sized>(dept: &Department, rng: &mut R) -> Recommendation {
    let extra = ((dept.utilization - 80.0) / 10.0).ceil().max(1.0) as u32;
    let priority = if dept.utilization > staffing::HIGH_PRIORITY_ABOVE {
        Priority::High
    } else {
        Priority::Medium
    };

    Recommendation {
        id: format!("{}-staff", dept.id),
        kind: RecommendationType::AddStaff,
        department: dept.name.clone(),
        priority,
        description: format!("Add {} staff members to reduce queue", extra),
        confidence: rng.gen_range(85..=99),
        impact: Impact {
            wait_time_reduction: (dept.utilization / 5.0).floor() as u32,
            efficiency: (dept.utilization / 4.0).floor() as u32,
        },
        details: Some(RecommendationDetails {
            from: "Available pool".to_string(),
            to: dept.name.clone(),
            resources: Some(format!("{} nurses, 1 doctor", extra)),
        }),
    }
}

fn remove_staff<R: Rng + ?Sized>(dept: &Department, rng: &mut R) -> Recommendation {
    Recommendation {
        id: format!("{}-reduce", dept.id),
        kind: RecommendationType::RemoveStaff,
        department: dept.name.clone(),
        priority: Priority::Low,
        description: "Reallocate excess staff to high-demand departments".to_string(),
        confidence: rng.gen_range(70..=89),
        impact: Impact {
            wait_time_reduction: rng.gen_range(0..5),
            efficiency: rng.gen_range(10..25),
        },
        details: Some(RecommendationDetails {
            from: dept.name.clone(),
            to: "Emergency/OPD".to_string(),
            resources: Some("1-2 staff members".to_string()),
        }),
    }
}

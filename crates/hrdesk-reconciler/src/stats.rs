//! Dashboard statistics derived from the skill list and project history

use chrono::{DateTime, NaiveDate, Utc};
use hrdesk_types::{EmployeeProject, SkillAssignment};
use std::fmt;

/// Figures shown above the skill list, recomputed after every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillStats {
    pub total_skills: usize,
    /// Mean proficiency with one decimal, or `"0"` for an empty list
    pub average_proficiency: String,
    /// Projects whose status is exactly "In Progress"
    pub active_projects: usize,
    /// Sum of each project's elapsed days; overlaps are counted twice
    pub project_days: i64,
}

impl SkillStats {
    pub fn compute(
        skills: &[SkillAssignment],
        projects: &[EmployeeProject],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            total_skills: skills.len(),
            average_proficiency: average_proficiency(skills),
            active_projects: projects.iter().filter(|p| p.is_active()).count(),
            project_days: total_project_days(projects, now),
        }
    }
}

impl fmt::Display for SkillStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skills: {} | Avg proficiency: {} | Active projects: {} | Project time: {}d",
            self.total_skills, self.average_proficiency, self.active_projects, self.project_days
        )
    }
}

/// Mean level to one decimal, with ties rounded up
pub fn average_proficiency(skills: &[SkillAssignment]) -> String {
    if skills.is_empty() {
        return "0".to_string();
    }
    let sum: u64 = skills.iter().map(|s| u64::from(s.proficiency_level)).sum();
    let n = skills.len() as u64;
    let tenths = (sum * 20 + n) / (2 * n);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Whole days from start to end (or `now`), floored and never negative
///
/// Projects without a readable start date contribute nothing.
pub fn total_project_days(projects: &[EmployeeProject], now: DateTime<Utc>) -> i64 {
    projects
        .iter()
        .filter_map(|project| {
            let start = parse_instant(project.start_date.as_deref()?)?;
            let end = project
                .end_date
                .as_deref()
                .and_then(parse_instant)
                .unwrap_or(now);
            Some((end - start).num_days().max(0))
        })
        .sum()
}

/// Parse `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn level(l: u8) -> SkillAssignment {
        SkillAssignment {
            proficiency_level: l,
            ..SkillAssignment::blank()
        }
    }

    fn project(status: &str, start: Option<&str>, end: Option<&str>) -> EmployeeProject {
        EmployeeProject {
            status: status.into(),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_average_proficiency() {
        assert_eq!(average_proficiency(&[]), "0");
        assert_eq!(average_proficiency(&[level(3), level(7)]), "5.0");
        assert_eq!(average_proficiency(&[level(3), level(4), level(4)]), "3.7");
        assert_eq!(average_proficiency(&[level(10)]), "10.0");
    }

    #[test]
    fn test_average_proficiency_rounds_ties_up() {
        let quarter = [level(1), level(1), level(1), level(2)];
        assert_eq!(average_proficiency(&quarter), "1.3");
        let small = [level(1), level(0), level(0), level(0)];
        assert_eq!(average_proficiency(&small), "0.3");
        let three_quarters = [level(2), level(2), level(2), level(1)];
        assert_eq!(average_proficiency(&three_quarters), "1.8");
    }

    #[test]
    fn test_open_project_counts_until_now() {
        let days = total_project_days(&[project("In Progress", Some("2024-01-01"), None)], now());
        // 31 days of January plus 29 of February 2024
        assert_eq!(days, 60);
    }

    #[test]
    fn test_open_project_against_wall_clock() {
        let now = Utc::now();
        let expected = (now.date_naive() - NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).num_days();
        let days = total_project_days(&[project("Done", Some("2024-01-01"), None)], now);
        assert_eq!(days, expected);
    }

    #[test]
    fn test_inverted_dates_clamp_to_zero() {
        let days = total_project_days(
            &[project("Done", Some("2024-05-01"), Some("2024-04-01"))],
            now(),
        );
        assert_eq!(days, 0);
    }

    #[test]
    fn test_overlapping_projects_are_summed() {
        let projects = [
            project("Done", Some("2024-01-01"), Some("2024-01-11")),
            project("Done", Some("2024-01-05"), Some("2024-01-15")),
            project("Done", None, Some("2024-01-15")),
            project("Done", Some("not a date"), None),
        ];
        assert_eq!(total_project_days(&projects, now()), 20);
    }

    #[test]
    fn test_compute_counts_active_exactly() {
        let projects = [
            project("In Progress", None, None),
            project("in progress", None, None),
            project("Completed", None, None),
        ];
        let stats = SkillStats::compute(&[level(2)], &projects, now());
        assert_eq!(stats.total_skills, 1);
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.average_proficiency, "2.0");
        assert_eq!(stats.project_days, 0);
    }
}

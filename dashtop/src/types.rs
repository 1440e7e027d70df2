//! Types that mirror the admin API's JSON schema.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerStatus {
    #[serde(rename = "cpu_usage")]
    pub cpu_usage_percent: f64,
    #[serde(rename = "ram_used")]
    pub ram_used_gb: f64,
    #[serde(rename = "ram_total")]
    pub ram_total_gb: f64,
    #[serde(rename = "process_ram_used")]
    pub process_ram_used_gb: f64,
    #[serde(rename = "process_ram_allocated")]
    pub process_ram_allocated_gb: f64,
    // older servers report the concrete stack instead of generic names
    #[serde(default, alias = "python_version")]
    pub runtime_version: String,
    #[serde(default, alias = "flask_version")]
    pub framework_version: String,
    #[serde(default, alias = "mysql_version")]
    pub database_version: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QuestionRow {
    pub id: u64,
    pub title: String,
    pub difficulty: i64,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserRow {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub registered: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SubmissionRow {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub question_id: u64,
    pub question_title: String,
    pub is_correct: bool,
    /// Milliseconds.
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ActivityStats {
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub correct_submissions: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub accuracy_rate: Option<f64>,
}

impl ActivityStats {
    /// Server-provided accuracy, or correct/total rounded to one decimal.
    pub fn accuracy(&self) -> f64 {
        if let Some(rate) = self.accuracy_rate {
            return rate;
        }
        if self.total_submissions == 0 {
            return 0.0;
        }
        let pct = self.correct_submissions as f64 / self.total_submissions as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_status_accepts_legacy_version_fields() {
        let json = r#"{
            "cpu_usage": 45, "ram_used": 3, "ram_total": 8,
            "process_ram_used": 1.2, "process_ram_allocated": 2.0,
            "python_version": "3.12.1", "flask_version": "3.0.0", "mysql_version": "8.0.36"
        }"#;
        let s: ServerStatus = serde_json::from_str(json).unwrap();
        assert_eq!(s.cpu_usage_percent, 45.0);
        assert_eq!(s.runtime_version, "3.12.1");
        assert_eq!(s.framework_version, "3.0.0");
        assert_eq!(s.database_version, "8.0.36");
    }

    #[test]
    fn server_status_missing_metric_is_rejected() {
        let json = r#"{ "cpu_usage": 45, "ram_used": 3 }"#;
        assert!(serde_json::from_str::<ServerStatus>(json).is_err());
    }

    #[test]
    fn accuracy_falls_back_to_ratio() {
        let mut s = ActivityStats {
            new_users: 4,
            total_submissions: 3,
            correct_submissions: 2,
            active_users: 2,
            accuracy_rate: None,
        };
        assert_eq!(s.accuracy(), 66.7);
        s.total_submissions = 0;
        assert_eq!(s.accuracy(), 0.0);
        s.accuracy_rate = Some(12.5);
        assert_eq!(s.accuracy(), 12.5);
    }
}

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::assessments::{CreateAssessmentCommand, UpdateAssessmentCommand};
use crate::domain::models::assessment::Assessment;
use crate::domain::schedule::{unify_ages, unify_genders, ScheduleEntry};
use crate::storage::traits::AssessmentStorage;

/// Service for managing assessments.
///
/// Assessment schedules carry the same sibling-group semantics as package
/// schedules: a set unify toggle propagates the first entry's value across
/// the group before the save lands.
#[derive(Clone)]
pub struct AssessmentService {
    storage: Arc<dyn AssessmentStorage>,
}

impl AssessmentService {
    pub fn new(storage: Arc<dyn AssessmentStorage>) -> Self {
        Self { storage }
    }

    /// Create a new assessment
    pub async fn create_assessment(&self, command: CreateAssessmentCommand) -> Result<Assessment> {
        info!("Creating assessment: name={}", command.name);

        Self::validate_name(&command.name)?;
        Self::validate_fee(command.fee)?;

        let mut entries = command.entries;
        if command.unify.ages {
            entries = unify_ages(&entries);
        }
        if command.unify.genders {
            entries = unify_genders(&entries);
        }

        let now = Utc::now();
        let assessment = Assessment {
            id: shared::Assessment::generate_id(now.timestamp_millis() as u64),
            branch_id: command.branch_id,
            name: command.name.trim().to_string(),
            fee: command.fee,
            entries,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_assessment(&assessment).await?;

        info!(
            "Created assessment: {} with ID: {}",
            assessment.name, assessment.id
        );
        Ok(assessment)
    }

    /// Get an assessment by ID
    pub async fn get_assessment(&self, assessment_id: &str) -> Result<Option<Assessment>> {
        let assessment = self.storage.get_assessment(assessment_id).await?;
        if assessment.is_none() {
            warn!("Assessment not found: {}", assessment_id);
        }
        Ok(assessment)
    }

    /// List assessments, optionally restricted to one branch
    pub async fn list_assessments(&self, branch_id: Option<&str>) -> Result<Vec<Assessment>> {
        self.storage.list_assessments(branch_id).await
    }

    /// Update an existing assessment
    pub async fn update_assessment(
        &self,
        assessment_id: &str,
        command: UpdateAssessmentCommand,
    ) -> Result<Assessment> {
        info!("Updating assessment: {}", assessment_id);

        let mut assessment = self
            .storage
            .get_assessment(assessment_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Assessment not found: {}", assessment_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            assessment.name = name.trim().to_string();
        }
        if let Some(fee) = command.fee {
            Self::validate_fee(fee)?;
            assessment.fee = fee;
        }

        let mut entries: Vec<ScheduleEntry> = command.entries.unwrap_or(assessment.entries);
        if command.unify_ages.unwrap_or(false) {
            entries = unify_ages(&entries);
        }
        if command.unify_genders.unwrap_or(false) {
            entries = unify_genders(&entries);
        }
        assessment.entries = entries;
        assessment.updated_at = Utc::now();

        self.storage.update_assessment(&assessment).await?;

        info!(
            "Updated assessment: {} with ID: {}",
            assessment.name, assessment.id
        );
        Ok(assessment)
    }

    /// Delete an assessment
    pub async fn delete_assessment(&self, assessment_id: &str) -> Result<()> {
        let assessment = self
            .storage
            .get_assessment(assessment_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Assessment not found: {}", assessment_id))?;

        self.storage.delete_assessment(assessment_id).await?;

        info!(
            "Deleted assessment: {} with ID: {}",
            assessment.name, assessment.id
        );
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Assessment name cannot be empty"));
        }
        Ok(())
    }

    fn validate_fee(fee: f64) -> Result<()> {
        if fee < 0.0 {
            return Err(anyhow::anyhow!("Fee cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::collections::BTreeSet;

    use crate::domain::age::AgeSpec;
    use crate::domain::age_range::{AgeBound, AgeRange};
    use crate::domain::schedule::{ages_in_sync, UnifyToggle};
    use crate::storage::sqlite::db::DbConnection;
    use crate::storage::sqlite::repositories::AssessmentRepository;

    async fn setup_test() -> AssessmentService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        AssessmentService::new(Arc::new(AssessmentRepository::new(db)))
    }

    fn entry(day: u8, start_years: f64) -> ScheduleEntry {
        let genders: BTreeSet<String> = ["boys"].iter().map(|s| s.to_string()).collect();
        ScheduleEntry {
            day_of_week: day,
            from: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            to: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            memo: String::new(),
            age_range: AgeRange {
                start: AgeSpec::years(start_years),
                end: AgeBound::Limited(AgeSpec::years(start_years + 4.0)),
            },
            genders,
        }
    }

    #[tokio::test]
    async fn test_create_assessment_with_unified_ages() {
        let service = setup_test().await;

        let assessment = service
            .create_assessment(CreateAssessmentCommand {
                branch_id: "branch::1".to_string(),
                name: "Placement Trial".to_string(),
                fee: 25.0,
                entries: vec![entry(6, 6.0), entry(0, 8.0)],
                unify: UnifyToggle {
                    ages: true,
                    genders: false,
                },
            })
            .await
            .expect("Failed to create assessment");

        assert!(ages_in_sync(&assessment.entries));
        assert_eq!(assessment.entries[1].age_range.start, AgeSpec::years(6.0));
    }

    #[tokio::test]
    async fn test_assessment_round_trips_through_storage() {
        let service = setup_test().await;

        let created = service
            .create_assessment(CreateAssessmentCommand {
                branch_id: "branch::1".to_string(),
                name: "Placement Trial".to_string(),
                fee: 25.0,
                entries: vec![entry(6, 6.0)],
                unify: UnifyToggle::default(),
            })
            .await
            .unwrap();

        let loaded = service.get_assessment(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_assessment_rejects_negative_fee() {
        let service = setup_test().await;

        let result = service
            .create_assessment(CreateAssessmentCommand {
                branch_id: "branch::1".to_string(),
                name: "Placement Trial".to_string(),
                fee: -1.0,
                entries: Vec::new(),
                unify: UnifyToggle::default(),
            })
            .await;
        assert!(result.is_err());
    }
}

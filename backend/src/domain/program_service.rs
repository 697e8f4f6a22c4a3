use anyhow::Result;
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::age_range::resolve_age_range;
use crate::domain::commands::programs::{CreateProgramCommand, UpdateProgramCommand};
use crate::domain::models::program::Program;
use crate::storage::traits::ProgramStorage;

/// Service for managing training programs.
///
/// Admission windows arrive in form units and are normalized to their
/// canonical birth-date pair before anything is persisted; the inverse
/// derivation for edit forms happens in the REST mappers.
#[derive(Clone)]
pub struct ProgramService {
    storage: Arc<dyn ProgramStorage>,
}

impl ProgramService {
    pub fn new(storage: Arc<dyn ProgramStorage>) -> Self {
        Self { storage }
    }

    /// Create a new program
    pub async fn create_program(&self, command: CreateProgramCommand) -> Result<Program> {
        info!("Creating program: name={}", command.name);

        Self::validate_name(&command.name)?;

        let now = Utc::now();
        let today = Local::now().date_naive();
        let program = Program {
            id: shared::Program::generate_id(now.timestamp_millis() as u64),
            branch_id: command.branch_id,
            name: command.name.trim().to_string(),
            genders: command.genders,
            dob_range: resolve_age_range(&command.age_range, today),
            created_at: now,
            updated_at: now,
        };

        self.storage.store_program(&program).await?;

        info!("Created program: {} with ID: {}", program.name, program.id);
        Ok(program)
    }

    /// Get a program by ID
    pub async fn get_program(&self, program_id: &str) -> Result<Option<Program>> {
        let program = self.storage.get_program(program_id).await?;
        if program.is_none() {
            warn!("Program not found: {}", program_id);
        }
        Ok(program)
    }

    /// List programs, optionally restricted to one branch
    pub async fn list_programs(&self, branch_id: Option<&str>) -> Result<Vec<Program>> {
        self.storage.list_programs(branch_id).await
    }

    /// Update an existing program
    pub async fn update_program(
        &self,
        program_id: &str,
        command: UpdateProgramCommand,
    ) -> Result<Program> {
        info!("Updating program: {}", program_id);

        let mut program = self
            .storage
            .get_program(program_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Program not found: {}", program_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            program.name = name.trim().to_string();
        }
        if let Some(genders) = command.genders {
            program.genders = genders;
        }
        if let Some(age_range) = command.age_range {
            // Re-anchor the window to today's date
            program.dob_range = resolve_age_range(&age_range, Local::now().date_naive());
        }
        program.updated_at = Utc::now();

        self.storage.update_program(&program).await?;

        info!("Updated program: {} with ID: {}", program.name, program.id);
        Ok(program)
    }

    /// Delete a program
    pub async fn delete_program(&self, program_id: &str) -> Result<()> {
        let program = self
            .storage
            .get_program(program_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Program not found: {}", program_id))?;

        self.storage.delete_program(program_id).await?;

        info!("Deleted program: {} with ID: {}", program.name, program.id);
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Program name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Program name cannot exceed 100 characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::age::{birthdate_from_age, AgeSpec};
    use crate::domain::age_range::{age_range_from_dates, AgeBound, AgeRange};
    use crate::storage::sqlite::db::DbConnection;
    use crate::storage::sqlite::repositories::ProgramRepository;

    async fn setup_test() -> ProgramService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        ProgramService::new(Arc::new(ProgramRepository::new(db)))
    }

    fn create_command(name: &str, age_range: AgeRange) -> CreateProgramCommand {
        let genders: BTreeSet<String> = ["girls", "boys"].iter().map(|s| s.to_string()).collect();
        CreateProgramCommand {
            branch_id: "branch::1".to_string(),
            name: name.to_string(),
            genders,
            age_range,
        }
    }

    #[tokio::test]
    async fn test_create_program_normalizes_age_range() {
        let service = setup_test().await;
        let range = AgeRange {
            start: AgeSpec::years(5.0),
            end: AgeBound::Limited(AgeSpec::years(8.0)),
        };

        let program = service
            .create_program(create_command("Junior Swim", range))
            .await
            .expect("Failed to create program");

        let today = Local::now().date_naive();
        assert_eq!(
            program.dob_range.start_date_of_birth,
            birthdate_from_age(AgeSpec::years(5.0), today)
        );
        assert_eq!(
            program.dob_range.end_date_of_birth,
            birthdate_from_age(AgeSpec::years(8.0), today)
        );
    }

    #[tokio::test]
    async fn test_stored_program_reads_back_into_form_units() {
        let service = setup_test().await;
        let range = AgeRange {
            start: AgeSpec::months(31.0),
            end: AgeBound::Unlimited,
        };

        let program = service
            .create_program(create_command("Open Masters", range))
            .await
            .unwrap();

        let loaded = service.get_program(&program.id).await.unwrap().unwrap();
        let today = Local::now().date_naive();
        assert_eq!(age_range_from_dates(&loaded.dob_range, today), range);
    }

    #[tokio::test]
    async fn test_update_program_reanchors_age_range() {
        let service = setup_test().await;

        let program = service
            .create_program(create_command(
                "Junior Swim",
                AgeRange {
                    start: AgeSpec::years(5.0),
                    end: AgeBound::Limited(AgeSpec::years(8.0)),
                },
            ))
            .await
            .unwrap();

        let updated = service
            .update_program(
                &program.id,
                UpdateProgramCommand {
                    age_range: Some(AgeRange {
                        start: AgeSpec::years(6.0),
                        end: AgeBound::Unlimited,
                    }),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update program");

        let today = Local::now().date_naive();
        assert_eq!(
            age_range_from_dates(&updated.dob_range, today),
            AgeRange {
                start: AgeSpec::years(6.0),
                end: AgeBound::Unlimited,
            }
        );
    }

    #[tokio::test]
    async fn test_get_nonexistent_program() {
        let service = setup_test().await;

        assert!(service.get_program("program::nope").await.unwrap().is_none());
    }
}

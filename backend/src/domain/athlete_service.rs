use anyhow::Result;
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::athletes::{CreateAthleteCommand, UpdateAthleteCommand};
use crate::domain::models::athlete::Athlete;
use crate::storage::traits::AthleteStorage;

/// Service for managing athletes
#[derive(Clone)]
pub struct AthleteService {
    storage: Arc<dyn AthleteStorage>,
}

impl AthleteService {
    pub fn new(storage: Arc<dyn AthleteStorage>) -> Self {
        Self { storage }
    }

    /// Enroll a new athlete
    pub async fn create_athlete(&self, command: CreateAthleteCommand) -> Result<Athlete> {
        info!(
            "Creating athlete: name={}, date_of_birth={}",
            command.name, command.date_of_birth
        );

        Self::validate_name(&command.name)?;
        Self::validate_date_of_birth(command.date_of_birth)?;

        let now = Utc::now();
        let athlete = Athlete {
            id: shared::Athlete::generate_id(now.timestamp_millis() as u64),
            branch_id: command.branch_id,
            name: command.name.trim().to_string(),
            date_of_birth: command.date_of_birth,
            gender: command.gender,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_athlete(&athlete).await?;

        info!("Created athlete: {} with ID: {}", athlete.name, athlete.id);
        Ok(athlete)
    }

    /// Get an athlete by ID
    pub async fn get_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>> {
        let athlete = self.storage.get_athlete(athlete_id).await?;
        if athlete.is_none() {
            warn!("Athlete not found: {}", athlete_id);
        }
        Ok(athlete)
    }

    /// List athletes, optionally restricted to one branch
    pub async fn list_athletes(&self, branch_id: Option<&str>) -> Result<Vec<Athlete>> {
        self.storage.list_athletes(branch_id).await
    }

    /// Update an existing athlete
    pub async fn update_athlete(
        &self,
        athlete_id: &str,
        command: UpdateAthleteCommand,
    ) -> Result<Athlete> {
        info!("Updating athlete: {}", athlete_id);

        let mut athlete = self
            .storage
            .get_athlete(athlete_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Athlete not found: {}", athlete_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            athlete.name = name.trim().to_string();
        }
        if let Some(date_of_birth) = command.date_of_birth {
            Self::validate_date_of_birth(date_of_birth)?;
            athlete.date_of_birth = date_of_birth;
        }
        if let Some(gender) = command.gender {
            athlete.gender = Some(gender);
        }
        if let Some(notes) = command.notes {
            athlete.notes = Some(notes);
        }
        athlete.updated_at = Utc::now();

        self.storage.update_athlete(&athlete).await?;

        info!("Updated athlete: {} with ID: {}", athlete.name, athlete.id);
        Ok(athlete)
    }

    /// Delete an athlete
    pub async fn delete_athlete(&self, athlete_id: &str) -> Result<()> {
        let athlete = self
            .storage
            .get_athlete(athlete_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Athlete not found: {}", athlete_id))?;

        self.storage.delete_athlete(athlete_id).await?;

        info!("Deleted athlete: {} with ID: {}", athlete.name, athlete.id);
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Athlete name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Athlete name cannot exceed 100 characters"));
        }
        Ok(())
    }

    fn validate_date_of_birth(date_of_birth: chrono::NaiveDate) -> Result<()> {
        if date_of_birth > Local::now().date_naive() {
            return Err(anyhow::anyhow!("Date of birth cannot be in the future"));
        }
        Ok(())
    }
}

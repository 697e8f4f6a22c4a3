use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::branches::{CreateBranchCommand, UpdateBranchCommand};
use crate::domain::models::branch::Branch;
use crate::storage::traits::BranchStorage;

/// Service for managing sports branches
#[derive(Clone)]
pub struct BranchService {
    storage: Arc<dyn BranchStorage>,
}

impl BranchService {
    pub fn new(storage: Arc<dyn BranchStorage>) -> Self {
        Self { storage }
    }

    /// Create a new branch
    pub async fn create_branch(&self, command: CreateBranchCommand) -> Result<Branch> {
        info!("Creating branch: name={}, sport={}", command.name, command.sport);

        Self::validate_name(&command.name)?;
        Self::validate_sport(&command.sport)?;

        let now = Utc::now();
        let branch = Branch {
            id: shared::Branch::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            sport: command.sport.trim().to_string(),
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_branch(&branch).await?;

        info!("Created branch: {} with ID: {}", branch.name, branch.id);
        Ok(branch)
    }

    /// Get a branch by ID
    pub async fn get_branch(&self, branch_id: &str) -> Result<Option<Branch>> {
        let branch = self.storage.get_branch(branch_id).await?;
        if branch.is_none() {
            warn!("Branch not found: {}", branch_id);
        }
        Ok(branch)
    }

    /// List all branches
    pub async fn list_branches(&self) -> Result<Vec<Branch>> {
        self.storage.list_branches().await
    }

    /// Update an existing branch
    pub async fn update_branch(
        &self,
        branch_id: &str,
        command: UpdateBranchCommand,
    ) -> Result<Branch> {
        info!("Updating branch: {}", branch_id);

        let mut branch = self
            .storage
            .get_branch(branch_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Branch not found: {}", branch_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            branch.name = name.trim().to_string();
        }
        if let Some(sport) = command.sport {
            Self::validate_sport(&sport)?;
            branch.sport = sport.trim().to_string();
        }
        if let Some(description) = command.description {
            branch.description = Some(description);
        }
        branch.updated_at = Utc::now();

        self.storage.update_branch(&branch).await?;

        info!("Updated branch: {} with ID: {}", branch.name, branch.id);
        Ok(branch)
    }

    /// Delete a branch
    pub async fn delete_branch(&self, branch_id: &str) -> Result<()> {
        let branch = self
            .storage
            .get_branch(branch_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Branch not found: {}", branch_id))?;

        self.storage.delete_branch(branch_id).await?;

        info!("Deleted branch: {} with ID: {}", branch.name, branch.id);
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Branch name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Branch name cannot exceed 100 characters"));
        }
        Ok(())
    }

    fn validate_sport(sport: &str) -> Result<()> {
        if sport.trim().is_empty() {
            return Err(anyhow::anyhow!("Sport cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::db::DbConnection;
    use crate::storage::sqlite::repositories::BranchRepository;

    async fn setup_test() -> BranchService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        BranchService::new(Arc::new(BranchRepository::new(db)))
    }

    #[tokio::test]
    async fn test_create_branch() {
        let service = setup_test().await;

        let branch = service
            .create_branch(CreateBranchCommand {
                name: "  Downtown  ".to_string(),
                sport: "Swimming".to_string(),
                description: Some("Main pool complex".to_string()),
            })
            .await
            .expect("Failed to create branch");

        assert_eq!(branch.name, "Downtown");
        assert_eq!(branch.sport, "Swimming");
        assert!(branch.id.starts_with("branch::"));
    }

    #[tokio::test]
    async fn test_create_branch_validation() {
        let service = setup_test().await;

        let result = service
            .create_branch(CreateBranchCommand {
                name: "".to_string(),
                sport: "Swimming".to_string(),
                description: None,
            })
            .await;
        assert!(result.is_err());

        let result = service
            .create_branch(CreateBranchCommand {
                name: "Downtown".to_string(),
                sport: "   ".to_string(),
                description: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_branch() {
        let service = setup_test().await;

        let branch = service
            .create_branch(CreateBranchCommand {
                name: "Downtown".to_string(),
                sport: "Swimming".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let updated = service
            .update_branch(
                &branch.id,
                UpdateBranchCommand {
                    name: Some("Downtown East".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update branch");

        assert_eq!(updated.name, "Downtown East");
        assert_eq!(updated.sport, "Swimming");
        assert_eq!(updated.created_at, branch.created_at);
    }

    #[tokio::test]
    async fn test_update_nonexistent_branch() {
        let service = setup_test().await;

        let result = service
            .update_branch("branch::nonexistent", UpdateBranchCommand::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_branch() {
        let service = setup_test().await;

        let branch = service
            .create_branch(CreateBranchCommand {
                name: "Downtown".to_string(),
                sport: "Swimming".to_string(),
                description: None,
            })
            .await
            .unwrap();

        service.delete_branch(&branch.id).await.expect("Failed to delete branch");
        assert!(service.get_branch(&branch.id).await.unwrap().is_none());

        let result = service.delete_branch(&branch.id).await;
        assert!(result.is_err());
    }
}

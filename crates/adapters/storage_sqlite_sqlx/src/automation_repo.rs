//! `SQLite` implementation of [`AutomationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::AutomationRepository;
use careops_domain::automation::{Action, AutomationRule, Conditions, Trigger};
use careops_domain::error::CareOpsError;
use careops_domain::id::{AutomationRuleId, WorkspaceId};
use careops_domain::time::Timestamp;

use crate::error::StorageError;
use crate::row::{
    decode_error, optional_timestamp, parse, parse_optional_timestamp, parse_timestamp, timestamp,
};

const INSERT: &str = "INSERT INTO automation_rules (id, workspace_id, name, description, trigger_type, action_type, action, conditions, is_active, execution_count, last_executed_at, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

struct Wrapper(AutomationRule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<AutomationRule> {
        value.map(|w| w.0)
    }

    fn all(rows: Vec<Self>) -> Vec<AutomationRule> {
        rows.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let trigger: String = row.try_get("trigger_type")?;
        let action_json: String = row.try_get("action")?;
        let conditions_json: String = row.try_get("conditions")?;
        let execution_count: i64 = row.try_get("execution_count")?;
        let last_executed_at: Option<String> = row.try_get("last_executed_at")?;
        let created_at: String = row.try_get("created_at")?;

        let action: Action = serde_json::from_str(&action_json).map_err(decode_error)?;
        let conditions: Conditions =
            serde_json::from_str(&conditions_json).map_err(decode_error)?;

        Ok(Self(AutomationRule {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            trigger: parse::<Trigger>(&trigger)?,
            action,
            conditions,
            is_active: row.try_get("is_active")?,
            execution_count: u64::try_from(execution_count).unwrap_or_default(),
            last_executed_at: parse_optional_timestamp(last_executed_at)?,
            created_at: parse_timestamp(&created_at)?,
        }))
    }
}

/// JSON columns of a rule, encoded once per write.
struct Encoded {
    action: String,
    conditions: String,
}

impl Encoded {
    fn of(rule: &AutomationRule) -> Result<Self, StorageError> {
        Ok(Self {
            action: serde_json::to_string(&rule.action)?,
            conditions: serde_json::to_string(&rule.conditions)?,
        })
    }
}

/// `SQLite`-backed automation rule repository.
#[derive(Clone)]
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, CareOpsError> {
        let encoded = Encoded::of(&rule)?;

        sqlx::query(INSERT)
            .bind(rule.id.to_string())
            .bind(rule.workspace_id.to_string())
            .bind(&rule.name)
            .bind(&rule.description)
            .bind(rule.trigger.as_str())
            .bind(rule.action.kind())
            .bind(&encoded.action)
            .bind(&encoded.conditions)
            .bind(rule.is_active)
            .bind(count(rule.execution_count))
            .bind(optional_timestamp(rule.last_executed_at))
            .bind(timestamp(rule.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn create_many(&self, rules: Vec<AutomationRule>) -> Result<(), CareOpsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        for rule in &rules {
            let encoded = Encoded::of(rule)?;
            sqlx::query(INSERT)
                .bind(rule.id.to_string())
                .bind(rule.workspace_id.to_string())
                .bind(&rule.name)
                .bind(&rule.description)
                .bind(rule.trigger.as_str())
                .bind(rule.action.kind())
                .bind(&encoded.action)
                .bind(&encoded.conditions)
                .bind(rule.is_active)
                .bind(count(rule.execution_count))
                .bind(optional_timestamp(rule.last_executed_at))
                .bind(timestamp(rule.created_at))
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn get_by_id(
        &self,
        id: AutomationRuleId,
    ) -> Result<Option<AutomationRule>, CareOpsError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automation_rules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<AutomationRule>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM automation_rules WHERE workspace_id = ? ORDER BY created_at, rowid",
        )
        .bind(workspace_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(Wrapper::all(rows))
    }

    async fn find_active(
        &self,
        workspace_id: WorkspaceId,
        trigger: Trigger,
    ) -> Result<Vec<AutomationRule>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM automation_rules WHERE workspace_id = ? AND trigger_type = ? AND is_active = 1 ORDER BY created_at, rowid",
        )
        .bind(workspace_id.to_string())
        .bind(trigger.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(Wrapper::all(rows))
    }

    async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, CareOpsError> {
        let encoded = Encoded::of(&rule)?;

        sqlx::query(
            "UPDATE automation_rules SET name = ?, description = ?, trigger_type = ?, action_type = ?, action = ?, conditions = ?, is_active = ? WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(&rule.description)
        .bind(rule.trigger.as_str())
        .bind(rule.action.kind())
        .bind(&encoded.action)
        .bind(&encoded.conditions)
        .bind(rule.is_active)
        .bind(rule.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn record_execution(
        &self,
        id: AutomationRuleId,
        at: Timestamp,
    ) -> Result<(), CareOpsError> {
        sqlx::query(
            "UPDATE automation_rules SET execution_count = execution_count + 1, last_executed_at = ? WHERE id = ?",
        )
        .bind(timestamp(at))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }

    async fn delete(&self, id: AutomationRuleId) -> Result<(), CareOpsError> {
        sqlx::query("DELETE FROM automation_rules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careops_domain::automation::{StatusConfig, default_rules};
    use careops_domain::time::now;

    use crate::pool::{memory, seed_workspace};

    async fn setup() -> (SqliteAutomationRepository, WorkspaceId) {
        let db = memory().await;
        let ws = seed_workspace(&db).await;
        (SqliteAutomationRepository::new(db.pool().clone()), ws)
    }

    fn status_rule(ws: WorkspaceId, trigger: Trigger) -> AutomationRule {
        AutomationRule::builder()
            .workspace_id(ws)
            .name("Mark booked")
            .trigger(trigger)
            .action(Action::UpdateStatus(StatusConfig {
                entity_type: "contact".to_string(),
                status: "BOOKED".to_string(),
            }))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_rule_with_action_config() {
        let (repo, ws) = setup().await;
        let mut rule = status_rule(ws, Trigger::BookingCreated);
        rule.conditions
            .insert("minQuantity".to_string(), serde_json::json!(3));
        let id = rule.id;

        repo.create(rule).await.unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(fetched.workspace_id, ws);
        assert_eq!(fetched.trigger, Trigger::BookingCreated);
        assert!(matches!(
            fetched.action,
            Action::UpdateStatus(ref cfg) if cfg.status == "BOOKED"
        ));
        assert_eq!(fetched.conditions["minQuantity"], 3);
        assert_eq!(fetched.execution_count, 0);
        assert!(fetched.last_executed_at.is_none());
    }

    #[tokio::test]
    async fn should_find_only_active_rules_for_trigger_in_load_order() {
        let (repo, ws) = setup().await;
        repo.create_many(default_rules(ws)).await.unwrap();
        let mut inactive = status_rule(ws, Trigger::NewContact);
        inactive.is_active = false;
        repo.create(inactive).await.unwrap();
        repo.create(status_rule(ws, Trigger::BookingCreated))
            .await
            .unwrap();

        let new_contact = repo.find_active(ws, Trigger::NewContact).await.unwrap();
        assert_eq!(new_contact.len(), 1);
        assert_eq!(new_contact[0].name, "Welcome Email");

        let booking = repo
            .find_active(ws, Trigger::BookingCreated)
            .await
            .unwrap();
        let names: Vec<_> = booking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Booking Confirmation", "Mark booked"]);

        assert!(
            repo.find_active(WorkspaceId::new(), Trigger::NewContact)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(repo.list_by_workspace(ws).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn should_increment_execution_count_atomically() {
        let (repo, ws) = setup().await;
        let rule = status_rule(ws, Trigger::NewContact);
        let id = rule.id;
        repo.create(rule).await.unwrap();

        let first = now();
        repo.record_execution(id, first).await.unwrap();
        let second = first + chrono::Duration::seconds(5);
        repo.record_execution(id, second).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.execution_count, 2);
        assert_eq!(
            fetched.last_executed_at.map(|ts| ts.timestamp_micros()),
            Some(second.timestamp_micros())
        );
    }

    #[tokio::test]
    async fn should_not_reset_counter_on_update() {
        let (repo, ws) = setup().await;
        let rule = status_rule(ws, Trigger::NewContact);
        let id = rule.id;
        repo.create(rule).await.unwrap();
        repo.record_execution(id, now()).await.unwrap();

        let mut fetched = repo.get_by_id(id).await.unwrap().unwrap();
        fetched.name = "Renamed".to_string();
        fetched.execution_count = 0;
        fetched.is_active = false;
        repo.update(fetched).await.unwrap();

        let updated = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
        assert!(!updated.is_active);
        assert_eq!(updated.execution_count, 1);
    }

    #[tokio::test]
    async fn should_delete_rule() {
        let (repo, ws) = setup().await;
        let rule = status_rule(ws, Trigger::NewContact);
        let id = rule.id;
        repo.create(rule).await.unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}

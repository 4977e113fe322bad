//! Plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    models::Plan,
    params::{Id, ListPlans, RenamePlan},
};

impl Planner {
    /// Validates and saves a plan, returning it with its id assigned.
    ///
    /// Saves are serialized: a second save waits for the first transaction
    /// to commit.
    pub async fn save_plan(&self, plan: &Plan) -> Result<Plan> {
        plan.validate()?;

        let _guard = self.save_lock.lock().await;
        let to_save = plan.clone();
        let id = self
            .with_database(move |db, _| db.save_plan(&to_save))
            .await?;

        info!(
            "Saved plan {id} '{}' with {} stops and {} legs",
            plan.name,
            plan.route.stops.len(),
            plan.route.legs.len()
        );
        Ok(Plan {
            id: Some(id),
            ..plan.clone()
        })
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db, taxonomy| db.get_plan(plan_id, taxonomy))
            .await
    }

    /// Retrieves a plan, failing with `PlanNotFound` when it doesn't exist.
    pub async fn show_plan(&self, params: &Id) -> Result<Plan> {
        self.get_plan(params)
            .await?
            .ok_or(PlannerError::PlanNotFound { id: params.id })
    }

    /// Lists a user's plans as summaries.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let user_id = params.user_id.clone();
        let summaries = self
            .with_database(move |db, _| db.list_plans(&user_id))
            .await?;
        Ok(PlanSummaries(summaries))
    }

    /// Renames a plan and returns the updated plan.
    pub async fn rename_plan(&self, params: &RenamePlan) -> Result<Plan> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Plan name cannot be empty"));
        }

        let plan_id = params.id;
        let renamed = {
            let _guard = self.save_lock.lock().await;
            self.with_database(move |db, _| db.rename_plan(plan_id, &name))
                .await?
        };
        if !renamed {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }
        self.show_plan(&Id { id: plan_id }).await
    }

    /// Permanently deletes a plan with its stops, legs and steps. Returns the
    /// deleted plan.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        let plan = self.show_plan(params).await?;

        let plan_id = params.id;
        let _guard = self.save_lock.lock().await;
        let deleted = self
            .with_database(move |db, _| db.delete_plan(plan_id))
            .await?;
        if !deleted {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        info!("Deleted plan {plan_id}");
        Ok(plan)
    }
}

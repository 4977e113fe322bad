//! Plan persistence: replace-on-save writes and subtree loading.

use std::collections::BTreeMap;

use jiff::civil::{Date, Time};
use rusqlite::{OptionalExtension, Transaction, TransactionBehavior, params};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{
        CategorySelection, IndoorOutdoor, Leg, LegEndpoint, Place, Plan, PlanStop, PlanSummary,
        Route, Step,
    },
    taxonomy::Taxonomy,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (user_id, name, date, start_time, origin_address, snapshot_radius_km, snapshot_categories) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET user_id = ?1, name = ?2, date = ?3, start_time = ?4, origin_address = ?5, snapshot_radius_km = ?6, snapshot_categories = ?7 WHERE id = ?8";
const SELECT_PLAN_SQL: &str = "SELECT id, user_id, name, date, start_time, origin_address, snapshot_radius_km, snapshot_categories FROM plans WHERE id = ?1";
const RENAME_PLAN_SQL: &str = "UPDATE plans SET name = ?1 WHERE id = ?2";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

// Children first so the statements never depend on cascading deletes
const DELETE_STEPS_SQL: &str = "DELETE FROM plan_steps WHERE plan_id = ?1";
const DELETE_LEGS_SQL: &str = "DELETE FROM plan_legs WHERE plan_id = ?1";
const DELETE_ROUTE_SQL: &str = "DELETE FROM plan_routes WHERE plan_id = ?1";
const DELETE_STOPS_SQL: &str = "DELETE FROM plan_stops WHERE plan_id = ?1";

const INSERT_STOP_SQL: &str = "INSERT INTO plan_stops (plan_id, seq, place_id, place_name, place_address, lat, lon, start_time, end_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const INSERT_ROUTE_SQL: &str = "INSERT INTO plan_routes (plan_id, distance, duration, encoded_polyline) VALUES (?1, ?2, ?3, ?4)";
const INSERT_LEG_SQL: &str = "INSERT INTO plan_legs (plan_id, leg_index, distance, duration, encoded_polyline, start_seq, end_seq) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const INSERT_STEP_SQL: &str = "INSERT INTO plan_steps (plan_id, leg_index, step_index, distance, duration, nav_instruction) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_STOPS_SQL: &str = "SELECT seq, place_id, place_name, place_address, lat, lon, start_time, end_time FROM plan_stops WHERE plan_id = ?1 ORDER BY seq";
const SELECT_ROUTE_SQL: &str =
    "SELECT distance, duration, encoded_polyline FROM plan_routes WHERE plan_id = ?1";
const SELECT_LEGS_SQL: &str = "SELECT leg_index, distance, duration, encoded_polyline, start_seq, end_seq FROM plan_legs WHERE plan_id = ?1 ORDER BY leg_index";
const SELECT_STEPS_SQL: &str = "SELECT leg_index, distance, duration, nav_instruction FROM plan_steps WHERE plan_id = ?1 ORDER BY leg_index, step_index";

const SELECT_SUMMARIES_SQL: &str = "SELECT p.id, p.name, p.date, p.start_time, p.origin_address, \
     (SELECT COUNT(*) FROM plan_stops s WHERE s.plan_id = p.id), \
     COALESCE(r.distance, 0), COALESCE(r.duration, 0) \
     FROM plans p LEFT JOIN plan_routes r ON r.plan_id = p.id \
     WHERE p.user_id = ?1 ORDER BY p.date DESC, p.id DESC";

/// Plan row before its subtree is attached.
struct PlanRow {
    id: u64,
    user_id: String,
    name: String,
    date: Date,
    start_time: Time,
    origin_address: String,
    snapshot_radius_km: f64,
    snapshot_categories: String,
}

impl super::Database {
    /// Saves a plan and returns its id.
    ///
    /// The plan row is inserted when `plan.id` is `None` and updated
    /// otherwise. The stop, route, leg and step rows are deleted and
    /// reinserted in full inside the same immediate transaction, so readers
    /// never observe a partially written subtree.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<u64> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let snapshot = plan.snapshot_categories.to_snapshot();
        let date = plan.date.to_string();
        let start_time = plan.start_time.to_string();

        let id = match plan.id {
            Some(id) => {
                let changed = tx
                    .execute(
                        UPDATE_PLAN_SQL,
                        params![
                            plan.user_id,
                            plan.name,
                            date,
                            start_time,
                            plan.origin_address,
                            plan.snapshot_radius_km,
                            snapshot,
                            id as i64
                        ],
                    )
                    .db_context("Failed to update plan")?;
                if changed == 0 {
                    return Err(PlannerError::PlanNotFound { id });
                }
                id
            }
            None => {
                tx.execute(
                    INSERT_PLAN_SQL,
                    params![
                        plan.user_id,
                        plan.name,
                        date,
                        start_time,
                        plan.origin_address,
                        plan.snapshot_radius_km,
                        snapshot
                    ],
                )
                .db_context("Failed to insert plan")?;
                tx.last_insert_rowid() as u64
            }
        };

        Self::delete_subtree(&tx, id)?;
        Self::insert_subtree(&tx, id, &plan.route)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(id)
    }

    fn delete_subtree(tx: &Transaction<'_>, id: u64) -> Result<()> {
        for sql in [
            DELETE_STEPS_SQL,
            DELETE_LEGS_SQL,
            DELETE_ROUTE_SQL,
            DELETE_STOPS_SQL,
        ] {
            tx.execute(sql, params![id as i64])
                .db_context("Failed to clear plan route")?;
        }
        Ok(())
    }

    fn insert_subtree(tx: &Transaction<'_>, id: u64, route: &Route) -> Result<()> {
        let plan_id = id as i64;

        let mut stops: Vec<&PlanStop> = route.stops.iter().collect();
        stops.sort_by_key(|stop| stop.sequence);
        {
            let mut stmt = tx
                .prepare(INSERT_STOP_SQL)
                .db_context("Failed to prepare stop insert")?;
            for stop in stops {
                stmt.execute(params![
                    plan_id,
                    stop.sequence,
                    stop.place.id,
                    stop.place.name,
                    stop.place.address,
                    stop.place.lat,
                    stop.place.lon,
                    stop.start_time.to_string(),
                    stop.end_time.to_string()
                ])
                .db_context("Failed to insert stop")?;
            }
        }

        tx.execute(
            INSERT_ROUTE_SQL,
            params![
                plan_id,
                route.total_distance_m,
                route.total_duration_s,
                route.polyline
            ],
        )
        .db_context("Failed to insert route")?;

        let mut leg_stmt = tx
            .prepare(INSERT_LEG_SQL)
            .db_context("Failed to prepare leg insert")?;
        let mut step_stmt = tx
            .prepare(INSERT_STEP_SQL)
            .db_context("Failed to prepare step insert")?;
        for (leg_index, leg) in route.legs.iter().enumerate() {
            leg_stmt
                .execute(params![
                    plan_id,
                    leg_index as i64,
                    leg.distance_m,
                    leg.duration_s,
                    leg.polyline,
                    leg.start.sequence(),
                    leg.end.sequence()
                ])
                .db_context("Failed to insert leg")?;

            for (step_index, step) in leg.steps.iter().enumerate() {
                step_stmt
                    .execute(params![
                        plan_id,
                        leg_index as i64,
                        step_index as i64,
                        step.distance_m,
                        step.duration_s,
                        step.instruction
                    ])
                    .db_context("Failed to insert step")?;
            }
        }

        Ok(())
    }

    /// Loads a plan with its full subtree.
    ///
    /// Plans written before routes were stored load with no legs and zero
    /// totals. Stop places carry only what is persisted: id, name, address
    /// and coordinates.
    pub fn get_plan(&self, id: u64, taxonomy: &Taxonomy) -> Result<Option<Plan>> {
        let row = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], |row| {
                Ok(PlanRow {
                    id: row.get::<_, i64>(0)? as u64,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    date: parse_column(row.get(3)?, 3)?,
                    start_time: parse_column(row.get(4)?, 4)?,
                    origin_address: row.get(5)?,
                    snapshot_radius_km: row.get(6)?,
                    snapshot_categories: row.get(7)?,
                })
            })
            .optional()
            .db_context("Failed to query plan")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let route = self.load_route(row.id)?;
        Ok(Some(Plan {
            id: Some(row.id),
            user_id: row.user_id,
            name: row.name,
            date: row.date,
            start_time: row.start_time,
            origin_address: row.origin_address,
            route,
            snapshot_radius_km: row.snapshot_radius_km,
            snapshot_categories: CategorySelection::from_snapshot(
                &row.snapshot_categories,
                taxonomy,
            ),
        }))
    }

    fn load_route(&self, id: u64) -> Result<Route> {
        let plan_id = id as i64;

        let mut stmt = self
            .connection
            .prepare(SELECT_STOPS_SQL)
            .db_context("Failed to prepare stop query")?;
        let stops = stmt
            .query_map(params![plan_id], |row| {
                Ok(PlanStop {
                    sequence: row.get(0)?,
                    place: Place {
                        id: row.get(1)?,
                        name: row.get(2)?,
                        address: row.get(3)?,
                        lat: row.get(4)?,
                        lon: row.get(5)?,
                        distance_km: 0.0,
                        indoor_outdoor: IndoorOutdoor::default(),
                        categories: Vec::new(),
                    },
                    start_time: parse_column(row.get(6)?, 6)?,
                    end_time: parse_column(row.get(7)?, 7)?,
                })
            })
            .db_context("Failed to query stops")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch stops")?;

        let totals: Option<(u32, u32, String)> = self
            .connection
            .query_row(SELECT_ROUTE_SQL, params![plan_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()
            .db_context("Failed to query route")?;
        let Some((total_distance_m, total_duration_s, polyline)) = totals else {
            return Ok(Route::stops_only(stops));
        };

        let mut steps_by_leg: BTreeMap<i64, Vec<Step>> = BTreeMap::new();
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare step query")?;
        let step_rows = stmt
            .query_map(params![plan_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    Step {
                        distance_m: row.get(1)?,
                        duration_s: row.get(2)?,
                        instruction: row.get(3)?,
                    },
                ))
            })
            .db_context("Failed to query steps")?;
        for step_row in step_rows {
            let (leg_index, step) = step_row.db_context("Failed to fetch step")?;
            steps_by_leg.entry(leg_index).or_default().push(step);
        }

        let mut stmt = self
            .connection
            .prepare(SELECT_LEGS_SQL)
            .db_context("Failed to prepare leg query")?;
        let legs = stmt
            .query_map(params![plan_id], |row| {
                let leg_index: i64 = row.get(0)?;
                Ok(Leg {
                    distance_m: row.get(1)?,
                    duration_s: row.get(2)?,
                    polyline: row.get(3)?,
                    start: LegEndpoint::from_sequence(row.get(4)?),
                    end: LegEndpoint::from_sequence(row.get(5)?),
                    steps: steps_by_leg.remove(&leg_index).unwrap_or_default(),
                })
            })
            .db_context("Failed to query legs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch legs")?;

        Ok(Route {
            stops,
            legs,
            total_distance_m,
            total_duration_s,
            polyline,
        })
    }

    /// Lists a user's plans, most recent date first.
    pub fn list_plans(&self, user_id: &str) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map(params![user_id], |row| {
            Ok(PlanSummary {
                id: row.get::<_, i64>(0)? as u64,
                name: row.get(1)?,
                date: parse_column(row.get(2)?, 2)?,
                start_time: parse_column(row.get(3)?, 3)?,
                origin_address: row.get(4)?,
                total_stops: row.get(5)?,
                total_distance_m: row.get(6)?,
                total_duration_s: row.get(7)?,
            })
        })
        .db_context("Failed to query plans")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plans")
    }

    /// Renames a plan. Returns false if the plan doesn't exist.
    pub fn rename_plan(&mut self, id: u64, name: &str) -> Result<bool> {
        let changed = self
            .connection
            .execute(RENAME_PLAN_SQL, params![name, id as i64])
            .db_context("Failed to rename plan")?;
        Ok(changed > 0)
    }

    /// Deletes a plan and its subtree. Returns false if the plan doesn't
    /// exist.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::delete_subtree(&tx, id)?;
        let deleted = tx
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted > 0)
    }
}

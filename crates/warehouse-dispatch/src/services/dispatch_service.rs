//! # Dispatch Service
//!
//! Operations that span several actors: uploads, scanning, morning dispatch, dynamic
//! pickups, and the rider's status workflow.
//!
//! Each actor processes its own messages one at a time, but an operation here touches
//! several of them. Operations that move tasks through dispatch or advance a batch hold
//! `dispatch_lock` for their whole duration, so two dispatches never plan against the
//! same undispatched tasks and a batch never advances while a pickup is being inserted.
//! `batch_for_rider` takes the same lock, so a rider never reads a task that is completed
//! in a batch that has not advanced yet.
//!
//! Planners run on the blocking pool under the configured timeout. When planning or
//! validation fails, every task this call moved to `dispatching` goes back to
//! `undispatched`. A dispatch that fails after creating batches deletes them and recalls
//! their tasks; a pickup that fails after insertion is taken back out of its batch.

use crate::algorithm::distance::straight_segment;
use crate::algorithm::{
    plan_dispatch, plan_pickup, DispatchPlan, DispatchProblem, DispatchRider, DispatchStop, PickupAssignment,
    PickupCandidate, PickupProblem, PickupRequest, PlanningError, RiderRoute,
};
use crate::batch_actor::BatchError;
use crate::clients::{BatchClient, DeliveryClient, ItemClient, RiderClient};
use crate::clock::{day_start, SharedClock};
use crate::config::WarehouseConfig;
use crate::model::{
    BatchCreate, BatchId, DeliveryInformation, DeliveryLocation, DeliveryTask, DeliveryTaskCreate, DeliveryTaskDetail,
    DeliveryTaskId, DeliveryTaskUpdate, DeliveryTasksBatch, DeliveryTasksBatchDetail, DeliveryType, Item, ItemCreate,
    ItemId, Rider, RiderCreate, RiderId, RouteSegment,
};
use crate::services::DispatchError;
use crate::status::DeliveryStatus;
use resource_actor::ActorClient;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Ids of an item and the delivery task created for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedTask {
    pub item: ItemId,
    pub task: DeliveryTaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchedTask {
    pub delivery_task: DeliveryTaskId,
    pub rider: RiderId,
}

/// Result of a morning dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// One per rider that received work.
    pub batches: Vec<DeliveryTasksBatch>,
    pub dispatched: Vec<DispatchedTask>,
    /// Tasks no rider had room for; they are undispatched again.
    pub unassigned: Vec<DeliveryTaskId>,
}

#[derive(Clone)]
pub struct DispatchService {
    items: ItemClient,
    riders: RiderClient,
    deliveries: DeliveryClient,
    batches: BatchClient,
    config: WarehouseConfig,
    clock: SharedClock,
    dispatch_lock: Arc<Mutex<()>>,
}

type DispatchPlanner = fn(&DispatchProblem) -> DispatchPlan;
type PickupPlanner = fn(&PickupProblem) -> Result<Option<PickupAssignment>, PlanningError>;

fn find_duplicate<T: Copy + Eq + std::hash::Hash>(ids: &[T]) -> Option<T> {
    let mut seen = HashSet::new();
    ids.iter().copied().find(|id| !seen.insert(*id))
}

impl DispatchService {
    pub fn new(
        items: ItemClient,
        riders: RiderClient,
        deliveries: DeliveryClient,
        batches: BatchClient,
        config: WarehouseConfig,
        clock: SharedClock,
    ) -> Self {
        Self {
            items,
            riders,
            deliveries,
            batches,
            config,
            clock,
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    fn warehouse_location(&self) -> DeliveryLocation {
        DeliveryLocation::warehouse(self.config.warehouse)
    }

    // =========================================================================
    // Uploads
    // =========================================================================

    /// Creates every rider of a roster, or none of them.
    #[instrument(skip(self, roster), fields(size = roster.len()))]
    pub async fn upload_riders(&self, roster: Vec<RiderCreate>) -> Result<Vec<RiderId>, DispatchError> {
        let mut created = Vec::with_capacity(roster.len());
        for rider in roster {
            match self.riders.create_rider(rider).await {
                Ok(id) => created.push(id),
                Err(e) => {
                    warn!(error = %e, created = created.len(), "Roster upload failed, removing created riders");
                    for id in created {
                        if let Err(e) = self.riders.delete(id).await {
                            warn!(rider = %id, error = %e, "Failed to remove rider");
                        }
                    }
                    return Err(e.into());
                }
            }
        }
        info!(count = created.len(), "Roster uploaded");
        Ok(created)
    }

    /// Creates an item and its delivery task. If the task is rejected, the item is removed.
    #[instrument(skip(self))]
    pub async fn create_item_and_delivery_task(
        &self,
        item: ItemCreate,
        delivery_information: DeliveryInformation,
    ) -> Result<CreatedTask, DispatchError> {
        let item_id = self.items.create_item(item).await?;
        let created = self
            .deliveries
            .create_task(DeliveryTaskCreate {
                item_ids: vec![item_id],
                delivery_information,
            })
            .await;

        match created {
            Ok(task) => {
                info!(item = %item_id, task = %task, "Delivery task created");
                Ok(CreatedTask { item: item_id, task })
            }
            Err(e) => {
                if let Err(cleanup) = self.items.delete(item_id).await {
                    warn!(item = %item_id, error = %cleanup, "Failed to remove orphaned item");
                }
                Err(e.into())
            }
        }
    }

    /// Inventory upload: one item and delivery task per row, stopping at the first failure.
    #[instrument(skip(self, rows), fields(size = rows.len()))]
    pub async fn upload_inventory(
        &self,
        rows: Vec<(ItemCreate, DeliveryInformation)>,
    ) -> Result<Vec<CreatedTask>, DispatchError> {
        let mut created = Vec::with_capacity(rows.len());
        for (item, delivery_information) in rows {
            created.push(self.create_item_and_delivery_task(item, delivery_information).await?);
        }
        Ok(created)
    }

    /// A pickup is collected from where the item is, so the item is placed at the
    /// pickup location.
    #[instrument(skip(self))]
    pub async fn create_pickup_task(
        &self,
        mut item: ItemCreate,
        mut delivery_information: DeliveryInformation,
    ) -> Result<CreatedTask, DispatchError> {
        delivery_information.delivery_type = DeliveryType::Pickup;
        item.item_location = Some(delivery_information.delivery_location.clone());
        self.create_item_and_delivery_task(item, delivery_information).await
    }

    #[instrument(skip(self))]
    pub async fn scan_item(&self, item: ItemId, weight: f64, volume: f64) -> Result<Item, DispatchError> {
        let scanned = self.items.scan(item, weight, volume).await?;
        info!(item = %item, weight, volume, "Item scanned");
        Ok(scanned)
    }

    // =========================================================================
    // Population
    // =========================================================================

    pub async fn populate_task(&self, task: DeliveryTask) -> Result<DeliveryTaskDetail, DispatchError> {
        let mut items = Vec::with_capacity(task.item_ids.len());
        for item in &task.item_ids {
            items.push(self.items.require(*item).await?);
        }
        let rider = match task.rider {
            Some(rider) => self.riders.get(rider).await?,
            None => None,
        };
        Ok(DeliveryTaskDetail { task, items, rider })
    }

    pub async fn populate_batch(&self, batch: DeliveryTasksBatch) -> Result<DeliveryTasksBatchDetail, DispatchError> {
        let rider = self
            .riders
            .get(batch.rider)
            .await?
            .ok_or(DispatchError::RiderNotFound(batch.rider))?;
        let mut tasks = Vec::with_capacity(batch.tasks.len());
        for id in batch.task_ids() {
            let task = self
                .deliveries
                .get(id)
                .await?
                .ok_or(DispatchError::TaskNotFound(id))?;
            tasks.push(self.populate_task(task).await?);
        }
        Ok(DeliveryTasksBatchDetail { batch, rider, tasks })
    }

    async fn require_task(&self, id: DeliveryTaskId) -> Result<DeliveryTask, DispatchError> {
        self.deliveries
            .get(id)
            .await?
            .ok_or(DispatchError::TaskNotFound(id))
    }

    /// Fetches a task that must be an undispatched task of the given type.
    async fn require_dispatchable(
        &self,
        id: DeliveryTaskId,
        expected: DeliveryType,
    ) -> Result<DeliveryTask, DispatchError> {
        let task = self.require_task(id).await?;
        if task.status != DeliveryStatus::Undispatched {
            return Err(DispatchError::InvalidTaskStatus {
                task: id,
                status: task.status,
                expected: DeliveryStatus::Undispatched,
            });
        }
        if task.delivery_type() != expected {
            return Err(DispatchError::WrongDeliveryType {
                task: id,
                actual: task.delivery_type(),
                expected,
            });
        }
        Ok(task)
    }

    /// Returns tasks still in `dispatching` to `undispatched`.
    async fn revert_dispatch(&self, ids: &[DeliveryTaskId]) {
        for id in ids {
            match self.deliveries.get(*id).await {
                Ok(Some(task)) if task.status == DeliveryStatus::Dispatching => {
                    if let Err(e) = self.deliveries.abort_dispatch(*id).await {
                        warn!(task = %id, error = %e, "Failed to revert dispatch");
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(task = %id, error = %e, "Failed to look up task while reverting dispatch"),
            }
        }
    }

    /// Runs a planner on the blocking pool, bounded by the dispatch timeout.
    async fn run_planner<T, F>(&self, plan: F) -> Result<T, DispatchError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let limit = self.config.dispatch_timeout;
        match tokio::time::timeout(limit, tokio::task::spawn_blocking(plan)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(join)) => Err(DispatchError::PlannerFailed(join.to_string())),
            Err(_) => Err(DispatchError::Timeout(limit)),
        }
    }

    // =========================================================================
    // Morning dispatch
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn dispatch_delivery_tasks(
        &self,
        task_ids: &[DeliveryTaskId],
        rider_ids: &[RiderId],
    ) -> Result<DispatchOutcome, DispatchError> {
        self.dispatch_delivery_tasks_with(task_ids, rider_ids, plan_dispatch)
            .await
    }

    async fn dispatch_delivery_tasks_with(
        &self,
        task_ids: &[DeliveryTaskId],
        rider_ids: &[RiderId],
        planner: DispatchPlanner,
    ) -> Result<DispatchOutcome, DispatchError> {
        let _guard = self.dispatch_lock.lock().await;

        if task_ids.is_empty() {
            return Err(DispatchError::NoTasks);
        }
        if rider_ids.is_empty() {
            return Err(DispatchError::NoRiders);
        }
        if let Some(task) = find_duplicate(task_ids) {
            return Err(DispatchError::DuplicateTask(task));
        }
        if let Some(rider) = find_duplicate(rider_ids) {
            return Err(DispatchError::DuplicateRider(rider));
        }

        for id in task_ids {
            self.require_dispatchable(*id, DeliveryType::Delivery).await?;
        }
        let mut riders = Vec::with_capacity(rider_ids.len());
        for id in rider_ids {
            let rider = self
                .riders
                .get(*id)
                .await?
                .ok_or(DispatchError::RiderNotFound(*id))?;
            riders.push(rider);
        }

        let today = self.clock.today();
        let todays_batches = self.batches.list_for_day(today).await?;
        if let Some(batch) = todays_batches.iter().find(|b| rider_ids.contains(&b.rider)) {
            return Err(DispatchError::RiderAlreadyBatched(batch.rider));
        }

        let mut begun = Vec::with_capacity(task_ids.len());
        for id in task_ids {
            if let Err(e) = self.deliveries.begin_dispatch(*id).await {
                self.revert_dispatch(&begun).await;
                return Err(e.into());
            }
            begun.push(*id);
        }

        match self.plan_and_apply_dispatch(task_ids, &riders, planner).await {
            Ok(outcome) => {
                info!(
                    batches = outcome.batches.len(),
                    dispatched = outcome.dispatched.len(),
                    unassigned = outcome.unassigned.len(),
                    "Dispatch complete"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Dispatch failed, reverting tasks");
                self.revert_dispatch(task_ids).await;
                Err(e)
            }
        }
    }

    async fn plan_and_apply_dispatch(
        &self,
        task_ids: &[DeliveryTaskId],
        riders: &[Rider],
        planner: DispatchPlanner,
    ) -> Result<DispatchOutcome, DispatchError> {
        let start = day_start(self.clock.today(), self.config.day_start);

        let mut details = Vec::with_capacity(task_ids.len());
        let mut stops = Vec::with_capacity(task_ids.len());
        for id in task_ids {
            let detail = self.populate_task(self.require_task(*id).await?).await?;
            stops.push(DispatchStop::from_detail(&detail, start)?);
            details.push(detail);
        }
        let planner_riders = riders
            .iter()
            .map(DispatchRider::from_rider)
            .collect::<Result<Vec<_>, _>>()?;

        let problem = DispatchProblem {
            warehouse: self.config.warehouse,
            speed_kmh: self.config.rider_speed_kmh,
            stops,
            riders: planner_riders,
        };
        let plan = self.run_planner(move || planner(&problem)).await?;

        let mut outcome = DispatchOutcome {
            batches: Vec::with_capacity(plan.routes.len()),
            dispatched: Vec::new(),
            unassigned: plan.unassigned.clone(),
        };
        if let Err(e) = self.apply_plan(&plan, &details, &mut outcome).await {
            for batch in &outcome.batches {
                let tasks: Vec<_> = batch.task_ids().collect();
                self.discard_batch(batch.id, &tasks).await;
            }
            return Err(e);
        }
        Ok(outcome)
    }

    /// Creates one batch per route and aborts the unassigned tasks. Batches land in
    /// `outcome` as they are completed.
    async fn apply_plan(
        &self,
        plan: &DispatchPlan,
        details: &[DeliveryTaskDetail],
        outcome: &mut DispatchOutcome,
    ) -> Result<(), DispatchError> {
        for route in &plan.routes {
            let batch = self.apply_route(route, details).await?;
            info!(batch = %batch.id, rider = %route.rider, tasks = route.tasks.len(), "Batch created");
            outcome.dispatched.extend(route.tasks.iter().map(|task| DispatchedTask {
                delivery_task: *task,
                rider: route.rider,
            }));
            outcome.batches.push(batch);
        }

        for task in &plan.unassigned {
            warn!(task = %task, "No rider has room for task");
            self.deliveries.abort_dispatch(*task).await?;
        }
        Ok(())
    }

    /// Creates the rider's batch and confirms its tasks, or leaves nothing behind.
    async fn apply_route(
        &self,
        route: &RiderRoute,
        details: &[DeliveryTaskDetail],
    ) -> Result<DeliveryTasksBatch, DispatchError> {
        let batch_id = self
            .batches
            .create_batch(BatchCreate {
                rider: route.rider,
                date: self.clock.today(),
                task_ids: route.tasks.clone(),
                created_at: self.clock.now(),
            })
            .await?;

        match self.confirm_route(batch_id, route, details).await {
            Ok(batch) => Ok(batch),
            Err(e) => {
                self.discard_batch(batch_id, &route.tasks).await;
                Err(e)
            }
        }
    }

    async fn confirm_route(
        &self,
        batch_id: BatchId,
        route: &RiderRoute,
        details: &[DeliveryTaskDetail],
    ) -> Result<DeliveryTasksBatch, DispatchError> {
        let mut from = self.warehouse_location();
        for task in &route.tasks {
            let to = details
                .iter()
                .find(|d| d.id() == *task)
                .and_then(DeliveryTaskDetail::stop_location)
                .cloned()
                .ok_or(DispatchError::TaskNotFound(*task))?;
            let segment = straight_segment(&from, &to, self.config.rider_speed_kmh);
            self.set_route(*task, vec![segment]).await?;
            self.deliveries.confirm_dispatch(*task, route.rider).await?;
            from = to;
        }

        let batch = self
            .batches
            .get(batch_id)
            .await?
            .ok_or_else(|| BatchError::NotFound(batch_id.to_string()))?;
        Ok(batch)
    }

    /// Deletes a batch from a failed dispatch and recalls the tasks already confirmed into it.
    /// Tasks still in `dispatching` are left to `revert_dispatch`.
    async fn discard_batch(&self, batch: BatchId, tasks: &[DeliveryTaskId]) {
        if let Err(e) = self.batches.delete(batch).await {
            warn!(batch = %batch, error = %e, "Failed to delete batch of failed dispatch");
        }
        for id in tasks {
            match self.deliveries.get(*id).await {
                Ok(Some(task)) if task.status == DeliveryStatus::Dispatched => {
                    if let Err(e) = self.deliveries.recall_dispatch(*id).await {
                        warn!(task = %id, error = %e, "Failed to recall task");
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(task = %id, error = %e, "Failed to look up task while discarding batch"),
            }
        }
    }

    // =========================================================================
    // Dynamic pickups
    // =========================================================================

    /// Places pickups one at a time, in the given order. Stops at the first failure;
    /// pickups placed before it stay placed.
    #[instrument(skip(self))]
    pub async fn dispatch_pickup_tasks(
        &self,
        task_ids: &[DeliveryTaskId],
    ) -> Result<Vec<PickupAssignment>, DispatchError> {
        self.dispatch_pickup_tasks_with(task_ids, plan_pickup).await
    }

    async fn dispatch_pickup_tasks_with(
        &self,
        task_ids: &[DeliveryTaskId],
        planner: PickupPlanner,
    ) -> Result<Vec<PickupAssignment>, DispatchError> {
        let _guard = self.dispatch_lock.lock().await;
        if let Some(task) = find_duplicate(task_ids) {
            return Err(DispatchError::DuplicateTask(task));
        }

        let mut assignments = Vec::with_capacity(task_ids.len());
        for id in task_ids {
            self.require_dispatchable(*id, DeliveryType::Pickup).await?;
            self.deliveries.begin_dispatch(*id).await?;
            match self.place_pickup(*id, planner).await {
                Ok(assignment) => {
                    info!(
                        task = %id,
                        batch = %assignment.batch,
                        after_task_index = assignment.after_task_index,
                        "Pickup dispatched"
                    );
                    assignments.push(assignment);
                }
                Err(e) => {
                    warn!(task = %id, error = %e, "Pickup dispatch failed, reverting task");
                    self.revert_dispatch(&[*id]).await;
                    return Err(e);
                }
            }
        }
        Ok(assignments)
    }

    async fn place_pickup(
        &self,
        id: DeliveryTaskId,
        planner: PickupPlanner,
    ) -> Result<PickupAssignment, DispatchError> {
        let pickup = self.populate_task(self.require_task(id).await?).await?;
        let request = PickupRequest::from_detail(&pickup)?;
        let pickup_location = pickup
            .stop_location()
            .cloned()
            .ok_or(PlanningError::MissingLocation(id))?;

        let warehouse = self.config.warehouse;
        let mut running = Vec::new();
        let mut candidates = Vec::new();
        for batch in self.batches.list_for_day(self.clock.today()).await? {
            let detail = self.populate_batch(batch).await?;
            candidates.push(PickupCandidate::from_batch(&detail, warehouse)?);
            running.push(detail);
        }

        let problem = PickupProblem {
            pickup: request,
            candidates,
            now: self.clock.now(),
            speed_kmh: self.config.rider_speed_kmh,
        };
        let assignment = self
            .run_planner(move || planner(&problem))
            .await??
            .ok_or(DispatchError::NoPickupCandidate(id))?;

        let detail = running
            .iter()
            .find(|d| d.batch.id == assignment.batch)
            .ok_or(DispatchError::NoPickupCandidate(id))?;
        self.batches
            .insert_task(assignment.batch, id, assignment.after_task_index)
            .await?;

        if let Err(e) = self.route_and_confirm_pickup(id, &assignment, detail, &pickup_location).await {
            warn!(task = %id, batch = %assignment.batch, error = %e, "Removing pickup from batch");
            if let Err(cleanup) = self.batches.remove_task(assignment.batch, id).await {
                warn!(task = %id, batch = %assignment.batch, error = %cleanup, "Failed to remove pickup from batch");
            }
            return Err(e);
        }
        Ok(assignment)
    }

    /// Routes the pickup from the stop before it, re-routes the stop after it, and
    /// confirms the pickup. The stop after it gets its old route back if confirmation fails.
    async fn route_and_confirm_pickup(
        &self,
        id: DeliveryTaskId,
        assignment: &PickupAssignment,
        detail: &DeliveryTasksBatchDetail,
        pickup_location: &DeliveryLocation,
    ) -> Result<(), DispatchError> {
        let speed = self.config.rider_speed_kmh;
        if let Some(from) = detail
            .tasks
            .get(assignment.after_task_index)
            .and_then(DeliveryTaskDetail::stop_location)
        {
            self.set_route(id, vec![straight_segment(from, pickup_location, speed)])
                .await?;
        }

        let next = detail
            .tasks
            .get(assignment.after_task_index + 1)
            .and_then(|next| next.stop_location().map(|to| (next, to)));
        if let Some((next, to)) = next {
            self.set_route(next.id(), vec![straight_segment(pickup_location, to, speed)])
                .await?;
        }

        if let Err(e) = self.deliveries.confirm_dispatch(id, assignment.rider).await {
            if let Some((next, _)) = next {
                if let Err(cleanup) = self.set_route(next.id(), next.task.delivery_route.clone()).await {
                    warn!(task = %next.id(), error = %cleanup, "Failed to restore route");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }

    async fn set_route(
        &self,
        task: DeliveryTaskId,
        route: Vec<RouteSegment>,
    ) -> Result<(), DispatchError> {
        self.deliveries
            .update_task(
                task,
                DeliveryTaskUpdate {
                    delivery_route: Some(route),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Rider workflow
    // =========================================================================

    /// Today's batch for `rider`, populated and checked against the task order rules.
    #[instrument(skip(self))]
    pub async fn batch_for_rider(&self, rider: RiderId) -> Result<DeliveryTasksBatchDetail, DispatchError> {
        let _guard = self.dispatch_lock.lock().await;
        if self.riders.get(rider).await?.is_none() {
            return Err(DispatchError::RiderNotFound(rider));
        }
        let batch = self
            .batches
            .find_for_rider(rider, self.clock.today())
            .await?
            .ok_or(DispatchError::NoBatchForRider(rider))?;
        let detail = self.populate_batch(batch).await?;
        detail.check_order()?;
        Ok(detail)
    }

    /// The single batch that lists `task`.
    pub async fn batch_containing_task(&self, task: DeliveryTaskId) -> Result<DeliveryTasksBatch, DispatchError> {
        let mut containing = self.batches.find_containing(task).await?;
        match containing.len() {
            0 => Err(DispatchError::TaskNotInBatch(task)),
            1 => Ok(containing.remove(0)),
            _ => Err(DispatchError::TaskInMultipleBatches(task)),
        }
    }

    /// Moves the current task of a batch forward. Completing it advances the batch.
    #[instrument(skip(self))]
    pub async fn update_task_status(
        &self,
        task: DeliveryTaskId,
        status: DeliveryStatus,
    ) -> Result<DeliveryTask, DispatchError> {
        let _guard = self.dispatch_lock.lock().await;

        if !matches!(status, DeliveryStatus::InProgress | DeliveryStatus::Completed) {
            return Err(DispatchError::UnsupportedStatus(status));
        }
        self.require_task(task).await?;
        let batch = self.batch_containing_task(task).await?;
        let current = batch.current_task();
        if current != Some(task) {
            return Err(DispatchError::NotCurrentTask { task, current });
        }

        let updated = self.deliveries.update_status(task, status).await?;
        if status == DeliveryStatus::Completed {
            let batch = self.batches.advance(batch.id).await?;
            info!(batch = %batch.id, current_task_index = batch.current_task_index, "Batch advanced");
        }
        info!(task = %task, status = %status, "Delivery status updated");
        Ok(updated)
    }

    /// Moves a task to the status after its current one.
    pub async fn advance_task_status(&self, task: DeliveryTaskId) -> Result<DeliveryTask, DispatchError> {
        let current = self.require_task(task).await?.status;
        let next = current.next().ok_or(DispatchError::UnsupportedStatus(current))?;
        self.update_task_status(task, next).await
    }

    // =========================================================================
    // Listings
    // =========================================================================

    async fn populate_all(&self, tasks: Vec<DeliveryTask>) -> Result<Vec<DeliveryTaskDetail>, DispatchError> {
        let mut details = Vec::with_capacity(tasks.len());
        for task in tasks {
            details.push(self.populate_task(task).await?);
        }
        Ok(details)
    }

    pub async fn list_tasks(&self) -> Result<Vec<DeliveryTaskDetail>, DispatchError> {
        let tasks = self.deliveries.list().await?;
        self.populate_all(tasks).await
    }

    pub async fn list_undispatched_tasks(&self) -> Result<Vec<DeliveryTaskDetail>, DispatchError> {
        let tasks = self.deliveries.list_undispatched().await?;
        self.populate_all(tasks).await
    }

    /// Tasks assigned to `rider` that are not completed.
    pub async fn tasks_for_rider(&self, rider: RiderId) -> Result<Vec<DeliveryTaskDetail>, DispatchError> {
        let tasks = self.deliveries.list_for_rider(rider).await?;
        self.populate_all(tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::delivery_actor::DeliveryError;
    use crate::lifecycle::WarehouseSystem;
    use crate::model::Coordinate;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    const PLANNER_LIMIT: Duration = Duration::from_millis(200);

    fn system() -> WarehouseSystem {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap()));
        let config = WarehouseConfig {
            dispatch_timeout: PLANNER_LIMIT,
            ..WarehouseConfig::default()
        };
        WarehouseSystem::new(config, clock)
    }

    fn rider(name: &str) -> RiderCreate {
        RiderCreate {
            name: name.to_string(),
            age: 28,
            bag_volume: 40.0,
            phone_number: format!("+91-{name}"),
        }
    }

    fn row(awb: &str, lat_offset: f64, hour: u32) -> (ItemCreate, DeliveryInformation) {
        let warehouse = WarehouseConfig::default().warehouse;
        (
            ItemCreate {
                name: awb.to_string(),
                description: format!("{awb} parcel"),
                item_location: None,
            },
            DeliveryInformation {
                expected_delivery_time: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
                delivery_type: DeliveryType::Delivery,
                awb_id: awb.to_string(),
                delivery_location: DeliveryLocation::new(
                    format!("{awb} address"),
                    Coordinate::new(warehouse.latitude + lat_offset, warehouse.longitude),
                ),
            },
        )
    }

    async fn delivery(service: &DispatchService, awb: &str, lat_offset: f64, hour: u32) -> DeliveryTaskId {
        let (item, info) = row(awb, lat_offset, hour);
        let created = service.create_item_and_delivery_task(item, info).await.unwrap();
        service.scan_item(created.item, 1.0, 5.0).await.unwrap();
        created.task
    }

    async fn pickup(service: &DispatchService, awb: &str, lat_offset: f64, hour: u32) -> DeliveryTaskId {
        let (item, info) = row(awb, lat_offset, hour);
        let created = service.create_pickup_task(item, info).await.unwrap();
        service.scan_item(created.item, 0.5, 2.0).await.unwrap();
        created.task
    }

    fn slow_dispatch(problem: &DispatchProblem) -> DispatchPlan {
        std::thread::sleep(PLANNER_LIMIT * 5);
        plan_dispatch(problem)
    }

    fn slow_pickup(problem: &PickupProblem) -> Result<Option<PickupAssignment>, PlanningError> {
        std::thread::sleep(PLANNER_LIMIT * 5);
        plan_pickup(problem)
    }

    /// Appends a task nobody asked for to the last route, so applying that route fails
    /// after its batch exists.
    fn dispatch_with_unknown_task(problem: &DispatchProblem) -> DispatchPlan {
        let mut plan = plan_dispatch(problem);
        if let Some(route) = plan.routes.last_mut() {
            route.tasks.push(DeliveryTaskId(999));
        }
        plan
    }

    #[tokio::test]
    async fn test_dispatch_timeout_reverts_tasks() {
        let system = system();
        let service = &system.dispatch;
        let riders = service.upload_riders(vec![rider("Ravi")]).await.unwrap();
        let a = delivery(service, "A", 0.02, 9).await;

        let result = service
            .dispatch_delivery_tasks_with(&[a], &riders, slow_dispatch)
            .await;
        assert_eq!(result, Err(DispatchError::Timeout(PLANNER_LIMIT)));

        let task = service.require_task(a).await.unwrap();
        assert_eq!(task.status, DeliveryStatus::Undispatched);
        assert!(system.batch_client.list().await.unwrap().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_pickup_timeout_leaves_batch_untouched() {
        let system = system();
        let service = &system.dispatch;
        let riders = service.upload_riders(vec![rider("Ravi")]).await.unwrap();
        let a = delivery(service, "A", 0.02, 9).await;
        let c = delivery(service, "C", 0.03, 11).await;
        let outcome = service.dispatch_delivery_tasks(&[a, c], &riders).await.unwrap();
        let p = pickup(service, "P", 0.025, 12).await;

        let result = service.dispatch_pickup_tasks_with(&[p], slow_pickup).await;
        assert_eq!(result, Err(DispatchError::Timeout(PLANNER_LIMIT)));

        assert_eq!(service.require_task(p).await.unwrap().status, DeliveryStatus::Undispatched);
        let batch = system.batch_client.get(outcome.batches[0].id).await.unwrap().unwrap();
        assert_eq!(batch.task_ids().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(batch.version, 0);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_route_discards_every_batch() {
        let system = system();
        let service = &system.dispatch;
        let riders = service
            .upload_riders(vec![rider("Ravi"), rider("Meena")])
            .await
            .unwrap();
        let a = delivery(service, "A", 0.02, 9).await;
        let b = delivery(service, "B", -0.02, 10).await;

        let result = service
            .dispatch_delivery_tasks_with(&[a, b], &riders, dispatch_with_unknown_task)
            .await;
        assert_eq!(result, Err(DispatchError::TaskNotFound(DeliveryTaskId(999))));

        assert!(system.batch_client.list().await.unwrap().is_empty());
        for id in [a, b] {
            let task = service.require_task(id).await.unwrap();
            assert_eq!(task.status, DeliveryStatus::Undispatched);
            assert_eq!(task.rider, None);
            assert!(task.delivery_route.is_empty());
        }

        let outcome = service.dispatch_delivery_tasks(&[a, b], &riders).await.unwrap();
        assert_eq!(outcome.batches.len(), 2);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_pickup_confirmation_leaves_batch_as_it_was() {
        let system = system();
        let service = &system.dispatch;
        let riders = service.upload_riders(vec![rider("Ravi")]).await.unwrap();
        let a = delivery(service, "A", 0.02, 9).await;
        let c = delivery(service, "C", 0.03, 11).await;
        let outcome = service.dispatch_delivery_tasks(&[a, c], &riders).await.unwrap();
        let batch_id = outcome.batches[0].id;

        // Never moved to dispatching, so confirmation is refused after insertion.
        let p = pickup(service, "P", 0.025, 12).await;
        let result = service.place_pickup(p, plan_pickup).await;
        assert!(matches!(
            result,
            Err(DispatchError::Delivery(DeliveryError::InvalidTransition {
                from: DeliveryStatus::Undispatched,
                to: DeliveryStatus::Dispatched,
                ..
            }))
        ));

        let batch = system.batch_client.get(batch_id).await.unwrap().unwrap();
        assert_eq!(batch.task_ids().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(batch.version, 2);
        let task_c = service.require_task(c).await.unwrap();
        assert_eq!(task_c.delivery_route[0].instruction, "Head from A address to C address");

        system.shutdown().await.unwrap();
    }
}

// ABOUTME: State transition methods for the reimage workflow.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::time::Duration;

use chrono::Utc;

use crate::fog::{correlate, ImagingService};
use crate::power::PowerControl;
use crate::retry::{poll_until, PollError, PollOutcome, RetryPolicy};
use crate::ssh::Reachability;

use super::error::DeployError;
use super::machine::Reimage;
use super::state::{
    HostLocated, ImageAssigned, Initialized, PowerCycled, Ready, TaskCompleted, TaskScheduled,
};

impl<S> Reimage<S> {
    /// Internal helper to transition to a new state.
    fn transition<T>(self, state: T) -> Reimage<T> {
        Reimage {
            machine: self.machine,
            os: self.os,
            state,
        }
    }
}

// =============================================================================
// Initialized -> HostLocated
// =============================================================================

impl Reimage<Initialized> {
    /// Resolve the machine's short name to exactly one FOG host record.
    ///
    /// # Errors
    ///
    /// `DeployError::HostLookup` on zero or multiple matches, or any
    /// service failure. Fatal, never retried.
    #[must_use = "reimage state must be used"]
    pub async fn locate_host<F: ImagingService>(
        self,
        fog: &F,
    ) -> Result<Reimage<HostLocated>, DeployError> {
        let short = self.machine.short_name();
        let record = fog.find_host(short).await.map_err(|source| {
            DeployError::HostLookup {
                host: short.to_string(),
                source,
            }
        })?;
        tracing::info!(host = short, id = %record.id, "located host record");
        Ok(self.transition(HostLocated { host: record.id }))
    }
}

// =============================================================================
// HostLocated -> ImageAssigned
// =============================================================================

impl Reimage<HostLocated> {
    /// Find the image for the requested OS and point the host at it.
    ///
    /// Assignment is idempotent on the FOG side.
    ///
    /// # Errors
    ///
    /// `DeployError::ImageLookup`. A missing image is a configuration
    /// error, so this is fatal and never retried.
    #[must_use = "reimage state must be used"]
    pub async fn assign_image<F: ImagingService>(
        self,
        fog: &F,
    ) -> Result<Reimage<ImageAssigned>, DeployError> {
        let host = self.state.host;
        let wrap = |source| DeployError::ImageLookup {
            image_key: self.os.image_key(),
            source,
        };

        let image = match fog.find_image(&self.os).await {
            Ok(image) => image,
            Err(source) => return Err(wrap(source)),
        };
        if let Err(source) = fog.assign_image(host, image.id).await {
            return Err(wrap(source));
        }
        tracing::info!(%host, image = %image.id, key = %self.os.image_key(), "image assigned");
        Ok(self.transition(ImageAssigned {
            host,
            image: image.id,
        }))
    }
}

// =============================================================================
// ImageAssigned -> TaskScheduled
// =============================================================================

impl Reimage<ImageAssigned> {
    /// Schedule the deploy task, then immediately work out which entry in
    /// the active-task listing it became.
    ///
    /// FOG's schedule call returns no task id, so the id is recovered by
    /// [`correlate::match_scheduled_task`]: the first active task for this
    /// host created within `window` of now.
    ///
    /// # Errors
    ///
    /// `DeployError::Schedule` if scheduling or the follow-up listing
    /// fails; `DeployError::Correlation` if no active task qualifies.
    /// Both are fatal; waiting on an unknown task is not safe.
    #[must_use = "reimage state must be used"]
    pub async fn schedule<F: ImagingService>(
        self,
        fog: &F,
        window: Duration,
    ) -> Result<Reimage<TaskScheduled>, DeployError> {
        let host = self.state.host;
        let short = self.machine.short_name().to_string();
        let wrap = |source| DeployError::Schedule {
            host: short.clone(),
            source,
        };

        if let Err(source) = fog.schedule_deploy_task(host).await {
            return Err(wrap(source));
        }

        let tasks = match fog.list_active_tasks().await {
            Ok(tasks) => tasks,
            Err(source) => return Err(wrap(source)),
        };
        let now = Utc::now().naive_utc();
        let task = correlate::match_scheduled_task(&tasks, &short, now, window)
            .ok_or(DeployError::Correlation { host: short })?;

        tracing::info!(%host, %task, "deploy task scheduled and correlated");
        Ok(self.transition(TaskScheduled { host, task }))
    }
}

// =============================================================================
// TaskScheduled -> PowerCycled
// =============================================================================

impl Reimage<TaskScheduled> {
    /// Trigger power-off then power-on so the machine boots into imaging.
    ///
    /// Does not wait for the machine to come up: its hostname may not even
    /// resolve until the new image registers itself, so readiness is
    /// observed later through SSH.
    #[must_use = "reimage state must be used"]
    pub async fn power_cycle<P: PowerControl>(
        self,
        power: &P,
    ) -> Result<Reimage<PowerCycled>, DeployError> {
        let wrap = |source| DeployError::Power {
            host: self.machine.short_name().to_string(),
            source,
        };
        if let Err(source) = power.power_off().await {
            return Err(wrap(source));
        }
        if let Err(source) = power.power_on().await {
            return Err(wrap(source));
        }
        tracing::info!(machine = %self.machine, "power cycle triggered");
        let state = PowerCycled {
            host: self.state.host,
            task: self.state.task,
        };
        Ok(self.transition(state))
    }
}

// =============================================================================
// PowerCycled -> TaskCompleted
// =============================================================================

impl Reimage<PowerCycled> {
    /// Poll the active-task listing until our task drops out of it.
    ///
    /// Absence from the listing is FOG's only completion signal; it does
    /// not distinguish success from failure. Imaging takes minutes, hence
    /// the long-interval policy. A failing listing call aborts the wait
    /// immediately (`DeployError::Service`).
    ///
    /// # Errors
    ///
    /// `DeployError::TaskTimedOut` when the poll budget runs out.
    #[must_use = "reimage state must be used"]
    pub async fn await_task<F: ImagingService>(
        self,
        fog: &F,
        policy: RetryPolicy,
    ) -> Result<Reimage<TaskCompleted>, DeployError> {
        let task = self.state.task;
        let result = poll_until("deploy task completion", policy, |_attempt| async move {
            let tasks = fog.list_active_tasks().await?;
            if tasks.iter().any(|t| t.id == task) {
                Ok(PollOutcome::Pending)
            } else {
                Ok(PollOutcome::Ready(()))
            }
        })
        .await;

        match result {
            Ok(()) => {
                tracing::info!(%task, "deploy task finished");
                let state = TaskCompleted {
                    host: self.state.host,
                };
                Ok(self.transition(state))
            }
            Err(PollError::Exhausted { attempts, .. }) => {
                Err(DeployError::TaskTimedOut { task, attempts })
            }
            Err(PollError::Check(source)) => Err(DeployError::Service(source)),
        }
    }
}

// =============================================================================
// TaskCompleted -> Ready
// =============================================================================

impl Reimage<TaskCompleted> {
    /// Poll until a management connection to the machine succeeds.
    ///
    /// Failures on the transient allow-list (connection refused or
    /// unroutable, connect timeout, the authentication race while the
    /// machine finishes provisioning) count as "not ready yet" and are
    /// never surfaced; anything else aborts the wait immediately.
    ///
    /// # Errors
    ///
    /// `DeployError::ReachabilityTimedOut` when the probe budget runs out,
    /// `DeployError::Unreachable` on a non-transient SSH failure.
    #[must_use = "reimage state must be used"]
    pub async fn await_reachable<R: Reachability>(
        self,
        probe: &R,
        policy: RetryPolicy,
    ) -> Result<Reimage<Ready>, DeployError> {
        let result = poll_until("machine reachability", policy, |attempt| async move {
            match probe.probe().await {
                Ok(()) => Ok(PollOutcome::Ready(())),
                Err(err) if err.is_transient() => {
                    tracing::debug!(attempt, %err, "machine not reachable yet");
                    Ok(PollOutcome::Pending)
                }
                Err(err) => Err(err),
            }
        })
        .await;

        match result {
            Ok(()) => {
                tracing::info!(machine = %self.machine, "machine reachable under new image");
                let state = Ready {
                    host: self.state.host,
                };
                Ok(self.transition(state))
            }
            Err(PollError::Exhausted { attempts, .. }) => Err(DeployError::ReachabilityTimedOut {
                host: self.machine.canonical().to_string(),
                attempts,
            }),
            Err(PollError::Check(source)) => Err(DeployError::Unreachable {
                host: self.machine.canonical().to_string(),
                source,
            }),
        }
    }
}

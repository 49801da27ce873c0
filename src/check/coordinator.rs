//! Orchestration of a single update check

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::join;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::check::diagnostics::{DiagnosticHook, Flow};
use crate::config::CheckerConfig;
use crate::host::prompt::{Prompt, PromptAction, PromptPresenter, UrlOpener};
use crate::host::strings::{
    BUTTON_LATER, BUTTON_OK, BUTTON_UPDATE, StringLookup, UPDATE_BODY, UPDATE_TITLE, resolve,
};
use crate::launch::store::FlagStore;
use crate::launch::tracker::FirstLaunchTracker;
use crate::version::cache::MetadataCache;
use crate::version::compare::compare_versions;
use crate::version::error::{CheckError, FetchError};
use crate::version::metadata::MetadataProvider;
use crate::version::policy::{CheckOutcome, evaluate};
use crate::version::providers::{AppStoreProvider, HttpRequirementProvider};
use crate::version::requirement::{RequirementProvider, UpdateRequirement};

/// Everything the coordinator talks to outside the decision logic
#[derive(Clone)]
pub struct Collaborators {
    pub metadata_provider: Arc<dyn MetadataProvider>,
    /// Used only when a requirement URL is configured
    pub requirement_provider: Option<Arc<dyn RequirementProvider>>,
    pub tracker: Arc<FirstLaunchTracker>,
    pub presenter: Arc<dyn PromptPresenter>,
    pub url_opener: Arc<dyn UrlOpener>,
    pub strings: Arc<dyn StringLookup>,
    pub diagnostics: Option<Arc<dyn DiagnosticHook>>,
}

impl Collaborators {
    /// Collaborators that query the App Store and fetch requirements over HTTP
    pub fn for_app_store(
        config: &CheckerConfig,
        flag_store: Arc<dyn FlagStore>,
        presenter: Arc<dyn PromptPresenter>,
        url_opener: Arc<dyn UrlOpener>,
        strings: Arc<dyn StringLookup>,
    ) -> Result<Self, FetchError> {
        let timeout = config.fetch_timeout();
        Ok(Self {
            metadata_provider: Arc::new(AppStoreProvider::new(
                &config.store_base_url,
                &config.country,
                timeout,
            )?),
            requirement_provider: Some(Arc::new(HttpRequirementProvider::new(timeout)?)),
            tracker: Arc::new(FirstLaunchTracker::new(flag_store)),
            presenter,
            url_opener,
            strings,
            diagnostics: None,
        })
    }
}

/// Result of the release-notes flow
#[derive(Debug)]
pub enum ReleaseNotesOutcome {
    /// Notes for the installed version were already acknowledged
    NotFirstLaunch,
    /// The store release is not the installed version, or it has no notes
    NoMatchingNotes,
    /// Notes were presented; `acknowledged` is false when dismissed without a choice
    Shown { acknowledged: bool },
    Failed(CheckError),
}

/// Result of the required-version flow
#[derive(Debug)]
pub enum RequiredVersionOutcome {
    Evaluated {
        requirement: UpdateRequirement,
        outcome: CheckOutcome,
        /// The user chose the update action
        update_accepted: bool,
    },
    Failed(CheckError),
}

impl RequiredVersionOutcome {
    pub fn should_prompt(&self) -> bool {
        match self {
            Self::Evaluated { outcome, .. } => outcome.should_prompt,
            Self::Failed(_) => false,
        }
    }
}

/// What happened during one check cycle
#[derive(Debug)]
pub enum CycleReport {
    Completed {
        release_notes: ReleaseNotesOutcome,
        required_version: RequiredVersionOutcome,
        /// Metadata fetches started during the cycle (at most one)
        metadata_fetches: usize,
    },
    /// The coordinator was shut down before the cycle finished
    Cancelled,
}

/// Runs update checks for one installed app.
///
/// Owned by the host application; clones share configuration, collaborators
/// and the shutdown token.
#[derive(Clone)]
pub struct CheckCoordinator {
    inner: Arc<Inner>,
    shutdown: CancellationToken,
}

struct Inner {
    config: CheckerConfig,
    collaborators: Collaborators,
}

impl CheckCoordinator {
    pub fn new(config: CheckerConfig, collaborators: Collaborators) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                collaborators,
            }),
            shutdown: CancellationToken::new(),
        }
    }

    /// Start a check cycle in the background.
    ///
    /// Must be called from within a tokio runtime. Failures are logged and
    /// reported to the diagnostic hook; they never reach the caller.
    pub fn check(&self) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let report = coordinator.run_cycle().await;
            debug!("Check cycle finished: {:?}", report);
        });
    }

    /// Cancel the running cycle and any later ones.
    ///
    /// Pending fetches and prompts are dropped without side effects.
    pub fn shutdown(&self) {
        info!("Shutting down update checks");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Run one check cycle to completion and report each flow's outcome
    pub async fn run_cycle(&self) -> CycleReport {
        let token = self.shutdown.child_token();
        if token.is_cancelled() {
            return CycleReport::Cancelled;
        }

        let config = &self.inner.config;
        info!(
            "Checking for updates of installed version {}",
            config.installed_version
        );

        let query = match config.metadata_query() {
            Ok(query) => query,
            Err(e) => {
                self.report(Flow::ReleaseNotes, &e.clone().into());
                self.report(Flow::RequiredVersion, &e.clone().into());
                return CycleReport::Completed {
                    release_notes: ReleaseNotesOutcome::Failed(e.clone().into()),
                    required_version: RequiredVersionOutcome::Failed(e.into()),
                    metadata_fetches: 0,
                };
            }
        };

        let cache = MetadataCache::new(
            self.inner.collaborators.metadata_provider.clone(),
            query,
        );
        let flows = join(
            self.release_notes_flow(&cache),
            self.required_version_flow(&cache),
        );

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Update check cancelled");
                CycleReport::Cancelled
            }
            (release_notes, required_version) = flows => CycleReport::Completed {
                release_notes,
                required_version,
                metadata_fetches: cache.fetch_count(),
            },
        }
    }

    async fn release_notes_flow(&self, cache: &MetadataCache) -> ReleaseNotesOutcome {
        let collaborators = &self.inner.collaborators;
        let installed = self.inner.config.installed_version.as_str();

        match collaborators
            .tracker
            .clone()
            .is_first_launch_blocking(installed.to_string())
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                debug!("Release notes for {} already acknowledged", installed);
                return ReleaseNotesOutcome::NotFirstLaunch;
            }
            Err(e) => return self.fail_release_notes(e.into()),
        }

        let metadata = match cache.get_metadata().await {
            Ok(metadata) => metadata,
            Err(e) => return self.fail_release_notes(e.into()),
        };

        if compare_versions(&metadata.store_version, installed) != Ordering::Equal
            || metadata.release_notes.is_empty()
        {
            debug!(
                "No release notes to show: store version {}, installed {}",
                metadata.store_version, installed
            );
            return ReleaseNotesOutcome::NoMatchingNotes;
        }

        let prompt = Prompt {
            title: installed.to_string(),
            message: metadata.release_notes,
            actions: vec![PromptAction::default_action(
                collaborators.strings.string(BUTTON_OK),
            )],
        };

        if collaborators.presenter.show_prompt(prompt).await.is_none() {
            info!("Release notes for {} dismissed without acknowledgement", installed);
            return ReleaseNotesOutcome::Shown {
                acknowledged: false,
            };
        }

        match collaborators
            .tracker
            .clone()
            .mark_launched_blocking(installed.to_string())
            .await
        {
            Ok(()) => ReleaseNotesOutcome::Shown { acknowledged: true },
            Err(e) => self.fail_release_notes(e.into()),
        }
    }

    async fn required_version_flow(&self, cache: &MetadataCache) -> RequiredVersionOutcome {
        let installed = self.inner.config.installed_version.as_str();
        let requirement = match self.resolve_requirement().await {
            Ok(requirement) => requirement,
            Err(error) => {
                self.report(Flow::RequiredVersion, &error);
                return RequiredVersionOutcome::Failed(error);
            }
        };

        let metadata = match cache.get_metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                let error: CheckError = e.into();
                self.report(Flow::RequiredVersion, &error);
                return RequiredVersionOutcome::Failed(error);
            }
        };

        let outcome = evaluate(installed, &requirement, Some(&metadata));
        info!(
            "Installed {}, required {}, store {}: prompt={} optional={}",
            installed,
            requirement.min_version,
            metadata.store_version,
            outcome.should_prompt,
            outcome.optional
        );

        let update_accepted = if outcome.should_prompt {
            self.prompt_update(&outcome).await
        } else {
            false
        };

        RequiredVersionOutcome::Evaluated {
            requirement,
            outcome,
            update_accepted,
        }
    }

    /// Requirement from the configured source.
    ///
    /// Falls back to the default when no source is configured, the URL is
    /// malformed, or the document is missing a key. Transport failures and
    /// missing documents end the flow.
    async fn resolve_requirement(&self) -> Result<UpdateRequirement, CheckError> {
        let installed = self.inner.config.installed_version.as_str();
        let default = || UpdateRequirement::default_for(installed);

        let url = match self.inner.config.requirement_url() {
            Ok(Some(url)) => url,
            Ok(None) => return Ok(default()),
            Err(e) => {
                self.report(Flow::RequiredVersion, &e.into());
                return Ok(default());
            }
        };

        let Some(provider) = &self.inner.collaborators.requirement_provider else {
            warn!(
                "Requirement URL {} configured without a requirement provider",
                url
            );
            return Ok(default());
        };

        match provider.fetch(&url).await {
            Ok(requirement) => Ok(requirement),
            Err(e @ FetchError::Parse(_)) => {
                self.report(Flow::RequiredVersion, &e.into());
                Ok(default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Show the update prompt; returns whether the user chose to update
    async fn prompt_update(&self, outcome: &CheckOutcome) -> bool {
        let collaborators = &self.inner.collaborators;
        let config = &self.inner.config;
        let strings = collaborators.strings.as_ref();

        let mut actions = Vec::with_capacity(2);
        if outcome.optional {
            actions.push(PromptAction::cancel(strings.string(BUTTON_LATER)));
        }
        actions.push(PromptAction::default_action(strings.string(BUTTON_UPDATE)));
        let update_index = actions.len() - 1;

        let prompt = Prompt {
            title: resolve(&config.alert_title, UPDATE_TITLE, strings),
            message: resolve(&config.alert_body, UPDATE_BODY, strings),
            actions,
        };

        if collaborators.presenter.show_prompt(prompt).await != Some(update_index) {
            debug!("Update prompt declined");
            return false;
        }

        if let Some(url) = &outcome.store_url {
            if !collaborators.url_opener.open(url) {
                warn!("No handler available for store URL {}", url);
            }
        }
        true
    }

    fn fail_release_notes(&self, error: CheckError) -> ReleaseNotesOutcome {
        self.report(Flow::ReleaseNotes, &error);
        ReleaseNotesOutcome::Failed(error)
    }

    fn report(&self, flow: Flow, error: &CheckError) {
        warn!("Update check flow {} failed: {}", flow, error);
        if let Some(hook) = &self.inner.collaborators.diagnostics {
            hook.on_failure(flow, error);
        }
    }
}

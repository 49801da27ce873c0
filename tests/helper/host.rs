//! Host collaborator test utilities

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use app_version_checker::check::coordinator::{CheckCoordinator, Collaborators};
use app_version_checker::check::diagnostics::{DiagnosticHook, Flow};
use app_version_checker::config::CheckerConfig;
use app_version_checker::host::prompt::{Prompt, PromptPresenter, UrlOpener};
use app_version_checker::host::strings::BundledStrings;
use app_version_checker::launch::store::MemoryFlagStore;
use app_version_checker::launch::tracker::FirstLaunchTracker;
use app_version_checker::version::error::CheckError;
use app_version_checker::version::metadata::MetadataProvider;
use app_version_checker::version::requirement::RequirementProvider;

/// How the scripted user answers prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Pick the default action
    Default,
    /// Pick the cancel action (falls back to dismissing)
    Cancel,
    /// Close the prompt without choosing
    Dismiss,
    /// Never answer
    Hang,
}

/// Presenter that records prompts and answers them the same way every time
pub struct ScriptedPresenter {
    answer: Answer,
    shown: Mutex<Vec<Prompt>>,
    tx: mpsc::UnboundedSender<Prompt>,
}

impl ScriptedPresenter {
    pub fn new(answer: Answer) -> (Self, mpsc::UnboundedReceiver<Prompt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                answer,
                shown: Mutex::new(Vec::new()),
                tx,
            },
            rx,
        )
    }

    pub fn shown(&self) -> Vec<Prompt> {
        self.shown.lock().unwrap().clone()
    }

    /// Prompt whose title matches, if it was shown
    pub fn find(&self, title: &str) -> Option<Prompt> {
        self.shown().into_iter().find(|p| p.title == title)
    }
}

#[async_trait]
impl PromptPresenter for ScriptedPresenter {
    async fn show_prompt(&self, prompt: Prompt) -> Option<usize> {
        self.shown.lock().unwrap().push(prompt.clone());
        let _ = self.tx.send(prompt.clone());

        match self.answer {
            Answer::Default => prompt.default_index(),
            Answer::Cancel => prompt.cancel_index(),
            Answer::Dismiss => None,
            Answer::Hang => std::future::pending().await,
        }
    }
}

/// URL opener that records every URL
pub struct RecordingOpener {
    handled: bool,
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new(handled: bool) -> Self {
        Self {
            handled,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> bool {
        self.opened.lock().unwrap().push(url.to_string());
        self.handled
    }
}

/// Diagnostic hook that collects failures
#[derive(Default)]
pub struct CollectingDiagnostics {
    failures: Mutex<Vec<(Flow, String)>>,
}

impl CollectingDiagnostics {
    pub fn failures(&self) -> Vec<(Flow, String)> {
        self.failures.lock().unwrap().clone()
    }
}

impl DiagnosticHook for CollectingDiagnostics {
    fn on_failure(&self, flow: Flow, error: &CheckError) {
        self.failures.lock().unwrap().push((flow, error.to_string()));
    }
}

/// Handles to the fakes wired into a test coordinator
pub struct TestHarness {
    pub coordinator: CheckCoordinator,
    pub tracker: Arc<FirstLaunchTracker>,
    pub presenter: Arc<ScriptedPresenter>,
    pub prompts: mpsc::UnboundedReceiver<Prompt>,
    pub opener: Arc<RecordingOpener>,
    pub diagnostics: Arc<CollectingDiagnostics>,
}

/// Config for an app looked up by id
pub fn test_config(installed_version: &str) -> CheckerConfig {
    CheckerConfig {
        app_id: Some("123".to_string()),
        installed_version: installed_version.to_string(),
        ..Default::default()
    }
}

/// Build a coordinator over in-memory fakes
pub fn create_test_coordinator(
    config: CheckerConfig,
    metadata_provider: Arc<dyn MetadataProvider>,
    requirement_provider: Option<Arc<dyn RequirementProvider>>,
    answer: Answer,
) -> TestHarness {
    let tracker = Arc::new(FirstLaunchTracker::new(Arc::new(MemoryFlagStore::new())));
    let (presenter, prompts) = ScriptedPresenter::new(answer);
    let presenter = Arc::new(presenter);
    let opener = Arc::new(RecordingOpener::new(true));
    let diagnostics = Arc::new(CollectingDiagnostics::default());

    let collaborators = Collaborators {
        metadata_provider,
        requirement_provider,
        tracker: tracker.clone(),
        presenter: presenter.clone(),
        url_opener: opener.clone(),
        strings: Arc::new(BundledStrings::for_locale(&config.locale)),
        diagnostics: Some(diagnostics.clone()),
    };

    TestHarness {
        coordinator: CheckCoordinator::new(config, collaborators),
        tracker,
        presenter,
        prompts,
        opener,
        diagnostics,
    }
}

/// Wait for the next prompt to be shown
pub async fn wait_for_prompt(rx: &mut mpsc::UnboundedReceiver<Prompt>) -> Option<Prompt> {
    timeout(Duration::from_secs(5), rx.recv()).await.ok().flatten()
}

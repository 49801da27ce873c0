#[cfg(test)]
use mockall::automock;

/// A button offered by a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAction {
    pub label: String,
    /// Highlighted action, chosen when the user just confirms
    pub is_default: bool,
    /// Action that dismisses the prompt
    pub is_cancel: bool,
}

impl PromptAction {
    pub fn default_action(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_default: true,
            is_cancel: false,
        }
    }

    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_default: false,
            is_cancel: true,
        }
    }
}

/// An alert shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    /// Actions in display order
    pub actions: Vec<PromptAction>,
}

impl Prompt {
    /// Index of the default action, if any
    pub fn default_index(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.is_default)
    }

    /// Index of the cancel action, if any
    pub fn cancel_index(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.is_cancel)
    }
}

/// Trait for presenting prompts to the user
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PromptPresenter: Send + Sync {
    /// Show `prompt` and wait for the user.
    ///
    /// Returns the index of the chosen action, or `None` when the prompt was
    /// dismissed without a choice (e.g. the host window closed).
    async fn show_prompt(&self, prompt: Prompt) -> Option<usize>;
}

/// Trait for opening a store URL
#[cfg_attr(test, automock)]
pub trait UrlOpener: Send + Sync {
    /// Returns whether a handler existed for the URL
    fn open(&self, url: &str) -> bool;
}

//! Host collaborators: prompts, URL opening and localized strings
//!
//! The check coordinator never touches a UI toolkit directly; it talks to
//! the host application through the traits defined here.
//!
//! - [`prompt`]: Prompt model plus the `PromptPresenter` and `UrlOpener` traits
//! - [`strings`]: `StringLookup` trait and bundled string tables
//! - [`console`]: Terminal implementations used by the command-line host

pub mod console;
pub mod prompt;
pub mod strings;

//! Terminal prompt presenter and URL opener

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::host::prompt::{Prompt, PromptPresenter, UrlOpener};

/// Presents prompts on stdout and reads the choice from stdin
#[derive(Debug, Default)]
pub struct ConsolePresenter;

#[async_trait::async_trait]
impl PromptPresenter for ConsolePresenter {
    async fn show_prompt(&self, prompt: Prompt) -> Option<usize> {
        print!("{}", render(&prompt));
        let _ = std::io::stdout().flush();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                // stdin closed: treat as dismissal
                Ok(None) | Err(_) => return prompt.cancel_index(),
            };

            if let Some(choice) = parse_choice(&line, &prompt) {
                debug!("Console prompt choice: {}", choice);
                return Some(choice);
            }
            println!("Enter a number between 1 and {}", prompt.actions.len());
        }
    }
}

/// Prints the URL instead of launching a browser
#[derive(Debug, Default)]
pub struct ConsoleUrlOpener;

impl UrlOpener for ConsoleUrlOpener {
    fn open(&self, url: &str) -> bool {
        println!("Open {} to update", url);
        true
    }
}

fn render(prompt: &Prompt) -> String {
    let mut out = format!("\n== {} ==\n{}\n", prompt.title, prompt.message);
    for (i, action) in prompt.actions.iter().enumerate() {
        let marker = if action.is_default { " (default)" } else { "" };
        out.push_str(&format!("  [{}] {}{}\n", i + 1, action.label, marker));
    }
    out.push_str("> ");
    out
}

/// Parse a 1-based choice; an empty line picks the default action
fn parse_choice(input: &str, prompt: &Prompt) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return prompt.default_index();
    }

    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=prompt.actions.len()).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::prompt::PromptAction;
    use rstest::rstest;

    fn update_prompt() -> Prompt {
        Prompt {
            title: "Update Available".to_string(),
            message: "Please update".to_string(),
            actions: vec![PromptAction::cancel("Later"), PromptAction::default_action("Update")],
        }
    }

    #[rstest]
    #[case("1", Some(0))]
    #[case(" 2 ", Some(1))]
    #[case("", Some(1))] // default action
    #[case("3", None)]
    #[case("0", None)]
    #[case("update", None)]
    fn parse_choice_maps_input_to_action_index(
        #[case] input: &str,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(parse_choice(input, &update_prompt()), expected);
    }

    #[test]
    fn render_lists_actions_in_order() {
        let rendered = render(&update_prompt());

        assert!(rendered.contains("== Update Available =="));
        assert!(rendered.contains("[1] Later\n"));
        assert!(rendered.contains("[2] Update (default)\n"));
    }
}

use anyhow::Result;
use inquire::Confirm;

/// Deletion-gate strategy: picked once at startup so headless and
/// interactive runs share the same code path through the gate.
pub trait Gate {
    fn confirm(&self, folder_name: &str) -> Result<bool>;
}

/// Headless mode: every removable folder is confirmed.
pub struct AutoConfirm;

impl Gate for AutoConfirm {
    fn confirm(&self, _folder_name: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Interactive mode: ask per folder. Anything starting with a `y` (any
/// case) confirms; everything else, including just pressing enter,
/// declines.
pub struct Prompt;

impl Gate for Prompt {
    fn confirm(&self, folder_name: &str) -> Result<bool> {
        let answer = Confirm::new(&format!("Delete '{}'?", folder_name))
            .with_default(false)
            .with_parser(&|input| Ok(input.trim().to_lowercase().starts_with('y')))
            .prompt()?;
        Ok(answer)
    }
}

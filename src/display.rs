use spinoff::{Color, Spinner, spinners};
use std::io::IsTerminal;

/// Terminal feedback. A spinner when someone is watching, nothing otherwise.
pub struct Display {
    instance: Option<Spinner>,
}

impl Display {
    /// Attempts to create a spinner based on user preference and terminal capabilities.
    ///
    /// Auto-detecting the terminal keeps the spinner out of cron mails and pipes, so
    /// `--no-animate` is only needed for the odd interactive case.
    pub fn new(no_animate: bool) -> Self {
        if no_animate || !std::io::stdout().is_terminal() {
            return Display { instance: None };
        }

        Display {
            instance: Some(Spinner::new(spinners::Dots, "Starting", Color::Blue)),
        }
    }

    /// Whether a spinner owns the terminal right now.
    pub fn is_animated(&self) -> bool {
        self.instance.is_some()
    }

    pub fn update_text(&mut self, message: &'static str) {
        if let Some(spinner) = self.instance.as_mut() {
            spinner.update_text(message)
        }
    }

    /// Ends the spinner with a final line. Without a spinner the logs already said it.
    pub fn stop_with_message(&mut self, message: &str) {
        // Taken out so a second call, or the drop, finds nothing to stop.
        if let Some(mut spinner) = self.instance.take() {
            spinner.stop_with_message(message)
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        if let Some(s) = self.instance.as_mut() {
            // A failed run bails out with the spinner still going. Wipe it so the
            // error report starts on a clean line.
            s.stop_with_message("");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_animate_means_no_spinner() {
        let mut display = Display::new(true);

        assert!(!display.is_animated());

        // Both are no-ops without a spinner.
        display.update_text("Fetching");
        display.stop_with_message("done");
    }
}

//! Accumulated verification report and its console rendering.

/// Ordered info and error messages collected across the check phases.
///
/// The report is in an error state iff any error message was recorded;
/// rendering trusts that invariant and never re-derives pass/fail.
#[derive(Debug, Default)]
pub struct Report {
    info_messages: Vec<String>,
    error_messages: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.info_messages.push(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    /// Append another report's messages, preserving phase order.
    pub fn merge(&mut self, other: Report) {
        self.info_messages.extend(other.info_messages);
        self.error_messages.extend(other.error_messages);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    pub fn has_info(&self) -> bool {
        !self.info_messages.is_empty()
    }

    pub fn info_messages(&self) -> &[String] {
        &self.info_messages
    }

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Print the info block to stdout.
    pub fn print_info(&self) {
        println!("Info Messages:");
        println!();
        for message in &self.info_messages {
            println!("{}", message);
        }
        println!();
    }

    /// Print the error block to stderr.
    pub fn print_errors(&self) {
        eprintln!("Error Messages:");
        eprintln!();
        for message in &self.error_messages {
            eprintln!("{}", message);
        }
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_tracks_error_messages() {
        let mut report = Report::new();
        assert!(!report.has_errors());

        report.add_info("fine");
        assert!(!report.has_errors());

        report.add_error("broken");
        assert!(report.has_errors());
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first = Report::new();
        first.add_error("dir missing");

        let mut second = Report::new();
        second.add_error("file missing");
        second.add_info("file ok");

        first.merge(second);
        assert_eq!(first.error_messages(), ["dir missing", "file missing"]);
        assert_eq!(first.info_messages(), ["file ok"]);
    }
}

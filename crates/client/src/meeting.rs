/// First two `". "`-separated sentences of a transcript, ending with a period.
pub fn summarize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let summary = text.split(". ").take(2).collect::<Vec<_>>().join(". ");
    if summary.ends_with('.') {
        summary
    } else {
        summary + "."
    }
}

/// Up to two uppercase initials from the first words of a name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Live transcript plus the summaries saved during one meeting.
#[derive(Debug, Clone, Default)]
pub struct MeetingNotes {
    transcript: String,
    summary: String,
    saved: Vec<String>,
}

impl MeetingNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the transcript with the recognizer's latest best guess.
    pub fn update_transcript(&mut self, text: impl Into<String>) {
        self.transcript = text.into();
    }

    /// Ends transcription and summarizes what was heard.
    pub fn stop(&mut self) -> &str {
        self.summary = summarize(&self.transcript);
        &self.summary
    }

    pub fn save_note(&mut self) -> &str {
        if self.summary.is_empty() {
            self.summary = summarize(&self.transcript);
        }
        self.saved.push(self.summary.clone());
        &self.summary
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.summary.clear();
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn saved_notes(&self) -> &[String] {
        &self.saved
    }
}

use serde::{Deserialize, Serialize};

/// A trackable task as listed in the configuration file.
///
/// `option` is the category currently selected by the operator; it starts
/// out as `default_option` and is the only field that changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "jiraCode")]
    pub code: String,
    #[serde(default)]
    pub default_option: String,
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub summary: String,
}

impl Task {
    pub fn new(code: &str, default_option: &str, summary: &str) -> Self {
        Self {
            code: code.to_string(),
            default_option: default_option.to_string(),
            option: default_option.to_string(),
            summary: summary.to_string(),
        }
    }

    /// Fill the selected option from the default when the file left it empty.
    pub fn normalized(mut self) -> Self {
        if self.option.trim().is_empty() {
            self.option = self.default_option.clone();
        }
        self
    }

    pub fn select_option(&mut self, option: &str) {
        self.option = option.to_string();
    }

    /// Label used by the start control: `CODE SUMMARY > OPTION`.
    pub fn label(&self) -> String {
        format!("{} {} > {}", self.code, self.summary, self.option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_takes_default_option() {
        let t = Task {
            code: "ABC-1".into(),
            default_option: "dev".into(),
            option: String::new(),
            summary: "Write parser".into(),
        }
        .normalized();
        assert_eq!(t.option, "dev");
    }

    #[test]
    fn normalized_keeps_explicit_option() {
        let t = Task {
            code: "ABC-1".into(),
            default_option: "dev".into(),
            option: "review".into(),
            summary: String::new(),
        }
        .normalized();
        assert_eq!(t.option, "review");
    }

    #[test]
    fn label_reflects_selected_option() {
        let mut t = Task::new("ABC-1", "dev", "Write parser");
        assert_eq!(t.label(), "ABC-1 Write parser > dev");
        t.select_option("meeting");
        assert_eq!(t.label(), "ABC-1 Write parser > meeting");
    }
}

use crate::config::EnhanceConfig;

/// What the panel shows for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub title: String,
    pub description: String,
    pub meta: String,
}

impl SessionRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        meta: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            meta: meta.into(),
        }
    }

    /// Builds a record from whatever the step markup provided, filling gaps
    /// from the configured defaults. Empty title or meta text counts as a gap.
    pub fn from_markup(
        title: Option<String>,
        description: Option<String>,
        meta: Option<String>,
        config: &EnhanceConfig,
    ) -> Self {
        Self {
            title: non_empty(title).unwrap_or_else(|| config.default_title.clone()),
            description: description.unwrap_or_default(),
            meta: non_empty(meta).unwrap_or_else(|| config.default_meta.clone()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_META, DEFAULT_TITLE};

    #[test]
    fn markup_gaps_fall_back_to_defaults() {
        let config = EnhanceConfig::default();
        let record = SessionRecord::from_markup(None, None, None, &config);

        assert_eq!(record.title, DEFAULT_TITLE);
        assert_eq!(record.description, "");
        assert_eq!(record.meta, DEFAULT_META);
    }

    #[test]
    fn markup_values_win_over_defaults() {
        let config = EnhanceConfig::default();
        let record = SessionRecord::from_markup(
            Some("Deploy".to_string()),
            Some("Ship it to production".to_string()),
            Some("1 hour • Advanced".to_string()),
            &config,
        );

        assert_eq!(
            record,
            SessionRecord::new("Deploy", "Ship it to production", "1 hour • Advanced")
        );
    }

    #[test]
    fn empty_markup_text_falls_back_to_defaults() {
        let config = EnhanceConfig::default();
        let record = SessionRecord::from_markup(
            Some(String::new()),
            Some(String::new()),
            Some(String::new()),
            &config,
        );

        assert_eq!(record.title, DEFAULT_TITLE);
        assert_eq!(record.description, "");
        assert_eq!(record.meta, DEFAULT_META);
    }
}

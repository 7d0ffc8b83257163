//! Configuration for daily-retro
//!
//! Every value can come from a flag or an environment variable. [`Config`]
//! is what clap parses; [`Config::validate`] turns it into [`Settings`], with
//! required values checked and defaults resolved, before any I/O happens.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use retro_github::CommitWindow;

/// Default public API endpoints
pub mod endpoints {
    /// GitHub REST API
    pub const GITHUB: &str = "https://api.github.com";
    /// OpenAI API
    pub const OPENAI: &str = "https://api.openai.com/v1";
    /// Notion API
    pub const NOTION: &str = "https://api.notion.com/v1";
}

/// Default output directory for local reports
pub const DEFAULT_OUTPUT_DIR: &str = "./reflections";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Which summarizer writes the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SummarizerKind {
    /// Fixed Markdown template with per-repository statistics
    #[default]
    Template,
    /// Retrospective written by a chat model
    Llm,
}

impl fmt::Display for SummarizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Template => "template",
            Self::Llm => "llm",
        })
    }
}

/// Daily Retro - turn yesterday's GitHub commits into a retrospective
#[derive(Parser, Debug, Clone)]
#[command(name = "daily-retro")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub login whose commits are collected
    #[arg(long, env = "GITHUB_USERNAME")]
    pub github_username: Option<String>,

    /// Notion integration token
    ///
    /// Required with `--summarizer llm`. With the template summarizer the
    /// report is uploaded only when the database ID is set as well.
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion database the report page is created in
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,

    /// OpenAI API key (required with `--summarizer llm`)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// How the report is written
    #[arg(long, value_enum, env = "RETRO_SUMMARIZER", default_value_t = SummarizerKind::Template)]
    pub summarizer: SummarizerKind,

    /// Directory local reports are written to
    #[arg(long, env = "RETRO_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Day to report on (YYYY-MM-DD); defaults to yesterday, local time
    #[arg(long, env = "RETRO_DATE")]
    pub date: Option<NaiveDate>,

    /// Chat model used by the llm summarizer
    #[arg(long, env = "RETRO_OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature used by the llm summarizer
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Also write a local file with the llm summarizer
    ///
    /// The template summarizer always writes one.
    #[arg(long, default_value = "false")]
    pub write_local: bool,

    /// Notion title column (defaults depend on the summarizer)
    #[arg(long)]
    pub notion_title_property: Option<String>,

    /// Notion date column (defaults depend on the summarizer)
    #[arg(long)]
    pub notion_date_property: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = endpoints::GITHUB)]
    pub github_api_url: String,

    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_API_URL", default_value = endpoints::OPENAI)]
    pub openai_api_url: String,

    /// Notion API base URL
    #[arg(long, env = "NOTION_API_URL", default_value = endpoints::NOTION)]
    pub notion_api_url: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            github_username: None,
            notion_token: None,
            notion_database_id: None,
            openai_api_key: None,
            summarizer: SummarizerKind::Template,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            date: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            write_local: false,
            notion_title_property: None,
            notion_date_property: None,
            github_api_url: endpoints::GITHUB.to_string(),
            openai_api_url: endpoints::OPENAI.to_string(),
            notion_api_url: endpoints::NOTION.to_string(),
            verbose: false,
            quiet: false,
        }
    }
}

// ============================================================================
// Resolved settings
// ============================================================================

/// GitHub access
#[derive(Debug, Clone, PartialEq)]
pub struct GithubSettings {
    /// Access token
    pub token: String,
    /// Login commits are filtered by
    pub username: String,
    /// API base URL
    pub api_url: String,
}

/// Notion target
#[derive(Debug, Clone, PartialEq)]
pub struct NotionSettings {
    /// Integration token
    pub token: String,
    /// Database pages are created in
    pub database_id: String,
    /// API base URL
    pub api_url: String,
    /// Title column override
    pub title_property: Option<String>,
    /// Date column override
    pub date_property: Option<String>,
}

/// Resolved summarizer choice
#[derive(Debug, Clone, PartialEq)]
pub enum SummarizerSettings {
    /// Fixed template
    Template,
    /// Chat model
    Llm {
        /// OpenAI API key
        api_key: String,
        /// API base URL
        api_url: String,
        /// Model name
        model: String,
        /// Sampling temperature
        temperature: f32,
    },
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// GitHub access
    pub github: GithubSettings,
    /// Notion target, when uploads are enabled
    pub notion: Option<NotionSettings>,
    /// Summarizer
    pub summarizer: SummarizerSettings,
    /// Local report directory, when local files are written
    pub output_dir: Option<PathBuf>,
    /// Day the report covers
    pub date: NaiveDate,
}

impl Settings {
    /// Commit window for [`Settings::date`] in the local time zone
    #[must_use]
    pub fn window(&self) -> CommitWindow {
        CommitWindow::for_local_day(self.date)
    }
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// The day to report on: `--date`, or yesterday in local time
    #[must_use]
    pub fn report_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| CommitWindow::yesterday().date)
    }

    /// Check required values and resolve defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for the first required value that is
    /// absent or blank. GitHub token and username are always required; the
    /// OpenAI key and both Notion values are required with the llm
    /// summarizer. With the template summarizer the Notion values are set
    /// together or not at all.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let github = GithubSettings {
            token: required(&self.github_token, "GitHub token", "GITHUB_TOKEN")?,
            username: required(&self.github_username, "GitHub username", "GITHUB_USERNAME")?,
            api_url: self.github_api_url.clone(),
        };

        let (summarizer, notion, output_dir) = match self.summarizer {
            SummarizerKind::Template => {
                let notion = self.optional_notion()?;
                (
                    SummarizerSettings::Template,
                    notion,
                    Some(self.output_dir.clone()),
                )
            }
            SummarizerKind::Llm => {
                let api_key = required(&self.openai_api_key, "OpenAI API key", "OPENAI_API_KEY")?;
                let notion = NotionSettings {
                    token: required(&self.notion_token, "Notion token", "NOTION_TOKEN")?,
                    database_id: required(
                        &self.notion_database_id,
                        "Notion database ID",
                        "NOTION_DATABASE_ID",
                    )?,
                    api_url: self.notion_api_url.clone(),
                    title_property: self.notion_title_property.clone(),
                    date_property: self.notion_date_property.clone(),
                };
                let summarizer = SummarizerSettings::Llm {
                    api_key,
                    api_url: self.openai_api_url.clone(),
                    model: self.model.clone(),
                    temperature: self.temperature,
                };
                let output_dir = self.write_local.then(|| self.output_dir.clone());
                (summarizer, Some(notion), output_dir)
            }
        };

        Ok(Settings {
            github,
            notion,
            summarizer,
            output_dir,
            date: self.report_date(),
        })
    }

    /// Notion settings for the template summarizer. Neither value disables
    /// the upload; only one of them is a configuration error.
    fn optional_notion(&self) -> Result<Option<NotionSettings>, ConfigError> {
        let token = present(&self.notion_token);
        let database_id = present(&self.notion_database_id);
        match (token, database_id) {
            (None, None) => Ok(None),
            (Some(token), Some(database_id)) => Ok(Some(NotionSettings {
                token: token.to_string(),
                database_id: database_id.to_string(),
                api_url: self.notion_api_url.clone(),
                title_property: self.notion_title_property.clone(),
                date_property: self.notion_date_property.clone(),
            })),
            (None, Some(_)) => Err(ConfigError::Missing {
                name: "Notion token",
                env: "NOTION_TOKEN",
            }),
            (Some(_), None) => Err(ConfigError::Missing {
                name: "Notion database ID",
                env: "NOTION_DATABASE_ID",
            }),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required(
    value: &Option<String>,
    name: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    present(value)
        .map(str::to_string)
        .ok_or(ConfigError::Missing { name, env })
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required value was not provided
    #[error("{name} is required (set {env} or pass the matching flag)")]
    Missing {
        /// Human readable name of the value
        name: &'static str,
        /// Environment variable that provides it
        env: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn base() -> Config {
        Config {
            github_token: Some("ghp_test".to_string()),
            github_username: Some("octocat".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 1, 16),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.summarizer, SummarizerKind::Template);
        assert_eq!(config.output_dir, PathBuf::from("./reflections"));
        assert_eq!(config.model, "gpt-4");
        assert!(!config.write_local);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
        let verbose = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);
        let quiet = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(quiet.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_missing_github_token() {
        let config = Config {
            github_token: None,
            ..base()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                name: "GitHub token",
                env: "GITHUB_TOKEN"
            })
        );
    }

    #[test]
    fn test_blank_username_counts_as_missing() {
        let config = Config {
            github_username: Some("  ".to_string()),
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                env: "GITHUB_USERNAME",
                ..
            })
        ));
    }

    #[test]
    fn test_template_without_notion() {
        let settings = base().validate().unwrap();
        assert_eq!(settings.summarizer, SummarizerSettings::Template);
        assert!(settings.notion.is_none());
        assert_eq!(settings.output_dir, Some(PathBuf::from("./reflections")));
        assert_eq!(settings.date, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
    }

    #[test]
    fn test_template_partial_notion_is_rejected() {
        let config = Config {
            notion_token: Some("secret".to_string()),
            ..base()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                name: "Notion database ID",
                env: "NOTION_DATABASE_ID"
            })
        );

        let config = Config {
            notion_database_id: Some("db".to_string()),
            ..base()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                name: "Notion token",
                env: "NOTION_TOKEN"
            })
        );
    }

    #[test]
    fn test_template_full_notion() {
        let config = Config {
            notion_token: Some("secret".to_string()),
            notion_database_id: Some("db".to_string()),
            ..base()
        };
        let notion = config.validate().unwrap().notion.unwrap();
        assert_eq!(notion.database_id, "db");
        assert_eq!(notion.api_url, endpoints::NOTION);
    }

    #[test]
    fn test_llm_requires_openai_and_notion() {
        let config = Config {
            summarizer: SummarizerKind::Llm,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                env: "OPENAI_API_KEY",
                ..
            })
        ));

        let config = Config {
            summarizer: SummarizerKind::Llm,
            openai_api_key: Some("sk".to_string()),
            notion_token: Some("secret".to_string()),
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                env: "NOTION_DATABASE_ID",
                ..
            })
        ));
    }

    #[test]
    fn test_llm_settings() {
        let config = Config {
            summarizer: SummarizerKind::Llm,
            openai_api_key: Some("sk".to_string()),
            notion_token: Some("secret".to_string()),
            notion_database_id: Some("db".to_string()),
            ..base()
        };
        let settings = config.validate().unwrap();
        assert!(settings.output_dir.is_none());
        assert!(settings.notion.is_some());
        match settings.summarizer {
            SummarizerSettings::Llm {
                model, temperature, ..
            } => {
                assert_eq!(model, "gpt-4");
                assert!((temperature - 0.7).abs() < f32::EPSILON);
            }
            other => panic!("unexpected summarizer: {other:?}"),
        }

        let with_local = Config {
            write_local: true,
            ..config
        };
        assert!(with_local.validate().unwrap().output_dir.is_some());
    }

    #[test]
    fn test_report_date_defaults_to_yesterday() {
        let config = Config::default();
        assert_eq!(config.report_date(), CommitWindow::yesterday().date);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}

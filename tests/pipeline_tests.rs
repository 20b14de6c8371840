//! End-to-end pipeline tests against scripted `gh` responses

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use ghcontrib::config::{PipelineConfig, Token};
    use ghcontrib::error::ContribError;
    use ghcontrib::operations::{ChartDataset, PieRenderer};
    use ghcontrib::run_pipeline;
    use ghcontrib::source::GhCliSource;
    use ghcontrib::system::{CommandOutput, MockSystem};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const CONTRIBUTORS_FILE: &str = "/work/apache_cassandra_contributors_20240115.json";
    const USERS_FILE: &str = "/work/apache_cassandra_login_details_20240115.json";
    const CHART_FILE: &str = "/work/apache_cassandra_pie_chart_20240115.png";

    /// Records what it was asked to draw instead of drawing it
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(ChartDataset, String)>>,
    }

    impl PieRenderer for RecordingRenderer {
        fn render(&self, dataset: &ChartDataset, title: &str) -> Result<Vec<u8>> {
            self.calls
                .borrow_mut()
                .push((dataset.clone(), title.to_owned()));
            Ok(b"\x89PNG fake".to_vec())
        }
    }

    fn config(attribute: &str) -> PipelineConfig {
        PipelineConfig {
            org: "apache".to_owned(),
            repo: "cassandra".to_owned(),
            token: Token::new("ghp_secret"),
            chart_attribute: attribute.to_owned(),
            output_dir: PathBuf::from("/work"),
            run_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            per_page: 100,
            start_page: 1,
        }
    }

    fn contributors_line(config: &PipelineConfig) -> String {
        let probe = MockSystem::new();
        GhCliSource::new(&probe, config.token.clone(), config.per_page, config.start_page)
            .contributors_command_line(&config.org, &config.repo)
    }

    fn scripted_system(config: &PipelineConfig, contributors: &str) -> MockSystem {
        MockSystem::new()
            .with_command(&contributors_line(config), CommandOutput::success(contributors))
            .with_command(
                &GhCliSource::user_command_line("alice"),
                CommandOutput::success(r#"{"login":"alice","location":"NY","company":""}"#),
            )
            .with_command(
                &GhCliSource::user_command_line("bob"),
                CommandOutput::success(r#"{"login":"bob","location":"NY","company":null}"#),
            )
            .with_command(
                &GhCliSource::user_command_line("carol"),
                CommandOutput::success(r#"{"login":"carol","location":"CA"}"#),
            )
            .with_command(
                &GhCliSource::user_command_line("dave"),
                CommandOutput::success(r#"{"login":"dave"}"#),
            )
    }

    fn user_fetches(system: &MockSystem) -> usize {
        system
            .commands_run()
            .iter()
            .filter(|line| line.contains("\"/users/"))
            .count()
    }

    #[test]
    fn full_run_writes_all_three_files() {
        let config = config("location");
        let contributors = r#"[
            {"login":"alice","contributions":10},
            {"email":"anon@example.com","type":"Anonymous","contributions":3},
            {"login":"bob","contributions":7},
            {"login":"carol","contributions":2},
            {"login":"dave","contributions":1}
        ]"#;
        let system = scripted_system(&config, contributors);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);
        let renderer = RecordingRenderer::default();

        let report = run_pipeline(&system, &source, &renderer, &config).unwrap();

        assert_eq!(report.contributors, 5);
        assert_eq!(report.users.fetched, 4);
        assert_eq!(report.users.anonymous, 1);
        assert_eq!(user_fetches(&system), 4);

        assert_eq!(
            system.file_contents(CONTRIBUTORS_FILE).unwrap(),
            contributors.as_bytes()
        );
        let users: Vec<Value> =
            serde_json::from_slice(&system.file_contents(USERS_FILE).unwrap()).unwrap();
        assert_eq!(users.len(), 4);
        assert_eq!(
            system.file_contents(CHART_FILE).unwrap(),
            b"\x89PNG fake".to_vec()
        );

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0.counts(),
            &[("NY".to_owned(), 2), ("CA".to_owned(), 1)]
        );
        assert_eq!(calls[0].1, "apache/cassandra committers based on location");
    }

    #[test]
    fn token_never_appears_in_command_lines() {
        let config = config("location");
        let system = scripted_system(&config, r#"[{"login":"alice"}]"#);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);

        run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap();

        for command in system.command_history() {
            assert!(!command.line.contains("ghp_secret"));
        }
    }

    #[test]
    fn attribute_missing_everywhere_produces_no_chart() {
        let config = config("twitter_username");
        let system = scripted_system(&config, r#"[{"login":"alice"},{"login":"bob"}]"#);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);
        let renderer = RecordingRenderer::default();

        let err = run_pipeline(&system, &source, &renderer, &config).unwrap_err();

        let contrib_err = err.downcast_ref::<ContribError>().unwrap();
        assert!(matches!(contrib_err, ContribError::NoChartData { .. }));
        assert_eq!(contrib_err.exit_code(), 1);
        assert!(system.file_contents(CHART_FILE).is_none());
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn empty_attribute_values_are_not_charted() {
        let config = config("company");
        let system = scripted_system(&config, r#"[{"login":"alice"},{"login":"bob"}]"#);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);

        let err = run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContribError>(),
            Some(ContribError::NoChartData { .. })
        ));
    }

    #[test]
    fn unknown_user_aborts_the_run() {
        let config = config("location");
        let system = scripted_system(&config, r#"[{"login":"alice"},{"login":"mallory"}]"#);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);

        let err = run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ContribError>(),
            Some(ContribError::Command { .. })
        ));
        assert!(system.file_contents(USERS_FILE).is_none());
        assert!(system.file_contents(CHART_FILE).is_none());
    }

    #[test]
    fn failed_contributor_request_stops_before_any_file() {
        let config = config("location");
        let system = MockSystem::new();
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);

        let err = run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ContribError>(),
            Some(ContribError::Command { .. })
        ));
        assert!(system.file_contents(CONTRIBUTORS_FILE).is_none());
    }

    #[test]
    fn same_day_rerun_overwrites_outputs() {
        let config = config("location");
        let system = scripted_system(&config, r#"[{"login":"alice"},{"login":"bob"},{"login":"carol"}]"#);
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);
        run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap();

        // Second run sees a shorter contributor list
        let system = system
            .clone()
            .with_command(&contributors_line(&config), CommandOutput::success(r#"[{"login":"carol"}]"#));
        let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);
        run_pipeline(&system, &source, &RecordingRenderer::default(), &config).unwrap();

        assert_eq!(
            system.file_contents(CONTRIBUTORS_FILE).unwrap(),
            br#"[{"login":"carol"}]"#.to_vec()
        );
        let users: Vec<Value> =
            serde_json::from_slice(&system.file_contents(USERS_FILE).unwrap()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["login"], "carol");
    }
}

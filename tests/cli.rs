mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Matcher, Server};
    use predicates::str::contains;

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "probeup";

    fn config_file(content: &str) -> Result<tempfile::NamedTempFile, std::io::Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    fn command(config: &tempfile::NamedTempFile) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(std::env::temp_dir())
            .env_remove("GH_TOKEN")
            .env_remove("GITHUB_API_URL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(config.path());
        Ok(cmd)
    }

    #[tokio::test]
    async fn test_output__dry_run_renders_issue() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/200").with_status(200).create();
        let _m404 = server.mock("GET", "/404").with_status(404).create();
        let config = config_file(&format!(
            r#"
[global]
timeout = 5

[[requests]]
url = "{0}/200"
method = "GET"

[[requests]]
url = "{0}/404"
method = "GET"

[[requests]]
method = "GET"
"#,
            server.url()
        ))?;

        let mut cmd = command(&config)?;
        cmd.arg("--dry-run");

        cmd.assert()
            .success()
            .stdout(contains(format!("1. ✅ 200 - GET {}/200", server.url())))
            .stdout(contains(format!("2. ⚠️ 404 - GET {}/404", server.url())))
            .stdout(contains("3. ❌ GET  - Invalid request config"))
            .stdout(contains(
                "> Summary: 1 succeeded, 1 unexpected status, 1 failed",
            ))
            .stdout(contains("> Issue title\nEndpoint probe report "))
            .stdout(contains(format!(
                "| 1 | GET | {}/200 | 200 |",
                server.url()
            )));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__json_format() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/200").with_status(200).create();
        let config = config_file(&format!(
            "[[requests]]\nurl = \"{}/200\"\nmethod = \"GET\"\n\n[[requests]]\nurl = \"\"\nmethod = \"GET\"\n",
            server.url()
        ))?;

        let mut cmd = command(&config)?;
        cmd.arg("--dry-run").arg("--format").arg("json");

        let output = cmd.output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let results = json.as_array().expect("results should be an array");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["status_code"], 200);
        assert_eq!(results[0]["succeeded"], true);
        assert_eq!(results[1]["failed"], true);
        assert_eq!(results[1]["error_message"], "Invalid request config");
        assert_eq!(results[1]["duration_ms"], -1);
        Ok(())
    }

    #[test]
    fn test_output__json_format_from_config_file() -> TestResult {
        let config = config_file(
            "output_format = \"json\"\n\n[[requests]]\nurl = \"\"\nmethod = \"GET\"\n",
        )?;

        let mut cmd = command(&config)?;
        cmd.arg("--dry-run");

        let output = cmd.output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["error_message"], "Invalid request config");
        Ok(())
    }

    #[tokio::test]
    async fn test_output__submits_issue() -> TestResult {
        let mut probes = Server::new_async().await;
        let _m200 = probes.mock("GET", "/200").with_status(200).create();
        let mut github = Server::new_async().await;
        let issue_mock = github
            .mock("POST", "/repos/acme/status/issues")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "labels": ["healthcheck"],
                "assignees": ["oncall"],
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 3, "html_url": "https://github.com/acme/status/issues/3"}"#)
            .expect(1)
            .create();

        let config = config_file(&format!(
            r#"
[global]
timeout = 5

[global.github]
owner = "acme"
repo = "status"

[[requests]]
url = "{}/200"
method = "GET"

[notification.github]
assignees = ["oncall"]
labels = ["healthcheck"]
"#,
            probes.url()
        ))?;

        let mut cmd = command(&config)?;
        cmd.env("GH_TOKEN", "test-token")
            .env("GITHUB_API_URL", github.url());

        cmd.assert().success().stdout(contains(
            "> Created issue #3: https://github.com/acme/status/issues/3",
        ));
        issue_mock.assert();
        Ok(())
    }

    #[test]
    fn test_output__when_token_missing() -> TestResult {
        let config = config_file("[global.github]\nowner = \"acme\"\nrepo = \"status\"\n")?;

        let mut cmd = command(&config)?;

        cmd.assert().failure().stderr(contains(
            "Error: Missing credential: environment variable GH_TOKEN is not set",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_config_missing() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg("some-file-that-doesnt-exist.toml");

        cmd.assert().failure().stderr(contains(
            "Error: Configuration error: Could not read config file 'some-file-that-doesnt-exist.toml'",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_config_invalid() -> TestResult {
        let config = config_file("[[requests]\nurl = ")?;

        let mut cmd = command(&config)?;

        cmd.assert()
            .failure()
            .stderr(contains("Error: Configuration error: Invalid TOML"));
        Ok(())
    }

    #[test]
    fn test_output__when_zero_timeout_provided() -> TestResult {
        let config = config_file("")?;

        let mut cmd = command(&config)?;
        cmd.arg("--timeout").arg("0").arg("--dry-run");

        cmd.assert()
            .failure()
            .stderr(contains("Timeout cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_output__when_unknown_format_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--format").arg("xml");

        cmd.assert()
            .failure()
            .stderr(contains("invalid value 'xml' for '--format <FORMAT>'"));
        Ok(())
    }

    #[test]
    fn test_output__no_endpoints_dry_run() -> TestResult {
        let config = config_file("[global]\ntimeout = 1\n")?;

        let mut cmd = command(&config)?;
        cmd.arg("--dry-run");

        cmd.assert()
            .success()
            .stdout(contains("No endpoints configured"))
            .stdout(contains("_No endpoints were configured._"));
        Ok(())
    }

    #[test]
    fn test_output__quiet_prints_nothing() -> TestResult {
        let config = config_file("[[requests]]\nurl = \"\"\nmethod = \"GET\"\n")?;

        let mut cmd = command(&config)?;
        cmd.arg("--dry-run").arg("--quiet");

        cmd.assert().success().stdout("");
        Ok(())
    }
}

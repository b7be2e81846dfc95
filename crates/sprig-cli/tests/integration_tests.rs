//! Integration tests for the `sprig` binary.

use std::fs;
use std::path::Path;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

/// A `sprig` command isolated from the user's configuration and environment.
fn sprig(home: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("sprig");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("SPRIG_CONFIG")
        .env_remove("SPRIG_LOG_FILE")
        .env_remove("SPRIG_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring Boot"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("facets"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_command_help() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("--facet"))
        .stdout(predicate::str::contains("--packaging"));
}

#[test]
fn test_new_maven_project_success() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["new", "demo", "--facet", "web", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'demo' created"))
        .stdout(predicate::str::contains("mvn spring-boot:run"));

    let project = temp.path().join("demo");
    let pom = fs::read_to_string(project.join("pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>spring-boot-starter-web</artifactId>"));
    assert!(pom.contains("<java.version>17</java.version>"));
    assert!(
        project
            .join("src/main/java/com/example/demo/DemoApplication.java")
            .is_file()
    );
    assert!(
        project
            .join("src/test/java/com/example/demo/DemoApplicationTests.java")
            .is_file()
    );
    assert!(project.join("src/main/resources/application.properties").is_file());
}

#[test]
fn test_new_kotlin_gradle_project() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args([
            "new", "shop", "--lang", "kt", "--build", "gradle", "--group", "org.acme", "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle bootRun"));

    let project = temp.path().join("shop");
    assert!(project.join("build.gradle").is_file());
    assert!(!project.join("pom.xml").exists());
    assert!(
        project
            .join("src/main/kotlin/org/acme/shop/ShopApplication.kt")
            .is_file()
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["new", "preview", "--facet", "web,actuator", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("pom.xml"))
        .stdout(predicate::str::contains("spring-boot-starter-actuator"));

    assert!(!temp.path().join("preview").exists());
}

#[test]
fn test_dry_run_json_summary() {
    let temp = TempDir::new().unwrap();
    let output = sprig(temp.path())
        .args(["--output-format", "json", "new", "preview", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(summary.is_object());
    assert!(!temp.path().join("preview").exists());
}

#[test]
fn test_facets_lists_builtin_catalog() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["facets", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("data-jpa"));
}

#[test]
fn test_facets_json_output() {
    let temp = TempDir::new().unwrap();
    let output = sprig(temp.path())
        .args(["facets", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let facets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = facets
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["id"].as_str())
        .collect();
    assert!(ids.contains(&"web"));
    assert!(ids.contains(&"h2"));
}

#[test]
fn test_facets_with_extra_catalog() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("catalog");
    fs::create_dir(&catalog).unwrap();
    fs::write(
        catalog.join("kafka.toml"),
        r#"
[[facet]]
id = "kafka"
name = "Spring for Apache Kafka"
group = "Messaging"

[[facet.entry]]
dependencies = [{ group_id = "org.springframework.kafka", artifact_id = "spring-kafka" }]
"#,
    )
    .unwrap();

    sprig(temp.path())
        .args(["facets", "--format", "list", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("kafka"))
        .stdout(predicate::str::contains("web"));
}

#[test]
fn test_config_get_default_language() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["config", "get", "defaults.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("java"));
}

#[test]
fn test_env_overrides_config_default() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .env("SPRIG_DEFAULTS__LANGUAGE", "scala")
        .args(["config", "get", "defaults.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scala"));
}

#[test]
fn test_local_config_file_is_honoured() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".sprig.toml"),
        "[defaults]\nbuild = \"gradle\"\n",
    )
    .unwrap();

    sprig(temp.path())
        .args(["new", "local", "--yes"])
        .assert()
        .success();

    assert!(temp.path().join("local/build.gradle").is_file());
}

#[test]
fn test_init_writes_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sprig.toml");

    sprig(temp.path())
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[defaults]"));
    assert!(written.contains("language = \"java\""));
}

#[test]
fn test_init_local_writes_dot_file() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();

    assert!(temp.path().join(".sprig.toml").is_file());
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sprig"));
}

#[test]
fn test_no_color_accepts_any_value() {
    let temp = TempDir::new().unwrap();
    for value in ["1", "true", "yes", "0", ""] {
        sprig(temp.path())
            .env("NO_COLOR", value)
            .args(["facets", "--format", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("web"));
    }
}

#[test]
fn test_no_color_flag_takes_no_value() {
    let temp = TempDir::new().unwrap();
    sprig(temp.path())
        .env_remove("NO_COLOR")
        .args(["--no-color", "facets", "--format", "list"])
        .assert()
        .success();
}

//! End-to-end tests for the `stratum` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ORDER: &str = "package com.acme.shop.domain;

@AggregateRoot
public class Order {
}
";

const ORDER_PATH: &str = "src/main/java/com/acme/shop/domain/Order.java";

/// A `stratum` invocation isolated from the user's config and environment.
fn stratum(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stratum").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write(path: PathBuf, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn companion(module: &Path) -> PathBuf {
    module.join("src/main/java/com/acme/shop/adapter/domain/repositories/OrderRepository.java")
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("arch"))
        .stdout(predicate::str::contains("repository"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn repository_without_base_package_exits_with_config_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join("src/main/java/Order.java"), ORDER);

    stratum(temp.path())
        .arg("repository")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("base_package"));

    let entries: Vec<_> = fs::read_dir(temp.path().join("src/main/java"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn repository_generates_companion_in_single_module() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);

    stratum(temp.path())
        .args(["repository", "--base-package", "com.acme.shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let source = fs::read_to_string(companion(temp.path())).unwrap();
    assert!(source.starts_with("package com.acme.shop.adapter.domain.repositories;\n"));
    assert!(source.contains("import com.acme.shop.domain.Order;"));
    assert!(source.contains("public interface OrderRepository extends"));
}

#[test]
fn repository_removes_temp_files_of_an_interrupted_write() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);
    let leftover = companion(temp.path()).with_file_name(".OrderRepository.java.stratum-tmp");
    write(leftover.clone(), "package com.acme");

    stratum(temp.path())
        .args(["repository", "--base-package", "com.acme.shop"])
        .assert()
        .success();

    assert!(!leftover.exists());
    assert!(companion(temp.path()).is_file());
}

#[test]
fn repository_preserves_custom_code_across_runs() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);
    let target = write(
        companion(temp.path()),
        "package com.acme.shop.adapter.domain.repositories;

import com.acme.shop.domain.Order;
import java.util.List;

public interface OrderRepository extends Old<Order> {
    List<Order> findOverdue();
}
",
    );

    stratum(temp.path())
        .args([
            "repository",
            "--base-package",
            "com.acme.shop",
            "--base-interface",
            "Repository<${EntityType}, ${IdentityType}>",
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "package com.acme.shop.adapter.domain.repositories;

import com.acme.shop.domain.Order;
import java.util.List;

public interface OrderRepository extends Repository<Order, Long> {
    List<Order> findOverdue();
}
"
    );
    assert!(!PathBuf::from(format!("{}.retired", target.display())).exists());
}

#[test]
fn repository_multi_module_writes_into_adapter() {
    let temp = TempDir::new().unwrap();
    let domain = temp.path().join("shop-domain");
    let adapter = temp.path().join("shop-adapter");
    write(domain.join(ORDER_PATH), ORDER);
    fs::create_dir_all(&adapter).unwrap();

    stratum(temp.path())
        .args(["repository", "--multi-module", "--base-package", "com.acme.shop"])
        .assert()
        .success();

    assert!(companion(&adapter).is_file());
    assert!(!companion(&domain).exists());
}

#[test]
fn repository_reads_base_package_from_environment() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);

    stratum(temp.path())
        .env("STRATUM__PROJECT__BASE_PACKAGE", "com.acme.shop")
        .arg("repository")
        .assert()
        .success();

    assert!(companion(temp.path()).is_file());
}

#[test]
fn repository_ignore_flag_skips_entity() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);

    stratum(temp.path())
        .args(["repository", "--base-package", "com.acme.shop", "--ignore", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored"));

    assert!(!companion(temp.path()).exists());
}

#[test]
fn arch_renders_template_description() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path().join("arch.json"),
        r#"{
            "type": "root",
            "children": [
                { "type": "dir", "name": "${artifactId}-domain", "children": [
                    { "type": "dir", "name": "src/main/java/${basePackage}/domain" },
                    { "type": "file", "name": "README.md", "data": "${groupId}:${artifactId}" }
                ]}
            ]
        }"#,
    );

    stratum(temp.path())
        .args([
            "arch",
            "--template",
            "arch.json",
            "--base-package",
            "com.acme.shop",
            "--group-id",
            "com.acme",
            "--artifact-id",
            "shop",
        ])
        .assert()
        .success();

    let module = temp.path().join("shop-domain");
    assert!(module.join("src/main/java/com/acme/shop/domain").is_dir());
    assert_eq!(
        fs::read_to_string(module.join("README.md")).unwrap(),
        "com.acme:shop"
    );
}

#[test]
fn repository_with_invalid_marker_exits_with_input_error() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["repository", "--base-package", "com.acme.shop", "--marker", "@Root"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--marker"));
}

#[test]
fn arch_reads_url_sources_next_to_the_description() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path().join("tpl/arch.json"),
        r#"{
            "type": "root",
            "children": [
                { "type": "file", "name": "pom.xml", "format": "url", "data": "files/pom.xml" }
            ]
        }"#,
    );
    write(
        temp.path().join("tpl/files/pom.xml"),
        "<groupId>${basePackage}</groupId>",
    );

    stratum(temp.path())
        .args([
            "arch",
            "--template",
            "tpl/arch.json",
            "--base-package",
            "com.acme.shop",
            "--output",
            "out",
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/pom.xml")).unwrap(),
        "<groupId>com.acme.shop</groupId>"
    );
}

#[test]
fn arch_without_template_exits_with_config_error() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["arch", "--base-package", "com.acme"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn arch_with_malformed_template_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join("arch.json"), "{ not json");

    stratum(temp.path())
        .args(["arch", "--template", "arch.json", "--base-package", "com.acme"])
        .assert()
        .code(2);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn init_writes_local_config_once() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("stratum.toml");
    stratum(temp.path()).arg("init").assert().success();

    let written = fs::read_to_string(&local).unwrap();
    assert!(written.contains("[repository]"));

    fs::write(&local, "[project]\nbase_package = \"x.y\"\n").unwrap();
    stratum(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert!(fs::read_to_string(&local).unwrap().contains("x.y"));
}

#[test]
fn config_get_reads_local_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path().join("stratum.toml"),
        "[repository]\nidentity_type = \"UUID\"\n",
    );

    stratum(temp.path())
        .args(["config", "get", "repository.identity_type"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UUID"));
}

#[test]
fn config_get_unknown_key_fails() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn quiet_flag_silences_stdout() {
    let temp = TempDir::new().unwrap();
    write(temp.path().join(ORDER_PATH), ORDER);

    stratum(temp.path())
        .args(["-q", "repository", "--base-package", "com.acme.shop"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn shell_completions() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stratum"));
}

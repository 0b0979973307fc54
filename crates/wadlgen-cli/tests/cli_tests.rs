use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use walkdir::WalkDir;

const USER: &str = include_str!("../../wadlgen-core/tests/fixtures/plcm-user.xsd");
const USER_LIST: &str = include_str!("../../wadlgen-core/tests/fixtures/plcm-user-list.xsd");
const ROLE: &str = include_str!("../../wadlgen-core/tests/fixtures/plcm-role.xsd");
const TIER: &str = include_str!("../../wadlgen-core/tests/fixtures/plcm-tier.xsd");
const USERS_WADL: &str = include_str!("../../wadlgen-core/tests/fixtures/users.wadl");

fn wadlgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wadlgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run wadlgen")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn api_tree(root: &Path) {
    write(root, "wadl/plcm-tier.xsd", TIER);
    write(root, "wadl/roles/plcm-role.xsd", ROLE);
    write(root, "wadl/users/plcm-user.xsd", USER);
    write(root, "wadl/users/plcm-user-list.xsd", USER_LIST);
    write(root, "wadl/users/users.wadl", USERS_WADL);
    write(root, "wadl/README.txt", "not an input document");
}

/// Every file under `dir`, keyed by its `/`-separated relative path.
fn snapshot(dir: &Path) -> BTreeMap<String, String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap();
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (key, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn generate_writes_client_and_server_trees() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());

    let out = wadlgen(tmp.path(), &["generate", "wadl", "client", "server"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let server = snapshot(&tmp.path().join("server"));
    let server_files: Vec<&str> = server.keys().map(String::as_str).collect();
    assert_eq!(
        server_files,
        vec![
            "index.js",
            "plcm-tier.js",
            "roles/plcm-role.js",
            "users/plcm-user-list.js",
            "users/plcm-user.js",
            "users/state-type.js",
        ]
    );

    let client = snapshot(&tmp.path().join("client"));
    let client_files: Vec<&str> = client.keys().map(String::as_str).collect();
    assert_eq!(
        client_files,
        vec![
            "plcm-tier-enum.js",
            "roles/plcm-role-model.js",
            "users/plcm-user-model.js",
            "users/state-type-enum.js",
        ]
    );
    assert!(client["users/plcm-user-model.js"].contains("var plcmUserGroupsUsersCollection"));
}

#[test]
fn generate_twice_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());

    assert!(wadlgen(tmp.path(), &["generate", "wadl", "client", "server"]).status.success());
    let first = (
        snapshot(&tmp.path().join("client")),
        snapshot(&tmp.path().join("server")),
    );
    assert!(wadlgen(tmp.path(), &["generate", "wadl", "client", "server"]).status.success());
    let second = (
        snapshot(&tmp.path().join("client")),
        snapshot(&tmp.path().join("server")),
    );
    assert_eq!(first, second);
}

#[test]
fn generate_uses_config_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());

    let out = wadlgen(tmp.path(), &["generate"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("wadltypegen/index.js").is_file());
    assert!(tmp.path().join("models/users/plcm-user-model.js").is_file());
}

#[test]
fn generate_requires_all_three_directories() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());
    let out = wadlgen(tmp.path(), &["generate", "wadl", "client"]);
    assert!(!out.status.success());
}

#[test]
fn missing_api_root_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let out = wadlgen(tmp.path(), &["generate", "nowhere", "client", "server"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nowhere"));
}

#[test]
fn malformed_document_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());
    write(tmp.path(), "wadl/broken.xsd", "<xs:schema><xs:element></xs:schema>");

    let out = wadlgen(tmp.path(), &["generate", "wadl", "client", "server"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("server/users/plcm-user.js").is_file());

    let out = wadlgen(tmp.path(), &["validate", "wadl"]);
    assert!(!out.status.success());
}

#[test]
fn validate_and_inspect() {
    let tmp = tempfile::tempdir().unwrap();
    api_tree(tmp.path());

    let out = wadlgen(tmp.path(), &["validate", "wadl"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = wadlgen(tmp.path(), &["inspect", "wadl", "--format", "json"]);
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["stats"]["collections"], 1);
    let user = summary["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "plcm-user")
        .unwrap();
    assert_eq!(user["collection"]["list"], "plcm-user-list");
    assert_eq!(user["url"], "/api/rest/users");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = tempfile::tempdir().unwrap();

    assert!(wadlgen(tmp.path(), &["init"]).status.success());
    let content = fs::read_to_string(tmp.path().join(".wadlgen.yaml")).unwrap();
    assert!(content.contains("list_suffix"));

    assert!(!wadlgen(tmp.path(), &["init"]).status.success());
    assert!(wadlgen(tmp.path(), &["init", "--force"]).status.success());
}

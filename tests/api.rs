use std::path::Path;

use modorder::{
    model::{load_order::LoadOrder, module::ModuleName},
    DependencyError, LoadOrderMode, Modorder,
};
use pretty_assertions::assert_eq;

fn write_module(root: &Path, name: &str, requires: &[&str]) {
    let directory = root.join("modules").join(name);
    std::fs::create_dir_all(&directory).unwrap();
    let requires = requires
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ");
    std::fs::write(
        directory.join("module.toml"),
        format!("name = \"{name}\"\nversion = \"1.0.0\"\nrequires = [{requires}]\n"),
    )
    .unwrap();
}

#[test]
fn orders_a_modules_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_module(dir.path(), "cms", &["core", "search", "theme"]);
    write_module(dir.path(), "core", &[]);
    write_module(dir.path(), "search", &["core"]);
    write_module(dir.path(), "theme", &["core"]);
    write_module(dir.path(), "webdav", &["security"]);
    write_module(dir.path(), "security", &["core"]);

    let modorder = Modorder::builder()
        .root(dir.path())
        .modules_directory("modules")
        .try_build()
        .unwrap();

    let order = modorder.order(LoadOrderMode::Update).unwrap();
    assert_eq!(
        order
            .modules
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>(),
        vec!["core", "search", "security", "theme", "webdav", "cms"]
    );
    assert_eq!(
        LoadOrder::from_file(&dir.path().join("load-order.toml")).unwrap(),
        order
    );
    modorder.order(LoadOrderMode::Locked).unwrap();

    assert_eq!(
        modorder.dependents(&ModuleName::from("security")).unwrap(),
        vec![ModuleName::from("webdav")]
    );
}

#[test]
fn reports_cycles_from_a_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("site.toml"),
        r#"
            [core]
            version = "1.0.0"

            [theme]
            version = "1.0.0"
            requires = ["core", "cms"]

            [cms]
            version = "1.0.0"
            requires = ["theme"]
        "#,
    )
    .unwrap();

    let modorder = Modorder::builder()
        .root(dir.path())
        .manifest_file_name("site.toml")
        .try_build()
        .unwrap();

    let err = modorder.resolve().unwrap_err();
    assert_eq!(
        err.downcast_ref::<DependencyError>(),
        Some(&DependencyError::CyclicDependency {
            remaining: vec![ModuleName::from("theme"), ModuleName::from("cms")],
            cycle: vec![
                ModuleName::from("theme"),
                ModuleName::from("cms"),
                ModuleName::from("theme")
            ],
        })
    );
    assert!(!dir.path().join("load-order.toml").exists());
    modorder
        .order(LoadOrderMode::Update)
        .expect_err("no load order exists for a cycle");
    assert!(!dir.path().join("load-order.toml").exists());
}

#[test]
fn init_then_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let modorder = Modorder::builder().root(dir.path()).try_build().unwrap();
    modorder.init(Some("portal".to_string()), false).unwrap();

    let order = modorder.resolve().unwrap();
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].name, ModuleName::from("portal"));
}

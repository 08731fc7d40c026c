//! End-to-end tests against a running server.

use std::collections::BTreeSet;
use std::fs;
use std::time::Duration;

mod common;

use common::{raw_request, start_server, test_config, write_tree};

const REFERENCE_TREE: &[(&str, &[u8])] = &[
    ("node_modules/package.json", b"{}"),
    ("dist/app.js", b""),
    (".env", b"SECRET=1"),
    (".env.production", b"SECRET=2"),
    ("src/app.js", b""),
    ("src/components/App.jsx", b""),
    ("src/components/App.md", b"# App"),
    ("node_modules/src/components/Ignore.md", b"# no"),
    ("dist/Ignore.md", b"# no"),
    ("src/styles/app.css", b""),
    ("test/app.test.js", b""),
    (".vscode/settings.json", b"{}"),
    ("build/README.md", b"# no"),
    ("build/output.txt", b""),
    ("README.md", b"# Readme\n\nTop level."),
];

const REFERENCE_IGNORE: &str = "# generated output\nnode_modules\ndist/.*\n\\.env\n\\.env\\..*\nbuild/.*\n";

/// Menu link targets found in a rendered page.
fn menu_links(body: &str) -> BTreeSet<String> {
    body.split(r#"<li class="file"><a href=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_home_on_empty_directory() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let res = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("Hello 👋"));
    assert!(menu_links(&body).is_empty());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_menu_honours_ignore_file() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_tree(root.path(), REFERENCE_TREE);
    fs::write(config_dir.path().join("ignore"), REFERENCE_IGNORE).unwrap();
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let body = reqwest::get(server.url("/")).await.unwrap().text().await.unwrap();
    let expected: BTreeSet<String> = ["/README.md", "/src/components/App.md"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(menu_links(&body), expected);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_markdown_page_and_exclusion() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_tree(root.path(), REFERENCE_TREE);
    fs::write(config_dir.path().join("ignore"), REFERENCE_IGNORE).unwrap();
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let res = reqwest::get(server.url("/src/components/App.md")).await.unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("<title>App.md</title>"));
    assert!(body.contains("<h1>App</h1>"));
    assert!(body.contains(r#"<a href="/README.md">"#));

    for excluded in ["/build/README.md", "/dist/Ignore.md", "/node_modules/src/components/Ignore.md", "/.env"] {
        let res = reqwest::get(server.url(excluded)).await.unwrap();
        assert_eq!(res.status(), 404, "{excluded}");
        assert_eq!(res.text().await.unwrap(), "Not found");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_images_and_unknown_files() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_tree(
        root.path(),
        &[
            ("img/diagram.svg", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            ("notes.txt", b"plain"),
        ],
    );
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let res = reqwest::get(server.url("/img/diagram.svg")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/svg+xml");
    assert_eq!(res.text().await.unwrap(), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");

    let res = reqwest::get(server.url("/notes.txt")).await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_post_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_tree(root.path(), &[("README.md", b"# Readme")]);
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let client = reqwest::Client::new();
    for path in ["/", "/README.md", "/missing.md"] {
        let res = client.post(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 405, "{path}");
    }

    let (status, _) = raw_request(server.addr, "POST", "/../../etc/passwd").await;
    assert_eq!(status, 405);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_traversal_is_bad_request() {
    let outside = tempfile::tempdir().unwrap();
    let root = outside.path().join("served");
    write_tree(outside.path(), &[("secret.md", b"# Secret"), ("served/README.md", b"# Readme")]);
    let config_dir = tempfile::tempdir().unwrap();
    let server = start_server(test_config(&root, config_dir.path())).await;

    for target in ["/../secret.md", "/%2e%2e/secret.md", "/sub/../../secret.md", "/..%2fsecret.md"] {
        let (status, response) = raw_request(server.addr, "GET", target).await;
        assert_eq!(status, 400, "{target}");
        assert!(!response.contains("Secret"), "{target}");
        assert!(!response.contains(&outside.path().display().to_string()), "{target}");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_custom_templates() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_tree(root.path(), &[("a.md", b"*hi*")]);
    fs::write(
        config_dir.path().join("index.html"),
        "<title>{{ Title }}</title><nav>{{ Menu }}</nav><main>{{ Content }}</main>",
    )
    .unwrap();
    fs::write(config_dir.path().join("menu.html"), "[{{ UrlPath }}]{{ Menu }}").unwrap();
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let body = reqwest::get(server.url("/a.md")).await.unwrap().text().await.unwrap();
    assert!(body.starts_with("<title>a.md</title>"));
    assert!(body.contains("<nav>["));
    assert!(body.contains(r#"]<ul><li class="file"><a href="/a.md">"#));
    assert!(body.contains("<main><p><em>hi</em></p>\n</main>"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let root = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    let server = start_server(test_config(root.path(), config_dir.path())).await;

    let res = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}

use dirscribe_scan::{
    ConcatConfig, Concatenator, ExclusionPatterns, TreeNode, TreeWalker, WalkConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// root/
///   .gitignore
///   .git/HEAD
///   README.md
///   node_modules/pkg/index.js
///   src/main.py
///   src/util/helpers.py
///   src/util/deep/leaf.js
///   app.log/extra
///   app.log2
fn create_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::create_dir_all(root.join("src/util/deep")).unwrap();
    fs::create_dir_all(root.join("app.log")).unwrap();

    fs::write(root.join(".gitignore"), "node_modules/\n*.log\n").unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(root.join("README.md"), "# project").unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "module.exports = 1;").unwrap();
    fs::write(root.join("src/main.py"), "import util").unwrap();
    fs::write(root.join("src/util/helpers.py"), "def help(): pass").unwrap();
    fs::write(root.join("src/util/deep/leaf.js"), "export {}").unwrap();
    fs::write(root.join("app.log/extra"), "x").unwrap();
    fs::write(root.join("app.log2"), "x").unwrap();

    temp
}

fn config_with_gitignore(root: &Path, max_depth: Option<u32>) -> WalkConfig {
    WalkConfig::builder()
        .root(root)
        .max_depth(max_depth)
        .exclude_patterns(ExclusionPatterns::from_gitignore(root.join(".gitignore")).unwrap())
        .build()
        .unwrap()
}

fn all_names(node: &TreeNode, names: &mut Vec<String>) {
    if let Some(children) = node.children() {
        for (name, child) in children {
            names.push(name.clone());
            all_names(child, names);
        }
    }
}

#[test]
fn test_json_depth_is_bounded() {
    let temp = create_project();
    // Deepest chain: src/util/deep/leaf.js, four levels of mapping.
    let full = TreeWalker::new(WalkConfig::new(temp.path())).walk_json();
    assert_eq!(full.structure.depth(), 4);

    for max_depth in 0..6u32 {
        let mut config = WalkConfig::new(temp.path());
        config.max_depth = Some(max_depth);
        let walk = TreeWalker::new(config).walk_json();
        let expected = (max_depth as usize + 1).min(4);
        assert_eq!(walk.structure.depth(), expected, "max_depth = {max_depth}");
    }
}

#[test]
fn test_hidden_entries_never_listed() {
    let temp = create_project();
    let walker = TreeWalker::new(WalkConfig::new(temp.path()));

    let mut out = Vec::new();
    walker.walk_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains(".git/"));
    assert!(!text.contains("HEAD"));
    assert!(text.contains(".gitignore"));

    let mut names = Vec::new();
    all_names(&walker.walk_json().structure, &mut names);
    assert!(names.iter().all(|n| !n.starts_with('.') || n == ".gitignore"));
    assert!(names.contains(&".gitignore".to_string()));
}

#[test]
fn test_gitignore_patterns_in_text_listing() {
    let temp = create_project();
    let walker = TreeWalker::new(config_with_gitignore(temp.path(), None));

    let mut out = Vec::new();
    walker.walk_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let expected = [
        "├── .gitignore",
        "├── README.md",
        "└── src/",
        "    ├── main.py",
        "    └── util/",
        "        ├── deep/",
        "            └── leaf.js",
        "        └── helpers.py",
    ]
    .map(|line| format!("{line}\n"))
    .concat();
    assert_eq!(text, expected);
}

#[test]
fn test_gitignore_patterns_in_json() {
    let temp = create_project();
    let walk = TreeWalker::new(config_with_gitignore(temp.path(), None)).walk_json();

    assert!(walk.structure.get("node_modules").is_none());
    assert!(walk.structure.get("app.log").is_none());
    assert!(walk.structure.get("app.log2").is_none());
    assert!(walk.structure.get("README.md").unwrap().is_file());
    assert!(
        walk.structure
            .get("src")
            .and_then(|src| src.get("util"))
            .and_then(|util| util.get("deep"))
            .and_then(|deep| deep.get("leaf.js"))
            .is_some_and(TreeNode::is_file)
    );
}

#[test]
fn test_concatenation_honors_patterns_and_extensions() {
    let temp = create_project();
    let root = temp.path();
    let config = ConcatConfig::builder()
        .root(root)
        .exclude_patterns(ExclusionPatterns::from_gitignore(root.join(".gitignore")).unwrap())
        .build()
        .unwrap();

    let mut out = Vec::new();
    let summary = Concatenator::new(config).write_to(&mut out, |_| {}).unwrap();
    let text = String::from_utf8(out).unwrap();

    let files: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("FILE: "))
        .collect();
    assert_eq!(
        files,
        vec!["src/main.py", "src/util/helpers.py", "src/util/deep/leaf.js"]
    );
    // .gitignore, README.md, .git/HEAD, node_modules/pkg/index.js, app.log/extra, app.log2
    assert_eq!(summary.skipped, 6);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.errors, 0);
}

#[test]
fn test_concatenation_is_deterministic() {
    let temp = create_project();
    let run = || {
        let mut out = Vec::new();
        Concatenator::new(ConcatConfig::new(temp.path()))
            .write_to(&mut out, |_| {})
            .unwrap();
        out
    };
    assert_eq!(run(), run());
}

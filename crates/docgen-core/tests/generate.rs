//! End-to-end generation runs over temporary template trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use docgen_core::{GenerateConfig, Generator};
use pretty_assertions::assert_eq;

fn config_for(temp: &tempfile::TempDir) -> GenerateConfig {
    GenerateConfig {
        template_dir: temp.path().join("templates"),
        output_dir: temp.path().join("generated"),
        template_ext: ".j2".to_owned(),
        program_version: "1.2.3".to_owned(),
        extra_terms: BTreeMap::new(),
    }
}

fn write_template(config: &GenerateConfig, rel: &str, content: &str) {
    let path = config.template_dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Snapshot an output tree as relative path -> content.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, String> {
    let mut files = BTreeMap::new();
    collect(dir, dir, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, String>) {
    for entry in fs::read_dir(dir).unwrap().map(Result::unwrap) {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read_to_string(&path).unwrap());
        }
    }
}

#[test]
fn renders_version_and_escapes_literals() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "index.j2", "Hello *world*! {{ program_version }}");

    let report = Generator::new(config.clone()).generate().unwrap();

    assert_eq!(report.generated.len(), 1);
    assert!(report.failures.is_empty());
    let output = fs::read_to_string(config.output_dir.join("index.md")).unwrap();
    assert_eq!(output, "Hello \\*world\\*\\! 1\\.2\\.3");
}

#[test]
fn mirrors_directory_structure() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "index.j2", "home");
    write_template(&config, "a/b/name.j2", "deep");

    let report = Generator::new(config.clone()).generate().unwrap();

    assert_eq!(report.generated.len(), 2);
    assert!(config.output_dir.join("index.md").is_file());
    assert!(config.output_dir.join("a/b/name.md").is_file());
}

#[test]
fn shared_terms_are_visible_without_passing() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = config_for(&temp);
    config
        .extra_terms
        .insert("solution_name".to_owned(), "My Product".to_owned());
    write_template(&config, "about.j2", "{{ solution_name }} {{ project_name }}");

    Generator::new(config.clone()).generate().unwrap();

    let output = fs::read_to_string(config.output_dir.join("about.md")).unwrap();
    assert_eq!(output, "My Product docgen");
}

#[test]
fn raw_blocks_pass_markup_through_verbatim() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(
        &config,
        "guide.j2",
        "{% raw %}# Heading with *emphasis*{% endraw %}",
    );

    Generator::new(config.clone()).generate().unwrap();

    let output = fs::read_to_string(config.output_dir.join("guide.md")).unwrap();
    assert_eq!(output, "# Heading with *emphasis*");
}

#[test]
fn expression_may_contain_closer_in_string_literal() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "braces.j2", "{{ \"a}}b\" }}");

    let report = Generator::new(config.clone()).generate().unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.generated.len(), 1);
    let output = fs::read_to_string(config.output_dir.join("braces.md")).unwrap();
    // The interpolated value still goes through markdown escaping
    assert_eq!(output, "a\\}\\}b");
}

#[test]
fn trailing_newline_is_preserved() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "note.j2", "one line\n");

    Generator::new(config.clone()).generate().unwrap();

    let output = fs::read_to_string(config.output_dir.join("note.md")).unwrap();
    assert_eq!(output, "one line\n");
}

#[test]
fn reruns_are_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "index.j2", "v{{ program_version }}");
    write_template(&config, "guide/setup.j2", "steps");

    let generator = Generator::new(config.clone());
    generator.generate().unwrap();
    let first = snapshot(&config.output_dir);
    generator.generate().unwrap();
    let second = snapshot(&config.output_dir);

    assert_eq!(first, second);
}

#[test]
fn stale_output_does_not_survive_template_removal() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "keep.j2", "kept");
    write_template(&config, "drop.j2", "dropped");

    let generator = Generator::new(config.clone());
    generator.generate().unwrap();
    assert!(config.output_dir.join("drop.md").is_file());

    fs::remove_file(config.template_dir.join("drop.j2")).unwrap();
    generator.generate().unwrap();

    assert!(config.output_dir.join("keep.md").is_file());
    assert!(!config.output_dir.join("drop.md").exists());
}

#[test]
fn broken_template_is_reported_and_run_continues() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "bad.j2", "{% if %}");
    write_template(&config, "good.j2", "fine");

    let report = Generator::new(config.clone()).generate().unwrap();

    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].template, "good.j2");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].template, "bad.j2");
    // No empty output file for the broken template
    assert!(!config.output_dir.join("bad.md").exists());
    assert!(config.output_dir.join("good.md").is_file());
}

#[test]
fn missing_include_surfaces_error_naming_the_template() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "entry.j2", "{% include 'nope.j2' %}");

    let report = Generator::new(config.clone()).generate().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].template, "entry.j2");
    assert!(!config.output_dir.join("entry.md").exists());
}

#[test]
fn progress_is_reported_per_template() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp);
    write_template(&config, "one.j2", "1");
    write_template(&config, "two.j2", "2");

    let mut seen = Vec::new();
    Generator::new(config)
        .generate_with_progress(|template, output| {
            seen.push((template.to_owned(), output.to_path_buf()));
        })
        .unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "one.j2");
    assert!(seen[0].1.ends_with("one.md"));
    assert_eq!(seen[1].0, "two.j2");
}

//! Exercises the full discover → extract → sub-patterns → patterns → report
//! pipeline against small fixture trees, end to end.

use std::fs;

use patroid::core::{PatternDetector, SubPatternEngine};
use patroid::extractor::SourceExtractor;
use patroid::report::Report;

fn write(dir: &std::path::Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn decorator_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "Component.java",
        "class Component { final Decorator wrapped; }",
    );
    write(
        dir.path(),
        "ConcreteComponent.java",
        "class ConcreteComponent extends Component {}",
    );
    write(
        dir.path(),
        "Decorator.java",
        "class Decorator extends Component {}",
    );
    write(
        dir.path(),
        "ConcreteDecorator.java",
        "class ConcreteDecorator extends Decorator {}",
    );

    let extractor = SourceExtractor::new(dir.path());
    let discovery = extractor.discover(dir.path()).unwrap();
    let (graph, manifest) = extractor.extract(&discovery).unwrap();

    let sub_patterns = SubPatternEngine::derive(&graph);
    let occurrences = PatternDetector::detect(&sub_patterns);
    let report = Report::build("decorator-fixture", occurrences, Some(&manifest));

    assert!(report.total_occurrences() > 0);
    assert!(!report.occurrences_for("Decorator").is_empty());
}

#[test]
fn project_with_no_sources_fails_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = SourceExtractor::new(dir.path());
    assert!(extractor.discover(dir.path()).is_err());
}

#[test]
fn batch_mode_tolerates_an_empty_sibling_project() {
    use patroid::config::Config;
    use patroid::driver::Driver;

    let root = tempfile::tempdir().unwrap();
    let project_a = root.path().join("has-sources");
    let project_b = root.path().join("no-sources");
    fs::create_dir_all(&project_a).unwrap();
    fs::create_dir_all(&project_b).unwrap();
    write(&project_a, "Shape.java", "class Shape {}");
    write(&project_a, "Circle.java", "class Circle extends Shape {}");

    let config = Config::default();
    let driver = Driver::new(&config);
    let results = driver.run_batch(root.path()).unwrap();

    assert_eq!(results.len(), 2);
    let by_name: std::collections::HashMap<_, _> = results.into_iter().collect();
    assert!(by_name["has-sources"].is_ok());
    assert!(by_name["no-sources"].is_err());
}

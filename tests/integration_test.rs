// tests/integration_test.rs
use std::collections::BTreeMap;

use gitver::config::parse_config;
use gitver::domain::{PatternMatcher, RepositorySituation, VersionDescriptor};
use gitver::template::{substitute, TemplateContext, TemplateFunction};
use gitver::{DescriptorSelector, RefType, VersionComposer};

const COMMIT: &str = "7c6b2f0e3d9a8b1c4e5f60718293a4b5c6d7e8f9";

fn situation(branch: Option<&str>, tags: &[&str]) -> RepositorySituation {
    RepositorySituation::new(COMMIT)
        .unwrap()
        .with_timestamp(1_600_000_000)
        .with_branch(branch.map(str::to_string))
        .with_tags(tags.iter().map(|t| t.to_string()).collect())
}

fn compose(selector: &DescriptorSelector, situation: &RepositorySituation) -> String {
    VersionComposer::new(selector)
        .compose(situation, "1.0.0-SNAPSHOT", &BTreeMap::new())
        .version
}

fn branch_selector(format: &str) -> DescriptorSelector {
    DescriptorSelector::new(
        vec![VersionDescriptor::for_ref(Some("v.*"), "${tag}-tag").unwrap()],
        vec![VersionDescriptor::for_ref(Some(".*"), format).unwrap()],
        VersionDescriptor::commit("${commit}").unwrap(),
    )
}

#[test]
fn test_detached_head_renders_commit_hash() {
    let selector = branch_selector("${branch}-branch");
    assert_eq!(compose(&selector, &situation(None, &[])), COMMIT);
}

#[test]
fn test_branch_descriptor() {
    let selector = branch_selector("${branch}-branch");
    assert_eq!(
        compose(&selector, &situation(Some("develop"), &[])),
        "develop-branch"
    );
}

#[test]
fn test_branch_with_slash() {
    let selector = branch_selector("${branch}-branch");
    assert_eq!(
        compose(&selector, &situation(Some("feature/test"), &[])),
        "feature-test-branch"
    );
}

#[test]
fn test_prefer_tags_selects_tag() {
    let selector = branch_selector("${branch}-branch").prefer_tags(true);
    let composed = VersionComposer::new(&selector).compose(
        &situation(Some("develop"), &["v1"]),
        "",
        &BTreeMap::new(),
    );
    assert_eq!(composed.ref_type, RefType::Tag);
    assert_eq!(composed.version, "v1-tag");
}

#[test]
fn test_defaulting_round_trip() {
    let empty = TemplateContext::new();
    assert_eq!(substitute("${missing:-xxx}", &empty).unwrap(), "xxx");
    assert_eq!(substitute("${missing}", &empty).unwrap(), "${missing}");
}

#[test]
fn test_function_chain() {
    let context: TemplateContext = [("foo", "PR-56+/ii")].into_iter().collect();
    assert_eq!(
        substitute("${foo:word:lowercase}", &context).unwrap(),
        "pr_56_ii"
    );
}

#[test]
fn test_numeric_increment() {
    assert_eq!(
        TemplateFunction::IncrementLast.apply("alpha.9-special"),
        "alpha.10-special"
    );
    assert_eq!(TemplateFunction::Next.apply("alpha.56-rc.12"), "alpha.56-rc.13");
    assert_eq!(
        TemplateFunction::Next.apply("alpha.56-rc.12-abc"),
        "alpha.56-rc.12-abc.1"
    );
}

#[test]
fn test_slug_twice_equals_once() {
    let inputs = [
        "feature/JIRA-123 some title",
        "release/1.x",
        "~~weird~~",
        "__init__",
    ];
    for input in inputs {
        let once = TemplateFunction::Slug.apply(input);
        assert_eq!(TemplateFunction::Slug.apply(&once), once, "input {:?}", input);
    }
}

#[test]
fn test_capture_group_extraction() {
    let matcher = PatternMatcher::new("(?<first>one) (?<second>two)").unwrap();
    let groups = matcher.captures("one two").unwrap();

    for (key, value) in [("1", "one"), ("2", "two"), ("first", "one"), ("second", "two")] {
        assert_eq!(groups.get(key).map(String::as_str), Some(value));
    }
}

#[test]
fn test_configured_release_workflow() {
    let config = parse_config(
        r#"
[[branch]]
pattern = "main"
version_format = "${version.release}"

[[branch]]
pattern = "release/(?<line>\\d+\\.\\d+)"
version_format = "${line}.x-SNAPSHOT"

[[branch]]
version_format = "${branch:slug:lowercase}-SNAPSHOT${dirty:-}"

[[branch.property]]
name_pattern = "build\\.revision"
value_format = "${commit.short}"

[[tag]]
pattern = "v(?<semver>\\d+\\.\\d+\\.\\d+.*)"
version_format = "${semver}"
"#,
    )
    .unwrap();
    let selector = config.compile().unwrap();

    assert_eq!(compose(&selector, &situation(Some("main"), &[])), "1.0.0");
    assert_eq!(
        compose(&selector, &situation(Some("release/2.3"), &[])),
        "2.3.x-SNAPSHOT"
    );
    assert_eq!(
        compose(&selector, &situation(Some("Feature/Big_Thing"), &[])),
        "feature-big_thing-SNAPSHOT"
    );
    assert_eq!(
        compose(
            &selector,
            &situation(Some("topic"), &[]).with_clean(false)
        ),
        "topic-SNAPSHOT-DIRTY"
    );
    assert_eq!(
        compose(&selector, &situation(None, &["v2.0.0", "v2.1.0-rc.1", "v1.9.9"])),
        "2.1.0-rc.1"
    );

    let properties: BTreeMap<String, String> = [
        ("build.revision".to_string(), "unknown".to_string()),
        ("java.version".to_string(), "17".to_string()),
    ]
    .into_iter()
    .collect();
    let composed =
        VersionComposer::new(&selector).compose(&situation(Some("topic"), &[]), "", &properties);
    assert_eq!(composed.properties["build.revision"], "7c6b2f0");
    assert_eq!(composed.properties["java.version"], "17");
    assert_eq!(composed.properties.len(), 2);
}

#[test]
fn test_overrides_drive_selection() {
    let selector = branch_selector("${branch}-branch");
    let forced = situation(Some("main"), &[]).with_overrides(None, Some("v9"));
    let composed = VersionComposer::new(&selector).compose(&forced, "", &BTreeMap::new());
    assert_eq!(composed.ref_type, RefType::Tag);
    assert_eq!(composed.version, "v9-tag");
}

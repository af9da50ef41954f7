//! Rendering versions and properties for a repository situation

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::{debug, trace};

use crate::domain::version::{numeric_parts, release_version};
use crate::domain::{RepositorySituation, VersionDescriptor};
use crate::selector::{DescriptorSelector, RefSelection, RefType};
use crate::template::TemplateContext;

/// Rendered version together with the rewritten properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedVersion {
    pub ref_type: RefType,
    /// Selected ref name, prefix stripped and `/` replaced by `-`
    pub ref_name: String,
    pub version: String,
    pub properties: BTreeMap<String, String>,
}

/// Drives descriptor selection and template rendering
#[derive(Debug, Clone, Copy)]
pub struct VersionComposer<'a> {
    selector: &'a DescriptorSelector,
}

impl<'a> VersionComposer<'a> {
    pub fn new(selector: &'a DescriptorSelector) -> Self {
        VersionComposer { selector }
    }

    /// Render the version for `situation` and rewrite matching `properties`.
    ///
    /// `declared_version` is the version currently declared by the project,
    /// exposed to format strings as `${version}`.
    pub fn compose(
        &self,
        situation: &RepositorySituation,
        declared_version: &str,
        properties: &BTreeMap<String, String>,
    ) -> ComposedVersion {
        let selection = self.selector.select(situation);
        let context = build_context(situation, &selection, declared_version);

        let version = selection.descriptor.format().render(&context).replace('/', "-");
        debug!(%version, "rendered version");

        let properties = render_properties(&context, selection.descriptor, properties);

        ComposedVersion {
            ref_type: selection.ref_type,
            ref_name: selection.ref_name.clone(),
            version,
            properties,
        }
    }
}

/// Placeholder values for the selected ref.
///
/// Later bindings replace earlier ones of the same name, so `version` wins
/// over a capture group called `version`. Capture groups are also bound
/// under `ref.` where nothing can shadow them.
pub fn build_context<'c>(
    situation: &RepositorySituation,
    selection: &'c RefSelection<'_>,
    declared_version: &str,
) -> TemplateContext<'c> {
    let mut context = TemplateContext::new();
    let commit = situation.head_commit();

    context.insert("commit", commit);
    context.insert("commit.short", &commit[..7]);
    context.insert(
        "commit.timestamp",
        situation.head_commit_timestamp().to_string(),
    );
    insert_commit_time(&mut context, situation);

    if !situation.is_clean() {
        context.insert("dirty", "-DIRTY");
        context.insert("dirty.snapshot", "-SNAPSHOT");
    }

    context.insert("ref", selection.ref_name.as_str());
    context.insert(selection.ref_type.name(), selection.ref_name.as_str());

    if let Some(pattern) = selection.descriptor.pattern() {
        context.insert_captures(pattern, &selection.raw_name, &["", "ref."]);
    }

    let release = release_version(declared_version);
    context.insert("version", declared_version);
    context.insert("version.release", release);

    let parts = numeric_parts(release);
    for (key, part) in ["version.major", "version.minor", "version.patch"]
        .into_iter()
        .zip(parts)
    {
        context.insert(key, part.to_string());
    }

    context
}

fn insert_commit_time(context: &mut TemplateContext<'_>, situation: &RepositorySituation) {
    let time = if situation.has_commit() {
        DateTime::<Utc>::from_timestamp(situation.head_commit_timestamp(), 0)
    } else {
        None
    };

    let Some(time) = time else {
        context.insert("commit.timestamp.datetime", "00000000.000000");
        for (key, width) in TIME_PARTS {
            context.insert(key, "0".repeat(width));
        }
        return;
    };

    context.insert(
        "commit.timestamp.datetime",
        time.format("%Y%m%d.%H%M%S").to_string(),
    );
    let values = [
        time.year() as u32,
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        time.second(),
    ];
    for ((key, width), value) in TIME_PARTS.into_iter().zip(values) {
        context.insert(key, format!("{:0width$}", value, width = width));
    }
}

const TIME_PARTS: [(&str, usize); 6] = [
    ("commit.timestamp.year", 4),
    ("commit.timestamp.month", 2),
    ("commit.timestamp.day", 2),
    ("commit.timestamp.hour", 2),
    ("commit.timestamp.minute", 2),
    ("commit.timestamp.second", 2),
];

fn render_properties(
    base: &TemplateContext<'_>,
    descriptor: &VersionDescriptor,
    properties: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    properties
        .iter()
        .map(|(name, value)| {
            let Some(property) = descriptor.find_property(name, value) else {
                return (name.clone(), value.clone());
            };

            let mut context = base.clone();
            context.insert("property.name", name.as_str());
            context.insert("property.value", value.as_str());
            context.insert_captures(property.value_pattern(), value, &[""]);

            let rendered = property.value_format().render(&context);
            trace!(property = %name, from = %value, to = %rendered, "rewrote property");
            (name.clone(), rendered)
        })
        .collect()
}

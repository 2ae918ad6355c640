//! The decision core: reconcile filenames that match the template and
//! build conforming names for the ones that do not.

use regex::Regex;
use std::sync::LazyLock;

use super::area::AreaMapping;
use super::normalizer;
use super::numeric;
use super::pattern::{CompiledPattern, Field, FilenameComponents};
use super::temp;
use crate::types::decision::{RenameAction, RenameDecision};

/// Leading `PREFIX.AREA.rest` / `PREFIX AREA rest` shape: two short
/// alphanumeric codes separated from each other and from the rest by a
/// run of dots/whitespace.
static RE_PREFIX_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9]{1,6})[.\s]+([A-Za-z0-9]{1,6})[.\s]+(.+)$").expect("Invalid regex")
});

/// Trailing digit run right before the extension boundary, with an
/// optional separator run before it.
static RE_TRAILING_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)[.\s_\-]*([0-9]+)$").expect("Invalid regex"));

static RE_DOT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.+").expect("Invalid regex"));

/// Immutable per-call configuration. The engine reads no ambient state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Prefix substituted when the template has `{PREFIX}` and the file
    /// does not carry one.
    pub default_prefix: String,
    /// Flag temp/junk files for deletion.
    pub delete_temp: bool,
    /// Cosmetic name cleanup (only decides on its own when
    /// standardization is off).
    pub clean_names: bool,
    /// Evaluate and enforce the naming template.
    pub apply_standard: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_prefix: "P".to_string(),
            delete_temp: true,
            clean_names: true,
            apply_standard: true,
        }
    }
}

/// Decide what to do with a single filename in a given folder.
///
/// Every outcome is a value: no-match, no-tag and no-op are ordinary
/// decisions, never errors.
pub fn evaluate(
    filename: &str,
    folder_path: &str,
    pattern: &CompiledPattern,
    mapping: &AreaMapping,
    config: &EngineConfig,
) -> RenameDecision {
    if config.delete_temp && temp::is_temp_file(filename) {
        return RenameDecision {
            action: RenameAction::DeleteTemp,
            new_name: None,
            note: "temporary file detected".to_string(),
        };
    }

    if config.apply_standard {
        if let Some(components) = pattern.matches(filename) {
            return reconcile(filename, folder_path, pattern, mapping, config, &components);
        }
        let (built, note) = build_standard_name(
            filename,
            folder_path,
            pattern,
            mapping,
            &config.default_prefix,
        );
        if built != filename {
            return RenameDecision {
                action: RenameAction::FullConstruct,
                new_name: Some(built),
                note,
            };
        }
        return RenameDecision::no_change();
    }

    if config.clean_names {
        return clean_only(filename, pattern);
    }

    RenameDecision::no_change()
}

/// The file matches the template: compare each captured field against
/// its folder-derived expectation and repair the drifted ones.
fn reconcile(
    filename: &str,
    folder_path: &str,
    pattern: &CompiledPattern,
    mapping: &AreaMapping,
    config: &EngineConfig,
    components: &FilenameComponents,
) -> RenameDecision {
    let captured_prefix = components.prefix.clone().unwrap_or_default();
    let captured_area = components.area.clone().unwrap_or_default();
    let captured_name = components.name.clone().unwrap_or_default();
    let captured_ext = components.ext.clone().unwrap_or_default();
    let captured_parent = components.parent_letter.clone().unwrap_or_default();

    // A sequence number that landed in the prefix slot moves to the
    // name. A prefix is never left empty: if nothing remains after the
    // strip, the captured text stays as-is (the tag still moves).
    let mut prefix_tag = None;
    let mut prefix_value = captured_prefix.clone();
    if pattern.has(Field::Prefix) {
        if let Some((tag, rest)) = numeric::extract_leading_lenient(&captured_prefix) {
            prefix_tag = Some(tag);
            if !rest.is_empty() {
                prefix_value = rest;
            }
        }
    }

    let (token, name_tag) = normalizer::process_name(&captured_name);
    let mut canonical_name = token;
    let tags: Vec<String> = name_tag.into_iter().chain(prefix_tag).collect();
    if !tags.is_empty() {
        canonical_name = append_numeric_suffix(&canonical_name, &tags.join("_"));
    }

    let expected_area = mapping.resolve_path(folder_path);
    let expected_prefix = if pattern.has(Field::Prefix) {
        config.default_prefix.clone()
    } else {
        String::new()
    };
    let expected_parent = if pattern.has(Field::ParentLetter) {
        parent_letter(folder_path)
    } else {
        String::new()
    };

    let needs_prefix =
        pattern.has(Field::Prefix) && !expected_prefix.is_empty() && prefix_value != expected_prefix;
    let needs_area =
        pattern.has(Field::Area) && !expected_area.is_empty() && captured_area != expected_area;
    let needs_parent = pattern.has(Field::ParentLetter)
        && !expected_parent.is_empty()
        && captured_parent != expected_parent;
    let needs_name = canonical_name != captured_name;

    if !(needs_prefix || needs_area || needs_parent || needs_name) {
        return RenameDecision::no_change();
    }

    let prefix_out = if pattern.has(Field::Prefix) && !expected_prefix.is_empty() {
        expected_prefix
    } else {
        prefix_value
    };
    let area_out = if !expected_area.is_empty() {
        expected_area
    } else {
        captured_area.clone()
    };
    let parent_out = if pattern.has(Field::ParentLetter) && !expected_parent.is_empty() {
        expected_parent
    } else {
        captured_parent.clone()
    };

    let rebuilt = pattern.render(|field| match field {
        Field::Prefix => prefix_out.clone(),
        Field::Area => area_out.clone(),
        Field::Name => canonical_name.clone(),
        Field::Ext => captured_ext.clone(),
        Field::ParentLetter => parent_out.clone(),
    });
    let rebuilt = RE_DOT_RUN
        .replace_all(&rebuilt, ".")
        .trim_matches(['.', ' '])
        .to_string();

    if rebuilt == filename {
        return RenameDecision::no_change();
    }

    let mut notes = Vec::new();
    if needs_prefix {
        notes.push(format!("prefix: {captured_prefix} -> {prefix_out}"));
    }
    if needs_area {
        notes.push(format!("area: {captured_area} -> {area_out}"));
    }
    if needs_parent {
        notes.push(format!("parent_letter: {captured_parent} -> {parent_out}"));
    }
    if needs_name {
        notes.push(format!("name: {captured_name} -> {canonical_name}"));
    }

    RenameDecision {
        action: RenameAction::RepairFields,
        new_name: Some(rebuilt),
        note: notes.join("; "),
    }
}

/// The file does not match the template: derive every field and build a
/// conforming name from scratch.
pub fn build_standard_name(
    filename: &str,
    folder_path: &str,
    pattern: &CompiledPattern,
    mapping: &AreaMapping,
    default_prefix: &str,
) -> (String, String) {
    let (stem, raw_ext) = split_extension(filename);
    let ext = raw_ext.trim_start_matches('.').to_lowercase();

    // A sequence number at the very start is not a prefix candidate;
    // pull it out before shape detection sees it.
    let (working, start_tag) = match numeric::extract_leading(stem) {
        Some((tag, rest)) => (rest, Some(tag)),
        None => (stem.to_string(), None),
    };

    let (detected_prefix, detected_area, rest) = match RE_PREFIX_AREA.captures(&working) {
        Some(caps) => (
            caps[1].to_string(),
            caps[2].to_string(),
            caps[3].to_string(),
        ),
        None => (String::new(), String::new(), working.clone()),
    };

    let (rest, trailing_tag) = match RE_TRAILING_NUM.captures(&rest) {
        Some(caps) => (caps[1].to_string(), Some(caps[2].to_string())),
        None => (rest.clone(), None),
    };

    let (token, inner_tag) = normalizer::process_name(&rest);
    let mut name_out = normalizer::capitalize_first_segment(&token);
    let tags: Vec<String> = start_tag
        .into_iter()
        .chain(inner_tag)
        .chain(trailing_tag)
        .collect();
    if !tags.is_empty() {
        name_out = append_numeric_suffix(&name_out, &tags.join("_"));
    }

    let prefix_out = if detected_prefix.is_empty() {
        default_prefix.to_string()
    } else {
        detected_prefix
    };

    let area_out = if detected_area.is_empty() {
        mapping.resolve_path(folder_path)
    } else {
        match mapping.match_token(&detected_area) {
            Some(abbr) => abbr.to_string(),
            None => {
                let resolved = mapping.resolve_path(folder_path);
                if resolved.is_empty() {
                    // Permissive fallback: an unmapped token is used
                    // verbatim as the abbreviation.
                    detected_area
                } else {
                    resolved
                }
            }
        }
    };

    let parent = parent_letter(folder_path);

    let rendered = pattern.render(|field| match field {
        Field::Prefix => prefix_out.clone(),
        Field::Area => area_out.clone(),
        Field::Name => name_out.clone(),
        Field::Ext => ext.clone(),
        Field::ParentLetter => parent.clone(),
    });
    let collapsed = RE_DOT_RUN.replace_all(&rendered, ".");
    let mut new_name = normalizer::collapse_underscores(&collapsed)
        .trim_matches(['.', ' ', '_'])
        .to_string();

    if !pattern.has(Field::Ext) && !ext.is_empty() {
        new_name.push('.');
        new_name.push_str(&ext);
    }

    let note = format!("area:{area_out} parent:{parent}");
    (new_name, note)
}

/// Cosmetic cleanup when standardization is disabled: canonicalize the
/// `{NAME}` field in place on conforming files, strip accents and
/// special characters from the stem otherwise.
fn clean_only(filename: &str, pattern: &CompiledPattern) -> RenameDecision {
    if let Some(components) = pattern.matches(filename) {
        let captured_name = components.name.clone().unwrap_or_default();
        let (token, tag) = normalizer::process_name(&captured_name);
        let mut cleaned = token;
        if let Some(tag) = tag {
            cleaned = append_numeric_suffix(&cleaned, &tag);
        }
        cleaned = normalizer::capitalize_first_segment(&cleaned);
        if cleaned == captured_name {
            return RenameDecision::no_change();
        }

        let rebuilt = pattern.render(|field| match field {
            Field::Name => cleaned.clone(),
            other => components.get(other).unwrap_or_default().to_string(),
        });
        let rebuilt = RE_DOT_RUN
            .replace_all(&rebuilt, ".")
            .trim_matches(['.', ' '])
            .to_string();
        if rebuilt == filename {
            return RenameDecision::no_change();
        }
        return RenameDecision {
            action: RenameAction::CleanOnly,
            new_name: Some(rebuilt),
            note: "name cleanup (file already matches pattern)".to_string(),
        };
    }

    let (stem, raw_ext) = split_extension(filename);
    let cleaned = normalizer::ascii_clean(stem, false);
    if cleaned == stem {
        return RenameDecision::no_change();
    }
    RenameDecision {
        action: RenameAction::CleanOnly,
        new_name: Some(format!("{cleaned}{raw_ext}")),
        note: "character cleanup (prefix and area untouched)".to_string(),
    }
}

/// Split into stem and raw extension (leading dot included, case
/// preserved). Leading dots of the filename never start an extension.
fn split_extension(filename: &str) -> (&str, &str) {
    let stripped = filename.trim_start_matches('.');
    let offset = filename.len() - stripped.len();
    match stripped.rfind('.') {
        Some(i) => filename.split_at(offset + i),
        None => (filename, ""),
    }
}

/// Upper-cased first character of the immediate folder name.
fn parent_letter(folder_path: &str) -> String {
    let normalized = folder_path.replace('\\', "/");
    normalized
        .split('/')
        .rev()
        .find(|part| !part.is_empty())
        .and_then(|part| part.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

fn append_numeric_suffix(name: &str, suffix: &str) -> String {
    if name.is_empty() {
        suffix.to_string()
    } else if name.ends_with('_') {
        format!("{name}{suffix}")
    } else {
        format!("{name}_{suffix}")
    }
}

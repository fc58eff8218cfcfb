use crate::ports::outbound::LockfileParseResult;
use crate::sbom_generation::domain::Package;
use crate::shared::Result;

/// Lockfile sections that list resolved specs
const SPEC_SECTIONS: [&str; 3] = ["GEM", "GIT", "PATH"];
const DEPENDENCIES_SECTION: &str = "DEPENDENCIES";

const SPEC_INDENT: usize = 4;
const SPEC_DEPENDENCY_INDENT: usize = 6;
const TOP_LEVEL_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Specs,
    Dependencies,
    Other,
}

/// Parses the text of a `Gemfile.lock`
///
/// Specs are returned in file order, one entry per line, so a gem locked for
/// several platforms appears several times.
pub fn parse_lockfile(content: &str) -> Result<LockfileParseResult> {
    let mut result = LockfileParseResult::default();
    let mut section = Section::Other;
    let mut in_specs = false;
    let mut current_spec: Option<String> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if indent == 0 {
            section = if SPEC_SECTIONS.contains(&line) {
                Section::Specs
            } else if line == DEPENDENCIES_SECTION {
                Section::Dependencies
            } else {
                Section::Other
            };
            in_specs = false;
            current_spec = None;
            continue;
        }

        let text = line.trim_start();
        match section {
            Section::Specs => {
                if indent == TOP_LEVEL_INDENT {
                    in_specs = text == "specs:";
                    current_spec = None;
                } else if in_specs && indent == SPEC_INDENT {
                    let (name, version) = split_spec_line(text).ok_or_else(|| {
                        anyhow::anyhow!("Malformed spec on line {}: '{}'", idx + 1, text)
                    })?;
                    let version = strip_platform(version);
                    result
                        .packages
                        .push(Package::new(name.to_string(), version.to_string())?);
                    result.dependency_map.entry(name.to_string()).or_default();
                    current_spec = Some(name.to_string());
                } else if in_specs && indent == SPEC_DEPENDENCY_INDENT {
                    if let Some(spec) = &current_spec {
                        let dep = dependency_name(text);
                        let deps = result.dependency_map.entry(spec.clone()).or_default();
                        if !deps.iter().any(|d| d == dep) {
                            deps.push(dep.to_string());
                        }
                    }
                }
            }
            Section::Dependencies => {
                if indent == TOP_LEVEL_INDENT {
                    let name = dependency_name(text).trim_end_matches('!').to_string();
                    if !result.top_level.contains(&name) {
                        result.top_level.push(name);
                    }
                }
            }
            Section::Other => {}
        }
    }

    Ok(result)
}

/// `name (version)` -> `(name, version)`
fn split_spec_line(text: &str) -> Option<(&str, &str)> {
    let (name, rest) = text.split_once(" (")?;
    let version = rest.strip_suffix(')')?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name, version))
}

/// `1.15.4-x86_64-linux` -> `1.15.4`
fn strip_platform(version: &str) -> &str {
    version.split_once('-').map_or(version, |(v, _)| v)
}

/// `rack (>= 2.2, < 4)` -> `rack`
fn dependency_name(text: &str) -> &str {
    text.split_once(' ').map_or(text, |(name, _)| name)
}

use crate::ports::outbound::GemGroups;
use crate::sbom_generation::domain::DEFAULT_GROUP;
use crate::shared::Result;
use regex::Regex;
use std::collections::BTreeSet;

/// Extracts group declarations from Gemfile source
///
/// Understands `group ... do` blocks (nested blocks accumulate groups),
/// `group:` / `groups:` keyword options and their hash-rocket forms. Gems
/// declared outside any group belong to the default group. This is a static
/// reading of the DSL: conditionals and `eval_gemfile` are not evaluated.
pub fn parse_gemfile_groups(content: &str) -> Result<GemGroups> {
    let gem_re = Regex::new(r#"^gem\s*\(?\s*["']([^"']+)["'](.*)$"#)?;
    let group_block_re = Regex::new(r"^group\s*\(?(.+?)\)?\s+do(\s*\|[^|]*\|)?$")?;
    let block_start_re = Regex::new(r"\bdo(\s*\|[^|]*\|)?$")?;
    let end_re = Regex::new(r"^end\b")?;
    let inline_group_re =
        Regex::new(r#"(?:\bgroups?:|:groups?\s*=>)\s*(\[[^\]]*\]|:[\w-]+|["'][\w-]+["'])"#)?;
    let name_re = Regex::new(r#"(?::|["'])([A-Za-z0-9_-]+)"#)?;

    let names = |text: &str| -> Vec<String> {
        name_re
            .captures_iter(text)
            .map(|c| c[1].to_string())
            .collect()
    };

    let mut groups = GemGroups::new();
    // One frame per open block; non-group blocks carry no groups
    let mut stack: Vec<Vec<String>> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = group_block_re.captures(line) {
            stack.push(names(&caps[1]));
            continue;
        }

        if end_re.is_match(line) {
            stack.pop();
            continue;
        }

        if let Some(caps) = gem_re.captures(line) {
            let mut gem_groups: BTreeSet<String> = stack.iter().flatten().cloned().collect();
            if let Some(inline) = inline_group_re.captures(&caps[2]) {
                gem_groups.extend(names(&inline[1]));
            }
            if gem_groups.is_empty() {
                gem_groups.insert(DEFAULT_GROUP.to_string());
            }
            groups
                .entry(caps[1].to_string())
                .or_default()
                .extend(gem_groups);
            if block_start_re.is_match(line) {
                stack.push(Vec::new());
            }
            continue;
        }

        if block_start_re.is_match(line) {
            stack.push(Vec::new());
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEMFILE: &str = r#"
source "https://rubygems.org"

ruby "3.2.2"

gem "rails", "~> 7.0.4"
gem 'puma', '>= 5.0'

# gem "commented-out"

group :development, :test do
  gem "debug", platforms: %i[ mri mingw x64_mingw ]
  gem "rspec-rails"

  group :test do
    gem "capybara"
  end
end

platforms :jruby do
  gem "jdbc-sqlite3"
end

group "development" do
  gem "web-console"
end

gem "pry", group: :development
gem "simplecov", require: false, groups: [:test, :ci]
gem "rubocop", :group => :lint
"#;

    fn groups_of(groups: &GemGroups, gem: &str) -> Vec<String> {
        groups[gem].iter().cloned().collect()
    }

    #[test]
    fn test_top_level_gems_are_default() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert_eq!(groups_of(&groups, "rails"), vec!["default"]);
        assert_eq!(groups_of(&groups, "puma"), vec!["default"]);
    }

    #[test]
    fn test_group_block() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert_eq!(groups_of(&groups, "debug"), vec!["development", "test"]);
        assert_eq!(groups_of(&groups, "rspec-rails"), vec!["development", "test"]);
    }

    #[test]
    fn test_nested_group_block_accumulates() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert_eq!(groups_of(&groups, "capybara"), vec!["development", "test"]);
    }

    #[test]
    fn test_non_group_block_is_closed_properly() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert_eq!(groups_of(&groups, "jdbc-sqlite3"), vec!["default"]);
        assert_eq!(groups_of(&groups, "web-console"), vec!["development"]);
    }

    #[test]
    fn test_inline_group_options() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert_eq!(groups_of(&groups, "pry"), vec!["development"]);
        assert_eq!(groups_of(&groups, "simplecov"), vec!["ci", "test"]);
        assert_eq!(groups_of(&groups, "rubocop"), vec!["lint"]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let groups = parse_gemfile_groups(GEMFILE).unwrap();
        assert!(!groups.contains_key("commented-out"));
    }

    #[test]
    fn test_repeated_gem_merges_groups() {
        let content = "gem \"rack\"\ngroup :test do\n  gem \"rack\"\nend\n";
        let groups = parse_gemfile_groups(content).unwrap();
        assert_eq!(groups_of(&groups, "rack"), vec!["default", "test"]);
    }

    #[test]
    fn test_empty_gemfile() {
        assert!(parse_gemfile_groups("").unwrap().is_empty());
    }
}

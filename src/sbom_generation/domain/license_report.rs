use super::license_info::NOASSERTION;

/// Report-normalized view of one package: the only fields license reporting needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub version: String,
    /// One identifier, a `", "`-joined list, or `NOASSERTION`
    pub license_declared: String,
}

impl ReportEntry {
    pub fn new(name: String, version: String, license_declared: String) -> Self {
        let license_declared = if license_declared.trim().is_empty() {
            NOASSERTION.to_string()
        } else {
            license_declared
        };
        Self {
            name,
            version,
            license_declared,
        }
    }

    /// License tokens of the declaration, split on commas and trimmed
    pub fn license_tokens(&self) -> Vec<&str> {
        self.license_declared
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    pub fn declares(&self, license: &str) -> bool {
        self.license_tokens().contains(&license)
    }
}

/// Per-license package counts in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseTally {
    counts: Vec<(String, usize)>,
}

impl LicenseTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, license: &str) {
        match self.counts.iter_mut().find(|(l, _)| l == license) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((license.to_string(), 1)),
        }
    }

    pub fn count(&self, license: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == license)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in the order each license was first encountered
    pub fn in_discovery_order(&self) -> &[(String, usize)] {
        &self.counts
    }

    /// Entries by descending count; ties keep discovery order
    pub fn sorted_by_count(&self) -> Vec<(String, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

//! Release eligibility decisions
//!
//! Every commit carrying a version tag is proposed as a release boundary.
//! [`VersionGate`] decides whether such a candidate may start its own
//! changelog block:
//!
//! - versions that are not valid semver are rejected;
//! - with `skip_unstable`, unstable pre-releases such as `2.0.0-5` are
//!   suppressed and lose their proposed version.

use scrivener_git::CommitInfo;
use semver::Version;

use crate::options::SynthesisOptions;
use crate::renderer::RenderContext;

/// A commit proposed as a version boundary, with the commits it releases
#[derive(Debug, Clone)]
pub struct ReleaseCandidate {
    /// Version named by the key commit's tag; cleared when suppressed
    pub proposed_version: Option<String>,
    /// The key commit followed by the older commits of its release
    pub commits: Vec<CommitInfo>,
}

impl ReleaseCandidate {
    /// Create a candidate
    pub fn new(proposed_version: Option<String>, commits: Vec<CommitInfo>) -> Self {
        Self {
            proposed_version,
            commits,
        }
    }
}

/// Outcome of gating one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Valid release; render it under this version
    Emit(Version),
    /// Not a valid version
    Reject,
    /// Valid but unstable while unstable versions are skipped
    Suppress,
}

impl Admission {
    /// Whether the candidate is accepted
    pub fn is_emit(&self) -> bool {
        matches!(self, Admission::Emit(_))
    }
}

/// Boolean view of an admission, with the possibly modified candidate
#[derive(Debug, Clone)]
pub struct GateResult {
    pub accepted: bool,
    pub candidate: ReleaseCandidate,
}

/// Decides, once per key commit, whether a release block is generated
pub trait ReleaseGate {
    fn generate_on(
        &self,
        candidate: &ReleaseCandidate,
        commits: &[CommitInfo],
        context: &RenderContext,
    ) -> Admission;
}

/// Gate driven by semver validity and the stability policy
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionGate {
    skip_unstable: bool,
}

impl VersionGate {
    /// Create a gate
    pub fn new(skip_unstable: bool) -> Self {
        Self { skip_unstable }
    }

    /// Create a gate from run options
    pub fn from_options(options: &SynthesisOptions) -> Self {
        Self::new(options.skip_unstable)
    }

    /// Decide on a raw version string
    pub fn decide(&self, version: Option<&str>) -> Admission {
        let Some(version) = version.and_then(parse_version) else {
            return Admission::Reject;
        };

        if self.skip_unstable && is_unstable(&version) {
            Admission::Suppress
        } else {
            Admission::Emit(version)
        }
    }

    /// Gate a candidate, clearing its version when suppressed
    pub fn admit(&self, candidate: ReleaseCandidate) -> GateResult {
        let admission = self.decide(candidate.proposed_version.as_deref());
        let mut candidate = candidate;
        if admission == Admission::Suppress {
            candidate.proposed_version = None;
        }

        GateResult {
            accepted: admission.is_emit(),
            candidate,
        }
    }
}

impl ReleaseGate for VersionGate {
    fn generate_on(
        &self,
        candidate: &ReleaseCandidate,
        _commits: &[CommitInfo],
        _context: &RenderContext,
    ) -> Admission {
        self.decide(candidate.proposed_version.as_deref())
    }
}

/// Parse a version, tolerating surrounding whitespace and one leading `v`
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

/// A pre-release whose identifiers are all numeric, e.g. `2.0.0-5`
pub fn is_unstable(version: &Version) -> bool {
    !version.pre.is_empty()
        && version
            .pre
            .as_str()
            .split('.')
            .all(|id| id.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate(version: &str) -> ReleaseCandidate {
        let commit = CommitInfo::new("abc1234567890", "chore: release", "A", "a@x", Utc::now())
            .with_tag(format!("v{}", version));
        ReleaseCandidate::new(Some(version.to_string()), vec![commit])
    }

    #[test]
    fn test_numeric_prerelease_suppressed_and_cleared() {
        let result = VersionGate::new(true).admit(candidate("2.0.0-5"));
        assert!(!result.accepted);
        assert_eq!(result.candidate.proposed_version, None);
        assert_eq!(result.candidate.commits.len(), 1);
    }

    #[test]
    fn test_named_prerelease_accepted() {
        let result = VersionGate::new(true).admit(candidate("2.0.0-beta.3"));
        assert!(result.accepted);
        assert_eq!(
            result.candidate.proposed_version.as_deref(),
            Some("2.0.0-beta.3")
        );
    }

    #[test]
    fn test_unstable_accepted_without_skip() {
        let gate = VersionGate::new(false);
        assert!(gate.admit(candidate("2.0.0-5")).accepted);
    }

    #[test]
    fn test_invalid_version_rejected_but_kept() {
        let result = VersionGate::new(true).admit(candidate("not-a-version"));
        assert!(!result.accepted);
        assert_eq!(
            result.candidate.proposed_version.as_deref(),
            Some("not-a-version")
        );
        assert_eq!(VersionGate::new(false).decide(None), Admission::Reject);
    }

    #[test]
    fn test_tolerates_prefix_and_whitespace() {
        let gate = VersionGate::default();
        assert_eq!(
            gate.decide(Some(" v1.2.3 ")),
            Admission::Emit(Version::new(1, 2, 3))
        );
        assert_eq!(gate.decide(Some("vv1.2.3")), Admission::Reject);
    }

    #[test]
    fn test_gate_totality() {
        let versions = [
            "1.0.0",
            "1.0.0-1",
            "1.0.0-0.3.7",
            "1.0.0-alpha",
            "1.0.0-rc.1",
            "1.0.0+build.5",
            "1.0",
            "",
            "x.y.z",
        ];

        for skip in [false, true] {
            let gate = VersionGate::new(skip);
            for raw in versions {
                let parsed = parse_version(raw);
                let expected = match &parsed {
                    Some(v) => !skip || !is_unstable(v),
                    None => false,
                };
                assert_eq!(
                    gate.admit(candidate(raw)).accepted,
                    expected,
                    "version {raw:?} skip_unstable={skip}"
                );
            }
        }
    }

    #[test]
    fn test_generate_on_matches_decide() {
        let gate = VersionGate::new(true);
        let context = RenderContext::new("Unreleased");
        let c = candidate("3.1.0-2");
        assert_eq!(gate.generate_on(&c, &c.commits, &context), Admission::Suppress);
    }
}

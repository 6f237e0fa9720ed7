//! Version string generation from git metadata.

use crate::error::CodegenError;
use crate::naming::string_literal;
use crate::options::GENERATED_BANNER;
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

/// `git describe --long --dirty` output, with an optional patch component.
static DESCRIBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?(?:-(?P<ahead>\d+)-g(?P<commit>[0-9a-f]+))?(?P<dirty>-dirty)?$",
    )
    .expect("describe pattern is valid")
});

/// Release branches are named `RB<major>.<minor>`.
static RELEASE_BRANCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RB(?P<major>\d+)\.(?P<minor>\d+)$").expect("branch pattern is valid"));

/// Version information derived from git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
    /// Commits since the tag.
    pub ahead: u32,
    /// Abbreviated commit hash (or the raw describe text when unparseable).
    pub commit: String,
    /// Whether the working tree had local modifications.
    pub dirty: bool,
    /// Branch name.
    pub branch: String,
    /// Whether the branch is a release branch.
    pub release_branch: bool,
}

impl VersionInfo {
    /// Parses `git describe` and branch output.
    ///
    /// Text that is not a version tag (for example a bare hash produced by
    /// `--always`) yields version 0.0.0 with the text kept as the commit.
    #[must_use]
    pub fn parse(describe: &str, branch: &str) -> Self {
        let describe = describe.trim();
        let branch = branch.trim();
        let release_branch = RELEASE_BRANCH_RE.is_match(branch);

        let Some(caps) = DESCRIBE_RE.captures(describe) else {
            let (commit, dirty) = match describe.strip_suffix("-dirty") {
                Some(commit) => (commit, true),
                None => (describe, false),
            };
            return Self {
                major: 0,
                minor: 0,
                patch: 0,
                ahead: 0,
                commit: commit.to_string(),
                dirty,
                branch: branch.to_string(),
                release_branch,
            };
        };

        let number = |name: &str| -> u32 {
            caps.name(name)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        Self {
            major: number("major"),
            minor: number("minor"),
            patch: number("patch"),
            ahead: number("ahead"),
            commit: caps
                .name("commit")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            dirty: caps.name("dirty").is_some(),
            branch: branch.to_string(),
            release_branch,
        }
    }

    /// Reads version information by running git in `dir`.
    ///
    /// # Errors
    /// Returns `CodegenError::Version` if git cannot be run or fails.
    pub fn from_git(dir: &std::path::Path) -> Result<Self, CodegenError> {
        let describe = run_git(dir, &["describe", "--always", "--long", "--dirty"])?;
        let branch = run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(Self::parse(&describe, &branch))
    }

    /// Version as `vMAJOR.MINOR.PATCH`.
    #[must_use]
    pub fn version_string(&self) -> String {
        format!("v{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Version packed as `0xMMmmpppp`-style integer.
    #[must_use]
    pub fn numeric(&self) -> u32 {
        ((self.major & 0xff) << 24) | ((self.minor & 0xff) << 16) | (self.patch & 0xffff)
    }

    /// Human-readable build description.
    #[must_use]
    pub fn build_info(&self, product: &str) -> String {
        let mut info = format!("{} {}", product, self.version_string());
        if !self.commit.is_empty() {
            info.push_str(&format!(" (commit {}", self.commit));
            if self.ahead > 0 {
                info.push_str(&format!(", +{}", self.ahead));
            }
            if self.dirty {
                info.push_str(", modified");
            }
            info.push(')');
        }
        if !self.branch.is_empty() && !self.release_branch {
            info.push_str(&format!(" [branch {}]", self.branch));
        }
        info
    }

    /// Renders a C source file exposing the version.
    #[must_use]
    pub fn render(&self, product: &str, prefix: &str) -> String {
        let mut output = String::new();

        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n");
        output.push_str(&format!(
            "static const char product[] = {};\n",
            string_literal(product)
        ));
        output.push_str(&format!(
            "static const char version[] = {};\n",
            string_literal(&self.version_string())
        ));
        output.push_str(&format!(
            "static const char build[] = {};\n\n",
            string_literal(&self.build_info(product))
        ));

        output.push_str(&format!(
            "const char* {}GetVersion()\n{{\n    return version;\n}}\n\n",
            prefix
        ));
        output.push_str(&format!(
            "const char* {}GetBuildInfo()\n{{\n    return build;\n}}\n\n",
            prefix
        ));
        output.push_str(&format!(
            "unsigned int {}GetNumericVersion()\n{{\n    return {:#010x};\n}}\n",
            prefix,
            self.numeric()
        ));

        output
    }
}

fn run_git(dir: &std::path::Path, args: &[&str]) -> Result<String, CodegenError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CodegenError::version(format!("cannot run git: {e}")))?;

    if !output.status.success() {
        return Err(CodegenError::version(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

//! Homebrew formula generation.
//!
//! Renders a new Ruby formula for a single prebuilt binary.

/// Data for generating a Homebrew formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaData {
    /// Formula and binary name (the repository name)
    pub name: String,
    /// Formula class name (e.g., "MyTool")
    pub class_name: String,
    /// Version as `major.minor.patch`
    pub version: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// SHA256 checksum of the download
    pub sha256: String,
    /// Download URL of the release asset
    pub url: String,
}

impl FormulaData {
    /// The conventional file name for this formula (`<name>.rb`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rb", self.name)
    }
}

/// Homebrew formula generator.
pub struct FormulaGenerator;

impl FormulaGenerator {
    /// Generates a Ruby formula from the data.
    #[must_use]
    pub fn generate(data: &FormulaData) -> String {
        format!(
            r#"class {class_name} < Formula
  version '{version}'
  homepage 'https://github.com/{owner}/{repo}'
  url "{url}"
  sha256 '{sha256}'
  head 'https://github.com/{owner}/{repo}.git'

  head do
    depends_on 'go' => :build
  end

  def install
    if build.head?
      system 'make', 'build'
    end
    bin.install '{name}'
  end
end
"#,
            class_name = data.class_name,
            version = data.version,
            owner = data.owner,
            repo = data.repo,
            url = data.url,
            sha256 = data.sha256,
            name = data.name,
        )
    }
}

/// Derive a Ruby class name from a repository name.
///
/// Every letter that starts a word is upper-cased and hyphens are removed,
/// so `my-tool` becomes `MyTool`. Letters, digits and underscores do not
/// start a new word.
#[must_use]
pub fn capitalized_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out.retain(|c| c != '-');
    out
}

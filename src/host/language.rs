//! Demo languages and their sample sources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Jsx,
    #[default]
    Python,
    C,
}

/// How a language gets analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The built-in line analyzer
    Toy,
    /// A registered external parser
    External,
    /// Nothing; a fixed message is shown instead
    Unsupported,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::JavaScript,
        Language::Jsx,
        Language::Python,
        Language::C,
    ];

    /// Lowercase identifier, as used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Jsx => "jsx",
            Language::Python => "python",
            Language::C => "c",
        }
    }

    /// Uppercase label for buttons and titles
    pub fn label(&self) -> String {
        self.name().to_uppercase()
    }

    pub fn backend(&self) -> Backend {
        match self {
            Language::JavaScript | Language::Jsx => Backend::External,
            Language::Python => Backend::Toy,
            Language::C => Backend::Unsupported,
        }
    }

    /// The next language in [`Language::ALL`], wrapping around
    pub fn next(&self) -> Language {
        let index = Language::ALL
            .iter()
            .position(|lang| lang == self)
            .unwrap_or(0);
        Language::ALL[(index + 1) % Language::ALL.len()]
    }

    /// Guess the language from a file extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Language> {
        match extension.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "jsx" => Some(Language::Jsx),
            "py" => Some(Language::Python),
            "c" | "h" => Some(Language::C),
            _ => None,
        }
    }

    /// Built-in sample program, loaded on language switch and reset
    pub fn sample(&self) -> &'static str {
        match self {
            Language::JavaScript => JAVASCRIPT_SAMPLE,
            Language::Jsx => JSX_SAMPLE,
            Language::Python => PYTHON_SAMPLE,
            Language::C => C_SAMPLE,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Language::ALL.iter().map(Language::name).collect();
        write!(
            f,
            "Unknown language '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "js" => Ok(Language::JavaScript),
            "py" => Ok(Language::Python),
            _ => Language::ALL
                .iter()
                .copied()
                .find(|lang| lang.name() == wanted)
                .ok_or_else(|| UnknownLanguage(s.to_string())),
        }
    }
}

const JAVASCRIPT_SAMPLE: &str = r#"function fibonacci(n) {
  if (n <= 1) return n;
  return fibonacci(n - 1) + fibonacci(n - 2);
}

const result = fibonacci(10);
console.log(result);"#;

const JSX_SAMPLE: &str = r#"function Welcome({ name }) {
  return <h1>Hello, {name}!</h1>;
}

const App = () => {
  return (
    <div className="container">
      <Welcome name="React" />
      <p>This is JSX code!</p>
    </div>
  );
};"#;

const PYTHON_SAMPLE: &str = r#"def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

result = fibonacci(10)
print(f"Fibonacci result: {result}")"#;

const C_SAMPLE: &str = r#"#include <stdio.h>

int fibonacci(int n) {
    if (n <= 1) return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

int main() {
    int result = fibonacci(10);
    printf("Fibonacci result: %d\n", result);
    return 0;
}"#;

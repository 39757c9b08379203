//! Language identification and per-language highlighting tables
//!
//! The language list is closed: the twenty languages offered by the code-mode
//! selector. Only five carry their own keyword list; the rest borrow Python's.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LanguageId {
    #[default]
    Python,
    JavaScript,
    Html,
    Css,
    Java,
    Cpp,
    CSharp,
    Php,
    Ruby,
    Go,
    Swift,
    TypeScript,
    Sql,
    Rust,
    Kotlin,
    Bash,
    PowerShell,
    Xml,
    Json,
    Yaml,
}

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "else", "elif", "for", "while", "try", "except", "finally", "with",
    "as", "import", "from", "return", "yield", "break", "continue", "pass", "and", "or", "not",
    "in", "is", "lambda", "True", "False", "None", "self", "super", "print",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "function", "var", "let", "const", "if", "else", "for", "while", "do", "switch", "case",
    "default", "break", "continue", "return", "try", "catch", "finally", "throw", "new", "this",
    "typeof", "instanceof", "null", "undefined", "true", "false", "class", "extends", "super",
    "import", "export", "async", "await",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "if", "implements", "import", "instanceof", "int", "interface", "long", "native", "new",
    "package", "private", "protected", "public", "return", "short", "static", "strictfp", "super",
    "switch", "synchronized", "this", "throw", "throws", "transient", "try", "void", "volatile",
    "while",
];

const CPP_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "class", "const", "continue", "default", "delete", "do",
    "double", "else", "enum", "extern", "float", "for", "friend", "goto", "if", "inline", "int",
    "long", "namespace", "new", "operator", "private", "protected", "public", "register", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "template", "this", "throw", "try",
    "typedef", "union", "unsigned", "virtual", "void", "volatile", "while",
];

const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "TABLE",
    "DATABASE", "VIEW", "INDEX", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "ON", "GROUP",
    "BY", "HAVING", "ORDER", "ASC", "DESC", "LIMIT", "OFFSET", "UNION", "ALL", "AS", "DISTINCT",
    "INTO", "VALUES", "SET", "CONSTRAINT", "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "NOT",
    "NULL", "DEFAULT", "AUTO_INCREMENT",
];

impl LanguageId {
    /// Every language in selector order
    pub const ALL: [LanguageId; 20] = [
        LanguageId::Python,
        LanguageId::JavaScript,
        LanguageId::Html,
        LanguageId::Css,
        LanguageId::Java,
        LanguageId::Cpp,
        LanguageId::CSharp,
        LanguageId::Php,
        LanguageId::Ruby,
        LanguageId::Go,
        LanguageId::Swift,
        LanguageId::TypeScript,
        LanguageId::Sql,
        LanguageId::Rust,
        LanguageId::Kotlin,
        LanguageId::Bash,
        LanguageId::PowerShell,
        LanguageId::Xml,
        LanguageId::Json,
        LanguageId::Yaml,
    ];

    /// Get display name for the language (as shown in the selector)
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::Python => "Python",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Html => "HTML",
            LanguageId::Css => "CSS",
            LanguageId::Java => "Java",
            LanguageId::Cpp => "C++",
            LanguageId::CSharp => "C#",
            LanguageId::Php => "PHP",
            LanguageId::Ruby => "Ruby",
            LanguageId::Go => "Go",
            LanguageId::Swift => "Swift",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Sql => "SQL",
            LanguageId::Rust => "Rust",
            LanguageId::Kotlin => "Kotlin",
            LanguageId::Bash => "Bash",
            LanguageId::PowerShell => "PowerShell",
            LanguageId::Xml => "XML",
            LanguageId::Json => "JSON",
            LanguageId::Yaml => "YAML",
        }
    }

    /// Look up a language by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Default extension used by "Save As" in code mode (with the dot)
    pub fn file_extension(&self) -> &'static str {
        match self {
            LanguageId::Python => ".py",
            LanguageId::JavaScript => ".js",
            LanguageId::Html => ".html",
            LanguageId::Css => ".css",
            LanguageId::Java => ".java",
            LanguageId::Cpp => ".cpp",
            LanguageId::CSharp => ".cs",
            LanguageId::Php => ".php",
            LanguageId::Ruby => ".rb",
            LanguageId::Go => ".go",
            LanguageId::Swift => ".swift",
            LanguageId::TypeScript => ".ts",
            LanguageId::Sql => ".sql",
            LanguageId::Rust => ".rs",
            LanguageId::Kotlin => ".kt",
            LanguageId::Bash => ".sh",
            LanguageId::PowerShell => ".ps1",
            LanguageId::Xml => ".xml",
            LanguageId::Json => ".json",
            LanguageId::Yaml => ".yml",
        }
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "yaml" => return Some(LanguageId::Yaml),
            "htm" => return Some(LanguageId::Html),
            "cc" | "cxx" | "hpp" => return Some(LanguageId::Cpp),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|lang| lang.file_extension().trim_start_matches('.') == ext)
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Keywords highlighted for this language. Languages without their own
    /// list use Python's.
    pub fn keywords(&self) -> &'static [&'static str] {
        self.own_keywords().unwrap_or(PYTHON_KEYWORDS)
    }

    /// Whether this language has a dedicated keyword list
    pub fn has_own_keywords(&self) -> bool {
        self.own_keywords().is_some()
    }

    fn own_keywords(&self) -> Option<&'static [&'static str]> {
        match self {
            LanguageId::Python => Some(PYTHON_KEYWORDS),
            LanguageId::JavaScript => Some(JAVASCRIPT_KEYWORDS),
            LanguageId::Java => Some(JAVA_KEYWORDS),
            LanguageId::Cpp => Some(CPP_KEYWORDS),
            LanguageId::Sql => Some(SQL_KEYWORDS),
            _ => None,
        }
    }

    /// Line-comment pattern used by per-language rules
    pub fn comment_pattern(&self) -> Option<&'static str> {
        match self {
            LanguageId::Python
            | LanguageId::Ruby
            | LanguageId::Bash
            | LanguageId::PowerShell
            | LanguageId::Yaml => Some(r"#.*$"),
            LanguageId::JavaScript
            | LanguageId::Java
            | LanguageId::Cpp
            | LanguageId::CSharp
            | LanguageId::Go
            | LanguageId::Swift
            | LanguageId::TypeScript
            | LanguageId::Rust
            | LanguageId::Kotlin => Some(r"//.*$"),
            LanguageId::Php => Some(r"(?://|#).*$"),
            LanguageId::Sql => Some(r"--.*$"),
            LanguageId::Html | LanguageId::Xml => Some(r"<!--.*?(?:-->|$)"),
            LanguageId::Css => Some(r"/\*.*?(?:\*/|$)"),
            LanguageId::Json => None,
        }
    }

    /// Function-definition pattern used by per-language rules; group 1 is the name
    pub fn function_pattern(&self) -> Option<&'static str> {
        match self {
            LanguageId::Python | LanguageId::Ruby => Some(r"def\s+(\w+)"),
            LanguageId::JavaScript
            | LanguageId::TypeScript
            | LanguageId::Php
            | LanguageId::Bash => Some(r"function\s+(\w+)"),
            LanguageId::PowerShell => Some(r"function\s+([\w-]+)"),
            LanguageId::Rust => Some(r"fn\s+(\w+)"),
            LanguageId::Go => Some(r"func\s+(?:\([^)]*\)\s*)?(\w+)"),
            LanguageId::Swift => Some(r"func\s+(\w+)"),
            LanguageId::Kotlin => Some(r"fun\s+(\w+)"),
            LanguageId::Java | LanguageId::Cpp | LanguageId::CSharp => Some(
                r"\b(?:void|int|bool|boolean|char|long|short|float|double|auto|string|String)\s+(\w+)\s*\(",
            ),
            LanguageId::Sql => {
                Some(r"(?i)create\s+(?:or\s+replace\s+)?(?:function|procedure)\s+(\w+)")
            }
            LanguageId::Html | LanguageId::Css | LanguageId::Xml | LanguageId::Json | LanguageId::Yaml => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_languages() {
        assert_eq!(LanguageId::ALL.len(), 20);
        let mut exts: Vec<&str> = LanguageId::ALL.iter().map(|l| l.file_extension()).collect();
        exts.sort();
        exts.dedup();
        assert_eq!(exts.len(), 20);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(LanguageId::from_name("SQL"), Some(LanguageId::Sql));
        assert_eq!(LanguageId::from_name("c++"), Some(LanguageId::Cpp));
        assert_eq!(LanguageId::from_name("C#"), Some(LanguageId::CSharp));
        assert_eq!(LanguageId::from_name("Brainfuck"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("py"), Some(LanguageId::Python));
        assert_eq!(LanguageId::from_extension(".RS"), Some(LanguageId::Rust));
        assert_eq!(LanguageId::from_extension("yaml"), Some(LanguageId::Yaml));
        assert_eq!(LanguageId::from_extension("yml"), Some(LanguageId::Yaml));
        assert_eq!(LanguageId::from_extension("txt"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("/tmp/query.sql")),
            Some(LanguageId::Sql)
        );
        assert_eq!(LanguageId::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_keyword_fallback_to_python() {
        assert!(LanguageId::Sql.has_own_keywords());
        assert!(!LanguageId::Rust.has_own_keywords());
        assert_eq!(LanguageId::Rust.keywords(), LanguageId::Python.keywords());
        assert!(LanguageId::Go.keywords().contains(&"lambda"));
    }
}

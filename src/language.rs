use crate::render::Rgba;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Shared by unmapped languages and the folded "Other" legend entry.
pub const UNKNOWN_COLOR: Rgba = Rgba::rgb(150, 150, 150);

pub const OTHER_LANGUAGE: &str = "Other";

// Colors follow GitHub's linguist palette where one exists.
const LANGUAGE_COLORS: &[(&str, Rgba)] = &[
    ("Go", Rgba::rgb(0, 173, 216)),
    ("JavaScript", Rgba::rgb(241, 224, 90)),
    ("TypeScript", Rgba::rgb(43, 116, 137)),
    ("Python", Rgba::rgb(53, 114, 165)),
    ("Java", Rgba::rgb(176, 114, 25)),
    ("C", Rgba::rgb(85, 85, 85)),
    ("C++", Rgba::rgb(243, 75, 125)),
    ("C/C++", Rgba::rgb(243, 75, 125)),
    ("C#", Rgba::rgb(23, 134, 0)),
    ("Ruby", Rgba::rgb(112, 21, 22)),
    ("PHP", Rgba::rgb(79, 93, 149)),
    ("Swift", Rgba::rgb(240, 81, 56)),
    ("Kotlin", Rgba::rgb(161, 103, 224)),
    ("Rust", Rgba::rgb(222, 165, 132)),
    ("Scala", Rgba::rgb(194, 45, 64)),
    ("Shell", Rgba::rgb(137, 224, 81)),
    ("HTML", Rgba::rgb(227, 76, 38)),
    ("CSS", Rgba::rgb(86, 61, 124)),
    ("SCSS", Rgba::rgb(198, 83, 140)),
    ("Sass", Rgba::rgb(191, 64, 191)),
    ("Less", Rgba::rgb(29, 54, 93)),
    ("Vue", Rgba::rgb(65, 184, 131)),
    ("Dart", Rgba::rgb(0, 180, 171)),
    ("Lua", Rgba::rgb(0, 0, 128)),
    ("Perl", Rgba::rgb(2, 152, 195)),
    ("Elixir", Rgba::rgb(110, 74, 126)),
    ("Clojure", Rgba::rgb(219, 88, 85)),
    ("Elm", Rgba::rgb(96, 181, 204)),
    ("Erlang", Rgba::rgb(184, 57, 152)),
    ("Haskell", Rgba::rgb(94, 80, 134)),
    ("Julia", Rgba::rgb(162, 112, 186)),
    ("Nim", Rgba::rgb(255, 202, 56)),
    ("R", Rgba::rgb(25, 140, 231)),
    ("Objective-C", Rgba::rgb(67, 142, 255)),
    ("Protocol Buffers", Rgba::rgb(66, 66, 66)),
    ("GraphQL", Rgba::rgb(225, 0, 152)),
    ("Terraform", Rgba::rgb(92, 73, 149)),
    ("Dockerfile", Rgba::rgb(56, 77, 84)),
    ("Makefile", Rgba::rgb(66, 120, 25)),
    ("Rakefile", Rgba::rgb(112, 21, 22)),
    ("Gemfile", Rgba::rgb(112, 21, 22)),
    ("JSON", Rgba::rgb(41, 41, 41)),
    ("XML", Rgba::rgb(0, 96, 176)),
    ("YAML", Rgba::rgb(203, 56, 55)),
    ("Markdown", Rgba::rgb(83, 89, 101)),
    ("SQL", Rgba::rgb(224, 147, 0)),
];

const EXTENSIONS: &[(&str, &str)] = &[
    ("go", "Go"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("py", "Python"),
    ("java", "Java"),
    ("c", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("h", "C/C++"),
    ("cs", "C#"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("rs", "Rust"),
    ("scala", "Scala"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("scss", "SCSS"),
    ("sass", "Sass"),
    ("less", "Less"),
    ("json", "JSON"),
    ("xml", "XML"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("md", "Markdown"),
    ("sql", "SQL"),
    ("r", "R"),
    ("m", "Objective-C"),
    ("vue", "Vue"),
    ("dart", "Dart"),
    ("lua", "Lua"),
    ("pl", "Perl"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("clj", "Clojure"),
    ("elm", "Elm"),
    ("erl", "Erlang"),
    ("hs", "Haskell"),
    ("jl", "Julia"),
    ("nim", "Nim"),
    ("proto", "Protocol Buffers"),
    ("graphql", "GraphQL"),
    ("tf", "Terraform"),
    ("dockerfile", "Dockerfile"),
];

const BASENAMES: &[&str] = &["Dockerfile", "Makefile", "Rakefile", "Gemfile"];

/// Extension and palette lookups, built once per process.
#[derive(Debug)]
pub struct LanguageTable {
    extensions: HashMap<&'static str, &'static str>,
    colors: HashMap<&'static str, Rgba>,
}

impl LanguageTable {
    pub fn builtin() -> &'static LanguageTable {
        static TABLE: OnceLock<LanguageTable> = OnceLock::new();
        TABLE.get_or_init(|| LanguageTable {
            extensions: EXTENSIONS.iter().copied().collect(),
            colors: LANGUAGE_COLORS.iter().copied().collect(),
        })
    }

    /// Returns `None` for files that should stay out of the language breakdown.
    pub fn classify(&self, file_name: &str) -> Option<&'static str> {
        let path = Path::new(file_name);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.get(ext.to_lowercase().as_str()).copied(),
            None => {
                let base = path.file_name().and_then(|b| b.to_str())?;
                BASENAMES.iter().copied().find(|known| *known == base)
            }
        }
    }

    pub fn color_for(&self, language: &str) -> Rgba {
        self.colors.get(language).copied().unwrap_or(UNKNOWN_COLOR)
    }
}

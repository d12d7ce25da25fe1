//! Mapping submissions to paths: problem slugs, language extensions, question ids.

/// File extension for every language tag the judge reports.
const LANG_TO_EXTENSION: &[(&str, &str)] = &[
    ("bash", "sh"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("csharp", "cs"),
    ("dart", "dart"),
    ("elixir", "ex"),
    ("erlang", "erl"),
    ("golang", "go"),
    ("java", "java"),
    ("javascript", "js"),
    ("kotlin", "kt"),
    ("mssql", "sql"),
    ("mysql", "sql"),
    ("oraclesql", "sql"),
    ("php", "php"),
    ("python", "py"),
    ("python3", "py"),
    ("pythondata", "py"),
    ("postgresql", "sql"),
    ("racket", "rkt"),
    ("ruby", "rb"),
    ("rust", "rs"),
    ("scala", "scala"),
    ("swift", "swift"),
    ("typescript", "ts"),
];

/// Normalize a problem title into a directory name.
///
/// Lowercases the title and replaces each whitespace character with `-`.
/// The result is also the problem half of the dedup key.
pub fn slug(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Look up the file extension for a language tag.
pub fn extension_for(lang: &str) -> Option<&'static str> {
    LANG_TO_EXTENSION
        .iter()
        .find(|(tag, _)| *tag == lang)
        .map(|(_, ext)| *ext)
}

/// Left-pad a question id with zeros to four characters.
///
/// Ids that are already longer than four characters are returned as-is.
pub fn pad_question_id(id: &str) -> String {
    format!("{:0>4}", id)
}

/// Directory that holds one problem's files: `[<prefix>/][<qid>-]<slug>`.
pub fn solution_dir(prefix: Option<&str>, question_id: Option<&str>, slug: &str) -> String {
    let mut dir = String::new();
    if let Some(prefix) = prefix.map(|p| p.trim_end_matches('/')).filter(|p| !p.is_empty()) {
        dir.push_str(prefix);
        dir.push('/');
    }
    if let Some(qid) = question_id {
        dir.push_str(qid);
        dir.push('-');
    }
    dir.push_str(slug);
    dir
}

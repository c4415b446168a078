use glob::Pattern;
use std::path::Path;

/// Checks the file extension against the allowed list (case-insensitive).
/// `None` allows everything.
pub fn has_valid_extension(path: &Path, extensions: &Option<Vec<String>>) -> bool {
    match extensions {
        None => true,
        Some(exts) => path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| exts.iter().any(|e| e.eq_ignore_ascii_case(ext))),
    }
}

/// Checks if a path matches any of the ignore globs
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    let normalized_path = path.to_string_lossy().replace('\\', "/");
    ignore_patterns.iter().any(|pattern| match Pattern::new(pattern) {
        Ok(p) => p.matches(&normalized_path),
        Err(_) => false,
    })
}

/// Decides whether a file found while walking a directory gets scanned
pub fn should_include_file(
    path: &Path,
    extensions: &Option<Vec<String>>,
    ignore_patterns: &[String],
) -> bool {
    has_valid_extension(path, extensions) && !should_ignore(path, ignore_patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_valid_extension() {
        let extensions = Some(vec!["pdf".to_string()]);
        assert!(has_valid_extension(Path::new("report.pdf"), &extensions));
        assert!(has_valid_extension(Path::new("REPORT.PDF"), &extensions));
        assert!(!has_valid_extension(Path::new("report.docx"), &extensions));
        assert!(!has_valid_extension(Path::new("report"), &extensions));
        assert!(has_valid_extension(Path::new("report"), &None));
    }

    #[test]
    fn test_should_ignore() {
        let ignore_patterns = vec!["**/draft_*.pdf".to_string(), "archive/**".to_string()];

        assert!(should_ignore(Path::new("draft_1.pdf"), &ignore_patterns));
        assert!(should_ignore(Path::new("docs/draft_2.pdf"), &ignore_patterns));
        assert!(should_ignore(Path::new("archive/2020/a.pdf"), &ignore_patterns));

        assert!(!should_ignore(Path::new("docs/final.pdf"), &ignore_patterns));
        assert!(!should_ignore(Path::new("archives.pdf"), &ignore_patterns));
    }

    #[test]
    fn test_only_configured_patterns_ignore() {
        assert!(!should_ignore(Path::new("clients/target/locked.pdf"), &[]));
        assert!(!should_ignore(Path::new("/srv/build/target/locked.pdf"), &[]));
        assert!(!should_ignore(Path::new("target/a.pdf"), &[]));

        let ignore_patterns = vec!["**/target/**".to_string()];
        assert!(should_ignore(Path::new("clients/target/locked.pdf"), &ignore_patterns));
    }

    #[test]
    fn test_invalid_glob_is_skipped() {
        let ignore_patterns = vec!["[".to_string()];
        assert!(!should_ignore(Path::new("a.pdf"), &ignore_patterns));
    }

    #[test]
    fn test_should_include_file() {
        let extensions = Some(vec!["pdf".to_string()]);
        let ignore_patterns = vec!["archive/**".to_string()];

        assert!(should_include_file(Path::new("docs/a.pdf"), &extensions, &ignore_patterns));
        assert!(!should_include_file(Path::new("docs/a.txt"), &extensions, &ignore_patterns));
        assert!(!should_include_file(Path::new("archive/a.pdf"), &extensions, &ignore_patterns));
    }
}
